//! # whim-core
//!
//! Core library for whim, an activity picker: spin for a suggestion, start
//! it, finish it, earn a dot. This crate owns all of the decision logic —
//! eligibility filtering, the weighted selection policy, the screen state
//! machine, session persistence, and display statistics. Presentation
//! adapters (the bundled CLI, a future UI shell) stay thin: they raise
//! intents and render payloads.
//!
//! ## Design Principles
//!
//! - **Synchronous**: No async runtime dependency. Startup resources are
//!   read (or substituted) before any intent is accepted.
//! - **Not thread-safe**: Clients provide their own synchronization.
//! - **Graceful degradation**: Missing or corrupt files fall back to
//!   placeholder/default values, not errors. Nothing here is fatal.
//! - **Single source of truth**: All mutation goes through the engine's
//!   intent handling; injected state and randomness make every transition
//!   unit-testable.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use whim_core::{Intent, WhimEngine};
//!
//! let mut engine = WhimEngine::new();
//! let frame = engine.apply(Intent::Spin);
//! ```

// Public modules
pub mod catalog;
pub mod copy;
pub mod engine;
pub mod error;
pub mod filter;
pub mod selection;
pub mod state;
pub mod stats;
pub mod storage;
pub mod types;

// Re-export commonly used items at crate root
pub use catalog::Catalog;
pub use copy::{CopyBook, CopyDeck};
pub use engine::WhimEngine;
pub use error::{Result, WhimError};
pub use selection::{SelectionConfig, DEFAULT_COMMUNITY_WEIGHT, DEFAULT_EXCLUSION_WINDOW};
pub use state::{Intent, Session};
pub use storage::StorageConfig;
pub use types::*;
