//! Session state: the mutable root, screen transitions, and persistence.
//!
//! All mutation flows through [`crate::engine::WhimEngine`]'s intent methods;
//! nothing else writes the session. The pieces here are deliberately small:
//!
//! - [`types`]: the in-memory [`Session`] record, caps, and progress math
//! - [`transition`]: the pure screen state machine
//! - [`store`]: the single persisted JSON record, loaded by field-by-field
//!   merge over defaults
//!
//! Screen position is never persisted: a reload always lands on the spin
//! screen, while tone, sound, filters, history, and dots survive.

mod store;
mod transition;
mod types;

pub use store::{load, save};
pub use transition::{next_screen, Intent};
pub use types::{Session, DOT_CAP, HISTORY_CAP};
