//! Error types for whim-core operations.
//!
//! Nothing in this crate is fatal: catalog and session failures are recovered
//! at the call site (placeholder catalog, default session) and only logged.
//! The variants here exist so lower layers can report *what* went wrong and
//! recovery points can decide what to do about it.

use std::path::PathBuf;

/// All errors that can occur in whim-core operations.
#[derive(Debug, thiserror::Error)]
pub enum WhimError {
    /// The catalog resource could not be fetched or did not contain a usable
    /// activity list. Recovered by substituting the placeholder catalog.
    #[error("Catalog unavailable: {context}")]
    CatalogUnavailable { context: String },

    /// Filters left nothing to pick from, even after location relaxation.
    /// Surfaced to the user as a notice inviting them to loosen filters.
    #[error("No eligible activities for the current filters")]
    NoEligibleActivities,

    /// The persisted session blob could not be parsed. Recovered by falling
    /// back to a default session.
    #[error("Persisted session corrupt: {context}")]
    SessionCorrupt { context: String },

    #[error("I/O error: {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {context}: {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Storage path unavailable: {0}")]
    StorageUnavailable(PathBuf),
}

/// Convenience type alias for Results using WhimError.
pub type Result<T> = std::result::Result<T, WhimError>;
