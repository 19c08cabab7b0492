//! The single persisted session record.
//!
//! # File Format
//!
//! ```json
//! {
//!   "version": 1,
//!   "tone": "gentle",
//!   "sound_enabled": true,
//!   "filters": { ... },
//!   "history": [ ... ],
//!   "dots": [ ... ]
//! }
//! ```
//!
//! # Defensive Design
//!
//! Loading never fails and never discards the whole record for one bad
//! field: the blob is merged field-by-field over defaults, each field
//! individually deserialized and silently dropped if its shape is wrong.
//! List entries are validated one by one. Missing file, empty file, corrupt
//! JSON, and unsupported versions all fall back to a default session with a
//! warning.
//!
//! Screen position, the current pick, and the steering hint are session-
//! scoped and never written.
//!
//! # Atomic Writes
//!
//! Saves go through a temp file + rename so a crash mid-write cannot leave a
//! torn record.

use std::io::Write;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tempfile::NamedTempFile;

use crate::error::{Result, WhimError};
use crate::types::{DotEntry, FilterSettings, HistoryEntry, Tone};

use super::types::{Session, DOT_CAP, HISTORY_CAP};

/// Schema version. Only version-1 records are merged.
const SESSION_VERSION: u64 = 1;

#[derive(Serialize)]
struct StoreFile<'a> {
    version: u64,
    tone: Tone,
    sound_enabled: bool,
    filters: &'a FilterSettings,
    history: &'a [HistoryEntry],
    dots: &'a [DotEntry],
}

/// Loads the persisted session, merging the stored fields over defaults.
pub fn load(path: &Path) -> Session {
    let mut session = Session::default();

    if !path.exists() {
        return session;
    }
    let content = match fs_err::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            tracing::warn!(error = %err, "Failed to read session file, using defaults");
            return session;
        }
    };
    if content.trim().is_empty() {
        return session;
    }

    let value: Value = match serde_json::from_str(&content) {
        Ok(value) => value,
        Err(err) => {
            let err = WhimError::SessionCorrupt {
                context: err.to_string(),
            };
            tracing::warn!(error = %err, "Using default session");
            return session;
        }
    };
    let Some(record) = value.as_object() else {
        tracing::warn!("Session file is not an object, using defaults");
        return session;
    };
    match record.get("version").and_then(Value::as_u64) {
        Some(SESSION_VERSION) => {}
        version => {
            tracing::warn!(?version, "Unsupported session version, using defaults");
            return session;
        }
    }

    if let Some(tone) = field(record, "tone") {
        session.tone = tone;
    }
    if let Some(sound_enabled) = field(record, "sound_enabled") {
        session.sound_enabled = sound_enabled;
    }
    if let Some(filters) = field::<FilterSettings>(record, "filters") {
        session.filters = filters;
    }
    session.history = entries(record, "history");
    session.history.truncate(HISTORY_CAP);
    session.dots = entries(record, "dots");
    if session.dots.len() > DOT_CAP {
        let excess = session.dots.len() - DOT_CAP;
        session.dots.drain(..excess);
    }

    session
}

/// One field, individually validated; wrong shapes are dropped silently
/// (defaults win).
fn field<T: DeserializeOwned>(record: &serde_json::Map<String, Value>, name: &str) -> Option<T> {
    let value = record.get(name)?;
    match serde_json::from_value(value.clone()) {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            tracing::debug!(field = name, error = %err, "Dropping invalid session field");
            None
        }
    }
}

/// List fields keep every entry that parses and drop the rest.
fn entries<T: DeserializeOwned>(record: &serde_json::Map<String, Value>, name: &str) -> Vec<T> {
    let Some(Value::Array(items)) = record.get(name) else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| match serde_json::from_value(item.clone()) {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::debug!(field = name, error = %err, "Dropping invalid entry");
                None
            }
        })
        .collect()
}

/// Writes the persistable parts of the session atomically.
pub fn save(path: &Path, session: &Session) -> Result<()> {
    let record = StoreFile {
        version: SESSION_VERSION,
        tone: session.tone,
        sound_enabled: session.sound_enabled,
        filters: &session.filters,
        history: &session.history,
        dots: &session.dots,
    };
    let content = serde_json::to_string_pretty(&record).map_err(|source| WhimError::Json {
        context: "session record".to_string(),
        source,
    })?;

    let parent = path
        .parent()
        .ok_or_else(|| WhimError::StorageUnavailable(path.to_path_buf()))?;
    fs_err::create_dir_all(parent).map_err(|source| WhimError::Io {
        context: "session directory".to_string(),
        source,
    })?;
    let mut temp = NamedTempFile::new_in(parent).map_err(|source| WhimError::Io {
        context: "session temp file".to_string(),
        source,
    })?;
    temp.write_all(content.as_bytes())
        .map_err(|source| WhimError::Io {
            context: "session temp file".to_string(),
            source,
        })?;
    temp.flush().map_err(|source| WhimError::Io {
        context: "session temp file".to_string(),
        source,
    })?;
    temp.persist(path).map_err(|err| WhimError::Io {
        context: "session file".to_string(),
        source: err.error,
    })?;
    Ok(())
}
