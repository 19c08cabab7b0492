//! Storage configuration and path management for whim.
//!
//! A single `StorageConfig` value centralizes every on-disk path so tests can
//! inject a temp root and production code never builds paths ad hoc.

use std::path::{Path, PathBuf};

/// Central configuration for all whim storage paths.
///
/// Production code uses `StorageConfig::default()` which points to `~/.whim/`.
/// Tests use `StorageConfig::with_root(temp_dir)` for isolation.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    root: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        let home = dirs::home_dir().expect("Could not find home directory");
        Self {
            root: home.join(".whim"),
        }
    }
}

impl StorageConfig {
    /// Creates a StorageConfig with a custom root directory.
    /// Used for testing with temp directories.
    pub fn with_root(root: PathBuf) -> Self {
        Self { root }
    }

    /// Returns the root directory for whim data.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path to session.json (the single persisted session record).
    pub fn session_file(&self) -> PathBuf {
        self.root.join("session.json")
    }

    /// Path to catalog.json (the downloaded/bundled activity catalog).
    /// The static-asset layer drops the payload here; a missing or malformed
    /// file degrades to the placeholder catalog.
    pub fn catalog_file(&self) -> PathBuf {
        self.root.join("catalog.json")
    }

    /// Path to copy.json (optional per-tone copy overrides).
    pub fn copy_file(&self) -> PathBuf {
        self.root.join("copy.json")
    }

    /// Ensures the root directory exists.
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        fs_err::create_dir_all(&self.root)
    }
}
