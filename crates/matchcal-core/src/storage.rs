//! JSON state files.
//!
//! All persisted state (fixture caches, identity maps, seen ticket posts)
//! is pretty-printed UTF-8 JSON so the files stay human-diffable. Writes
//! go to a sibling temp file first and are renamed into place.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Result type for state-file operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors from reading or writing state files.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem error.
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file exists but does not hold the expected JSON.
    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl StorageError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    fn json(path: &Path, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Reads a JSON state file. Returns `None` when the file does not exist.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> StorageResult<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|e| StorageError::io(path, e))?;
    let value = serde_json::from_str(&content).map_err(|e| StorageError::json(path, e))?;
    Ok(Some(value))
}

/// Writes a value as pretty-printed JSON via a temp file and rename.
/// Parent directories are created as needed.
pub fn write_json_pretty<T: Serialize>(path: &Path, value: &T) -> StorageResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
    }

    let content = serde_json::to_string_pretty(value).map_err(|e| StorageError::json(path, e))?;
    let temp_path = path.with_extension("json.tmp");
    fs::write(&temp_path, &content).map_err(|e| StorageError::io(&temp_path, e))?;
    fs::rename(&temp_path, path).map_err(|e| StorageError::io(path, e))?;
    Ok(())
}

/// Removes a state file if present. Returns true when a file was removed.
pub fn remove_if_exists(path: &Path) -> StorageResult<bool> {
    if !path.exists() {
        return Ok(false);
    }
    fs::remove_file(path).map_err(|e| StorageError::io(path, e))?;
    Ok(true)
}
