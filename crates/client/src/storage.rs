//! Durable client-side key/value storage.
//!
//! The client keeps its state (the cart and the demo login pair) in a single
//! JSON object on disk, one entry per key. Every write rewrites the file
//! through a temp file and a rename, so a crash never leaves a torn file.
//!
//! No locking: two processes writing the same file race, last writer wins.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use thiserror::Error;

/// Errors raised by [`LocalStorage`].
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the state file failed.
    #[error("State file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The state file or a stored value is not the expected JSON.
    #[error("Invalid stored data: {0}")]
    Json(#[from] serde_json::Error),
}

/// JSON key/value store persisted to a file.
#[derive(Debug, Clone, Default)]
pub struct LocalStorage {
    /// `None` for an in-memory store that is never written to disk.
    path: Option<PathBuf>,
    entries: BTreeMap<String, Value>,
}

impl LocalStorage {
    /// Open the store at `path`.
    ///
    /// A missing file is an empty store; the file (and its parent
    /// directories) are created on first write.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the file exists but cannot be read or is not
    /// a JSON object.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();

        let entries = match std::fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "state file not found, starting empty");
                BTreeMap::new()
            }
            Err(source) => return Err(StorageError::Io { path, source }),
        };

        Ok(Self {
            path: Some(path),
            entries,
        })
    }

    /// A store that lives only in memory.
    #[must_use]
    pub fn ephemeral() -> Self {
        Self::default()
    }

    /// Path of the backing file, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Read and decode the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Json` if the stored value does not decode as `T`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        self.entries
            .get(key)
            .map(|value| serde_json::from_value(value.clone()))
            .transpose()
            .map_err(StorageError::from)
    }

    /// Store `value` under `key` and write the file.
    ///
    /// The in-memory entry is only replaced once the file write succeeded.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if encoding or writing fails.
    pub fn set<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<(), StorageError> {
        let mut entries = self.entries.clone();
        entries.insert(key.to_owned(), serde_json::to_value(value)?);
        self.write(&entries)?;
        self.entries = entries;
        Ok(())
    }

    fn write(&self, entries: &BTreeMap<String, Value>) -> Result<(), StorageError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let io_err = |source: std::io::Error| StorageError::Io {
            path: path.clone(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }

        let json = serde_json::to_string_pretty(entries)?;
        let temp_path = path.with_extension("json.tmp");
        std::fs::write(&temp_path, json).map_err(io_err)?;
        std::fs::rename(&temp_path, path).map_err(io_err)?;

        tracing::debug!(path = %path.display(), keys = entries.len(), "state file written");
        Ok(())
    }
}
