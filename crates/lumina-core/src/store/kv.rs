//! String-keyed persistence adapter.
//!
//! The stores above this layer only ever need `get` and `set` on whole
//! serialized collections, so the seam is a two-method trait. The default
//! backend writes one file per key under the data dir; tests use the
//! in-memory backend.

use crate::error::{LuminaError, Result};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Device-local key-value storage for serialized collections.
pub trait KeyValue {
    /// Read the value stored under `key`, `None` if nothing was ever written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key`, replacing any previous value. The write
    /// must be durable before this returns.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// File-per-key store rooted at the data dir (`<dir>/<key>.json`).
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValue for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(LuminaError::Storage {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let storage_err = |source| LuminaError::Storage {
            key: key.to_string(),
            source,
        };

        fs::create_dir_all(&self.dir).map_err(storage_err)?;

        // Write to a sibling temp file and rename so a crash mid-write
        // never leaves a truncated collection behind.
        let tmp = self.dir.join(format!("{key}.json.tmp"));
        fs::write(&tmp, value).map_err(storage_err)?;
        fs::rename(&tmp, self.path_for(key)).map_err(storage_err)
    }
}

/// Volatile backend for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-load a key, e.g. to simulate a previous session's data.
    #[must_use]
    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }
}

impl KeyValue for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
