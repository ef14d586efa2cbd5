//! Small key/value persistence
//!
//! Backends:
//! - `MemoryStorage`: in-process map (tests, headless runs)
//! - `FileStorage`: one JSON file per key in a directory (native only)
//! - `LocalStorage`: browser LocalStorage (wasm32 only)
//!
//! Callers decide what to do with errors; gameplay code logs and moves on.

use std::collections::HashMap;

use serde::Serialize;
use serde::de::DeserializeOwned;

#[cfg(not(target_arch = "wasm32"))]
mod file;
#[cfg(target_arch = "wasm32")]
mod local;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;
#[cfg(target_arch = "wasm32")]
pub use local::LocalStorage;

/// Errors from a storage backend
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// String key/value store
pub trait Storage {
    /// Read the value under `key`; `Ok(None)` when nothing is stored
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Read and decode a JSON value
pub fn load_json<T: DeserializeOwned>(
    storage: &impl Storage,
    key: &str,
) -> Result<Option<T>, StorageError> {
    match storage.read(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Encode and write a JSON value
pub fn save_json<T: Serialize>(
    storage: &mut impl Storage,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let json = serde_json::to_string(value)?;
    storage.write(key, &json)
}

/// In-memory storage
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
    /// When set, every read and write fails (simulates blocked storage)
    pub unavailable: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that rejects every operation
    pub fn unavailable() -> Self {
        Self {
            entries: HashMap::new(),
            unavailable: true,
        }
    }

    /// Put a raw value, bypassing availability (for seeding corrupt data)
    pub fn insert_raw(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    pub fn get_raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.unavailable {
            return Err(StorageError::Unavailable("memory storage disabled".into()));
        }
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.unavailable {
            return Err(StorageError::Unavailable("memory storage disabled".into()));
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
