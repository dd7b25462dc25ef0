//! Flat key-value storage.
//!
//! Values are JSON. Reads never fail: a missing key or an undecodable value
//! reads as `None` so callers fall back to built-in defaults. Writes persist
//! before returning.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::StoreError;

pub trait KeyValueStore {
    fn get_raw(&self, key: &str) -> Option<Value>;

    /// Store `value` under `key` and persist it.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backing medium cannot be written.
    fn put_raw(&mut self, key: &str, value: Value) -> Result<(), StoreError>;
}

/// Read and decode `key`. Decode failures are logged and read as `None`.
pub fn read_value<T, S>(store: &S, key: &str) -> Option<T>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let raw = store.get_raw(key)?;
    match serde_json::from_value(raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "stored value failed to decode; using default");
            None
        }
    }
}

/// Encode and persist `value` under `key`.
///
/// # Errors
///
/// Returns `StoreError` if encoding or persisting fails.
pub fn write_value<T, S>(store: &mut S, key: &str, value: &T) -> Result<(), StoreError>
where
    T: Serialize,
    S: KeyValueStore + ?Sized,
{
    let raw = serde_json::to_value(value).map_err(|e| StoreError::Serialize {
        key: key.to_string(),
        source: e,
    })?;
    store.put_raw(key, raw)
}

/// A JSON object file holding every key.
///
/// The whole object is rewritten on each `put_raw` via a temp file and a
/// rename, so a crash mid-write leaves the previous contents intact.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: Map<String, Value>,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing file is an empty store; an
    /// unreadable or malformed file is logged and treated as empty.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<Map<String, Value>>(&content) {
                Ok(map) => map,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "store file is not a JSON object; starting empty");
                    Map::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Map::new(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "store file unreadable; starting empty");
                Map::new()
            }
        };

        Self { path, entries }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            path: self.path.display().to_string(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }

        let body = serde_json::to_vec_pretty(&self.entries).map_err(|e| StoreError::Serialize {
            key: "*".to_string(),
            source: e,
        })?;

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, body).map_err(io_err)?;
        std::fs::rename(&tmp, &self.path).map_err(io_err)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get_raw(&self, key: &str) -> Option<Value> {
        self.entries.get(key).cloned()
    }

    fn put_raw(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        let previous = self.entries.insert(key.to_string(), value);
        if let Err(e) = self.flush() {
            match previous {
                Some(v) => self.entries.insert(key.to_string(), v),
                None => self.entries.remove(key),
            };
            return Err(e);
        }
        tracing::debug!(key, path = %self.path.display(), "store flushed");
        Ok(())
    }
}

/// In-memory store for tests and for running without a data directory.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, Value>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_raw(&self, key: &str) -> Option<Value> {
        self.entries.get(key).cloned()
    }

    fn put_raw(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get_raw(&self, key: &str) -> Option<Value> {
        (**self).get_raw(key)
    }

    fn put_raw(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        (**self).put_raw(key, value)
    }
}

/// Lets several owners (contacts, location cache) share one backing blob.
impl<S: KeyValueStore> KeyValueStore for Arc<Mutex<S>> {
    fn get_raw(&self, key: &str) -> Option<Value> {
        self.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get_raw(key)
    }

    fn put_raw(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        self.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .put_raw(key, value)
    }
}
