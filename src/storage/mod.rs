//! Durable key/value storage
//!
//! The game only needs `get` and `set` on string keys. Values are JSON text.
//! Missing keys and unparsable values both read as "no value"; the caller
//! then starts from a fresh default.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::io;
use thiserror::Error;

/// Errors from storage operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Corrupt value for key {key:?}: {source}")]
    Corrupt {
        key: String,
        source: serde_json::Error,
    },
}

/// Synchronous string key/value store
pub trait KeyValueStore {
    /// Stored text for `key`, if any
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value
    ///
    /// # Errors
    ///
    /// Returns an error if the value could not be made durable.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Read and deserialize a JSON value
///
/// `Ok(None)` when the key is absent.
///
/// # Errors
///
/// Returns `StoreError::Corrupt` if the stored text is not valid for `T`.
pub fn read_json<T, S>(store: &S, key: &str) -> Result<Option<T>, StoreError>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    store
        .get(key)
        .map(|text| {
            serde_json::from_str(&text).map_err(|source| StoreError::Corrupt {
                key: key.to_string(),
                source,
            })
        })
        .transpose()
}

/// Serialize and store a JSON value
///
/// # Errors
///
/// Returns an error if serialization or the underlying write fails.
pub fn write_json<T, S>(store: &mut S, key: &str, value: &T) -> Result<(), StoreError>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let text = serde_json::to_string(value)?;
    store.set(key, &text)
}
