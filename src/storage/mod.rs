//! Durable key-value storage backends.
//!
//! The gallery persists its whole collection as one string value under a
//! single key. Backends only need to read and write raw strings:
//!
//! - [`MemoryStore`]: in-process map, shared between clones (tests, previews)
//! - `FileStore`: one file per key in a directory (native only)
//! - `LocalStorageStore`: browser `localStorage` (WASM only)

mod memory;

#[cfg(not(target_arch = "wasm32"))]
mod file;

#[cfg(target_arch = "wasm32")]
mod local;

pub use memory::MemoryStore;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;

#[cfg(target_arch = "wasm32")]
pub use local::LocalStorageStore;

use thiserror::Error;

/// Errors raised by storage backends.
#[derive(Error, Debug)]
pub enum StorageError {
    /// I/O error from a file-backed store
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing the collection failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The write would exceed the backend's capacity
    #[error("Storage quota exceeded: {needed} bytes needed, limit is {limit}")]
    QuotaExceeded {
        /// Bytes the store would hold after the write
        needed: usize,
        /// Configured capacity in bytes
        limit: usize,
    },

    /// The backend refused the write for lack of space without reporting sizes
    #[error("Storage is full: {0}")]
    Full(String),

    /// Backend not reachable (no window, storage disabled, ...)
    #[error("{0}")]
    Unavailable(String),
}

impl StorageError {
    /// Whether the write failed because the backend ran out of space.
    pub fn is_quota_exceeded(&self) -> bool {
        matches!(self, Self::QuotaExceeded { .. } | Self::Full(_))
    }
}

/// Raw string storage addressed by key.
pub trait KeyValueStore {
    /// Read the value stored under `key`, `None` when absent.
    fn read_raw(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`.
    fn write_raw(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn read_raw(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).read_raw(key)
    }

    fn write_raw(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).write_raw(key, value)
    }
}
