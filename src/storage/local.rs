//! Browser localStorage backend (WASM only).

use wasm_bindgen::{JsCast, JsValue};

use super::{KeyValueStore, StorageError};

/// Exception names browsers use when an origin's storage is full.
const QUOTA_ERROR_NAMES: [&str; 2] = ["QuotaExceededError", "NS_ERROR_DOM_QUOTA_REACHED"];

fn write_error(e: JsValue) -> StorageError {
    match e.dyn_ref::<web_sys::DomException>() {
        Some(exception) if QUOTA_ERROR_NAMES.contains(&exception.name().as_str()) => {
            StorageError::Full(exception.message())
        }
        _ => StorageError::Unavailable(format!("Failed to save to localStorage: {:?}", e)),
    }
}

/// Key-value store over `window.localStorage`.
#[derive(Debug, Clone)]
pub struct LocalStorageStore {
    storage: web_sys::Storage,
}

impl LocalStorageStore {
    /// Acquire the window's localStorage.
    pub fn new() -> Result<Self, StorageError> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("No window object available".to_string()))?;

        let storage = window
            .local_storage()
            .map_err(|e| StorageError::Unavailable(format!("localStorage access error: {:?}", e)))?
            .ok_or_else(|| StorageError::Unavailable("localStorage not available".to_string()))?;

        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStorageStore {
    fn read_raw(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage.get_item(key).map_err(|e| {
            StorageError::Unavailable(format!("Failed to read from localStorage: {:?}", e))
        })
    }

    fn write_raw(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage.set_item(key, value).map_err(write_error)
    }
}
