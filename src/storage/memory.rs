//! In-memory key-value store.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::{KeyValueStore, StorageError};

/// Map-backed store. Clones share the same underlying map, so a test can keep
/// a handle to inspect or reload what a [`crate::PhotoStore`] wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
    /// Maximum total bytes (keys + values), `None` for unlimited
    quota: Option<usize>,
}

impl MemoryStore {
    /// Create an empty, unlimited store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit the total stored bytes, emulating a browser quota.
    pub fn with_quota(mut self, bytes: usize) -> Self {
        self.quota = Some(bytes);
        self
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    fn size_after_write(&self, key: &str, value: &str) -> usize {
        let entries = self.entries.borrow();
        let others: usize = entries
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum();
        others + key.len() + value.len()
    }
}

impl KeyValueStore for MemoryStore {
    fn read_raw(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn write_raw(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if let Some(limit) = self.quota {
            let needed = self.size_after_write(key, value);
            if needed > limit {
                return Err(StorageError::QuotaExceeded { needed, limit });
            }
        }
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
