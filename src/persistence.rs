//! Serialization of the photo collection to a key-value store.

use std::collections::HashSet;

use crate::model::Photo;
use crate::storage::{KeyValueStore, StorageError};

/// Outcome of reading the persisted collection.
#[derive(Debug)]
pub enum Loaded {
    /// A well-formed collection (possibly empty)
    Photos(Vec<Photo>),
    /// Nothing stored under the key
    Absent,
    /// Something is stored but cannot be used
    Corrupt(String),
}

/// Reads and writes the full collection as a JSON array under one key.
#[derive(Debug)]
pub struct PhotoPersistence<S> {
    storage: S,
    key: String,
}

impl<S: KeyValueStore> PhotoPersistence<S> {
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Read the persisted collection. Never fails: unreadable storage is
    /// reported as [`Loaded::Absent`] or [`Loaded::Corrupt`].
    ///
    /// Records repeating an earlier id are dropped, keeping the first.
    pub fn load(&self) -> Loaded {
        let raw = match self.storage.read_raw(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                log::debug!("No photo collection stored under '{}'", self.key);
                return Loaded::Absent;
            }
            Err(e) => {
                log::warn!("Failed to read photo collection '{}': {}", self.key, e);
                return Loaded::Absent;
            }
        };

        match serde_json::from_str::<Vec<Photo>>(&raw) {
            Ok(mut photos) => {
                let before = photos.len();
                let mut seen = HashSet::new();
                photos.retain(|p| seen.insert(p.id.clone()));
                if photos.len() < before {
                    log::warn!(
                        "Dropped {} photos with duplicate ids from '{}'",
                        before - photos.len(),
                        self.key
                    );
                }

                log::info!("Loaded {} photos from '{}'", photos.len(), self.key);
                Loaded::Photos(photos)
            }
            Err(e) => {
                log::warn!("Failed to parse photo collection '{}': {}", self.key, e);
                Loaded::Corrupt(e.to_string())
            }
        }
    }

    /// Write the full collection, replacing what was stored.
    pub fn save(&mut self, photos: &[Photo]) -> Result<(), StorageError> {
        let json = serde_json::to_string(photos)?;
        self.storage.write_raw(&self.key, &json)?;
        log::debug!("Saved {} photos to '{}'", photos.len(), self.key);
        Ok(())
    }
}
