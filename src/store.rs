//! The canonical photo collection.
//!
//! [`PhotoStore`] owns the ordered, newest-first sequence of photos. Every
//! mutation goes through it so ids stay unique, and every mutation is
//! followed by exactly one write of the full collection.
//!
//! A failed write does not roll the mutation back: the in-memory collection
//! stays authoritative, the store is marked dirty, and the caller receives
//! [`GalleryError::StorageUnavailable`]. [`PhotoStore::save`] retries.

use std::collections::HashSet;

use crate::clock::{Clock, SystemClock};
use crate::error::{GalleryError, Result};
use crate::model::{NewPhoto, Photo, PhotoEdit, sample_photos, title_or_placeholder};
use crate::persistence::{Loaded, PhotoPersistence};
use crate::storage::KeyValueStore;

/// Owner of the photo collection.
pub struct PhotoStore<S> {
    /// Newest first
    photos: Vec<Photo>,
    persistence: PhotoPersistence<S>,
    clock: Box<dyn Clock>,
    /// Last id handed out, used to keep time-based ids strictly increasing
    last_id: i64,
    /// Set while the in-memory collection differs from what was last written
    dirty: bool,
}

impl<S: KeyValueStore> PhotoStore<S> {
    /// Load the collection using the wall clock.
    pub fn load(persistence: PhotoPersistence<S>) -> Self {
        Self::load_with_clock(persistence, SystemClock)
    }

    /// Load the collection, seeding it with sample photos when nothing usable
    /// is persisted.
    pub fn load_with_clock(persistence: PhotoPersistence<S>, clock: impl Clock + 'static) -> Self {
        let mut store = Self {
            photos: Vec::new(),
            persistence,
            clock: Box::new(clock),
            last_id: 0,
            dirty: false,
        };
        store.reload();
        store
    }

    /// Re-read the persisted collection, discarding in-memory state.
    ///
    /// Absent or malformed data yields the sample set, which is written back.
    pub fn reload(&mut self) -> &[Photo] {
        match self.persistence.load() {
            Loaded::Photos(photos) => {
                self.photos = photos;
                self.dirty = false;
            }
            Loaded::Absent => {
                log::info!("No saved photos, seeding sample collection");
                self.seed();
            }
            Loaded::Corrupt(reason) => {
                log::warn!("Discarding unreadable photo collection ({})", reason);
                self.seed();
            }
        }
        &self.photos
    }

    fn seed(&mut self) {
        self.photos = sample_photos(&self.clock.timestamp());
        if let Err(e) = self.persist() {
            log::warn!("Failed to persist sample collection: {}", e);
        }
    }

    /// Write the collection, tracking whether memory and storage agree.
    fn persist(&mut self) -> Result<()> {
        match self.persistence.save(&self.photos) {
            Ok(()) => {
                self.dirty = false;
                Ok(())
            }
            Err(e) => {
                self.dirty = true;
                log::warn!("Failed to save photos: {}", e);
                Err(e.into())
            }
        }
    }

    /// Write the full collection now. Used to retry after a failed write.
    pub fn save(&mut self) -> Result<()> {
        self.persist()
    }

    /// Whether the last write failed and storage is behind memory.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Time-based id: epoch millis, bumped past the last id and any id in use.
    fn next_id(&mut self) -> String {
        let mut candidate = self.clock.millis().max(self.last_id + 1);
        while self.contains(&candidate.to_string()) {
            candidate += 1;
        }
        self.last_id = candidate;
        candidate.to_string()
    }

    /// Add a photo at the front of the collection and return it.
    ///
    /// Blank titles become the placeholder title and blank dates become
    /// today's date. On a failed write the photo is still at index 0.
    pub fn add(&mut self, input: NewPhoto) -> Result<Photo> {
        let date = if input.date.trim().is_empty() {
            self.clock.today()
        } else {
            input.date.trim().to_string()
        };

        let photo = Photo {
            id: self.next_id(),
            title: title_or_placeholder(&input.title),
            description: input.description.trim().to_string(),
            date,
            url: input.url,
            uploaded_at: self.clock.timestamp(),
        };

        log::debug!("Adding photo {} '{}'", photo.id, photo.title);
        self.photos.insert(0, photo.clone());
        self.persist()?;
        Ok(photo)
    }

    /// Apply an edit to the photo with `id` and return the updated photo.
    pub fn update(&mut self, id: &str, edit: &PhotoEdit) -> Result<Photo> {
        let photo = self
            .photos
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| GalleryError::not_found(id))?;

        photo.apply(edit);
        let updated = photo.clone();
        log::debug!("Updated photo {}", id);

        self.persist()?;
        Ok(updated)
    }

    /// Remove the photo with `id` and return it.
    ///
    /// Removing an id twice fails with `NotFound` the second time.
    pub fn remove(&mut self, id: &str) -> Result<Photo> {
        let index = self.index_of(id).ok_or_else(|| GalleryError::not_found(id))?;
        let removed = self.photos.remove(index);
        log::debug!("Removed photo {} at index {}", id, index);

        self.persist()?;
        Ok(removed)
    }

    /// Remove every photo whose id is in `ids`, ignoring unknown ids.
    /// Returns how many photos were removed.
    pub fn remove_many(&mut self, ids: &HashSet<String>) -> Result<usize> {
        let before = self.photos.len();
        self.photos.retain(|p| !ids.contains(&p.id));
        let removed = before - self.photos.len();
        log::debug!("Removed {} of {} requested photos", removed, ids.len());

        self.persist()?;
        Ok(removed)
    }

    /// All photos, newest first.
    pub fn all(&self) -> &[Photo] {
        &self.photos
    }

    /// The photo at `index`.
    pub fn by_index(&self, index: usize) -> Result<&Photo> {
        self.photos.get(index).ok_or(GalleryError::OutOfRange {
            index,
            len: self.photos.len(),
        })
    }

    pub fn get(&self, id: &str) -> Option<&Photo> {
        self.photos.iter().find(|p| p.id == id)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.photos.iter().position(|p| p.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.photos.iter().any(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }
}

impl<S> std::fmt::Debug for PhotoStore<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhotoStore")
            .field("photos", &self.photos.len())
            .field("last_id", &self.last_id)
            .field("dirty", &self.dirty)
            .finish()
    }
}
