//! The gallery: photo store, slideshow and selection wired together.
//!
//! [`Gallery`] is the single owned state object a host constructs at startup.
//! UI events call its operations; it forwards them to the store and the two
//! controllers, keeps the slideshow index valid across deletions, and then
//! tells subscribed listeners what changed so the host can re-render.

use web_time::Instant;

use crate::clock::{Clock, SystemClock};
use crate::config::GalleryConfig;
use crate::error::{GalleryError, Result};
use crate::model::{NewPhoto, Photo, PhotoEdit};
use crate::persistence::PhotoPersistence;
use crate::selection::SelectionController;
use crate::slideshow::{AutoPlayToken, SlideshowController};
use crate::storage::KeyValueStore;
use crate::store::PhotoStore;
use crate::upload::{UploadPolicy, ValidationError};


/// What part of the gallery state changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    /// Photos were added, edited or removed
    Collection,
    /// Slideshow opened, closed, moved or toggled autoplay
    Slideshow,
    /// Select mode or the selection changed
    Selection,
}

/// Keys the slideshow responds to while open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    /// Close the slideshow
    Escape,
    /// Previous photo
    ArrowLeft,
    /// Next photo
    ArrowRight,
}

impl NavKey {
    /// Map a DOM `KeyboardEvent.key` name.
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name {
            "Escape" => Some(Self::Escape),
            "ArrowLeft" => Some(Self::ArrowLeft),
            "ArrowRight" => Some(Self::ArrowRight),
            _ => None,
        }
    }
}

type Listener = Box<dyn FnMut(Change)>;

/// Photo gallery state.
pub struct Gallery<S> {
    store: PhotoStore<S>,
    slideshow: SlideshowController,
    selection: SelectionController,
    upload: UploadPolicy,
    listeners: Vec<Listener>,
}

impl<S: KeyValueStore> Gallery<S> {
    /// Load the gallery from `storage` using the wall clock.
    pub fn open(storage: S, config: &GalleryConfig) -> Self {
        Self::open_with_clock(storage, config, SystemClock)
    }

    pub fn open_with_clock(
        storage: S,
        config: &GalleryConfig,
        clock: impl Clock + 'static,
    ) -> Self {
        let persistence = PhotoPersistence::new(storage, config.storage_key.clone());
        let store = PhotoStore::load_with_clock(persistence, clock);
        log::info!("Gallery opened with {} photos", store.len());

        Self::from_parts(
            store,
            SlideshowController::with_interval(config.autoplay_interval()),
            config.upload.clone(),
        )
    }

    /// Assemble a gallery from an already loaded store.
    pub fn from_parts(
        store: PhotoStore<S>,
        slideshow: SlideshowController,
        upload: UploadPolicy,
    ) -> Self {
        Self {
            store,
            slideshow,
            selection: SelectionController::new(),
            upload,
            listeners: Vec::new(),
        }
    }

    /// Register a listener called after every state change.
    pub fn subscribe(&mut self, listener: impl FnMut(Change) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn notify(&mut self, change: Change) {
        for listener in &mut self.listeners {
            listener(change);
        }
    }

    // ------------------------------------------------------------------------
    // Read accessors
    // ------------------------------------------------------------------------

    pub fn store(&self) -> &PhotoStore<S> {
        &self.store
    }

    /// All photos, newest first.
    pub fn photos(&self) -> &[Photo] {
        self.store.all()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// True when the empty-state view should be shown.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn slideshow(&self) -> &SlideshowController {
        &self.slideshow
    }

    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    pub fn upload_policy(&self) -> &UploadPolicy {
        &self.upload
    }

    /// The photo shown by the open slideshow.
    pub fn current_photo(&self) -> Option<&Photo> {
        let index = self.slideshow.current_index()?;
        self.store.by_index(index).ok()
    }

    /// Slideshow progress like `"2/5"`.
    pub fn position(&self) -> Option<String> {
        self.slideshow.position(self.store.len())
    }

    /// Whether the slideshow shows arrows and one dot per photo.
    pub fn shows_navigation(&self) -> bool {
        SlideshowController::shows_navigation(self.store.len())
    }

    // ------------------------------------------------------------------------
    // Collection
    // ------------------------------------------------------------------------

    /// Check an upload against the configured policy.
    pub fn validate_upload(
        &self,
        size: u64,
        content_type: &str,
    ) -> std::result::Result<(), ValidationError> {
        self.upload.validate(size, content_type)
    }

    /// Add a photo at the front of the collection.
    pub fn add_photo(&mut self, input: NewPhoto) -> Result<Photo> {
        // The store inserts even when the write fails
        let result = self.store.add(input);
        self.slideshow.on_inserted_front(self.store.len());
        self.notify(Change::Collection);
        result
    }

    pub fn edit_photo(&mut self, id: &str, edit: &PhotoEdit) -> Result<Photo> {
        let result = self.store.update(id, edit);
        if !matches!(result, Err(GalleryError::NotFound { .. })) {
            self.notify(Change::Collection);
        }
        result
    }

    /// Edit the photo shown by the slideshow. `Ok(None)` when it is closed.
    pub fn edit_current(&mut self, edit: &PhotoEdit) -> Result<Option<Photo>> {
        let Some(id) = self.current_photo().map(|p| p.id.clone()) else {
            return Ok(None);
        };
        self.edit_photo(&id, edit).map(Some)
    }

    pub fn delete_photo(&mut self, id: &str) -> Result<Photo> {
        let index = self
            .store
            .index_of(id)
            .ok_or_else(|| GalleryError::not_found(id))?;

        let result = self.store.remove(id);
        self.after_removal(&[index]);
        result
    }

    /// Delete the photo shown by the slideshow. `Ok(None)` when it is closed.
    pub fn delete_current(&mut self) -> Result<Option<Photo>> {
        let Some(id) = self.current_photo().map(|p| p.id.clone()) else {
            return Ok(None);
        };
        self.delete_photo(&id).map(Some)
    }

    fn after_removal(&mut self, removed: &[usize]) {
        let was_open = self.slideshow.is_open();
        self.slideshow.on_removed(removed, self.store.len());
        self.notify(Change::Collection);
        if was_open {
            self.notify(Change::Slideshow);
        }
    }

    /// Grid click: toggles selection in select mode, otherwise opens the
    /// slideshow at the photo.
    pub fn activate(&mut self, id: &str) -> bool {
        if self.selection.is_select_mode() {
            return self.toggle_selection(id);
        }
        match self.store.index_of(id) {
            Some(index) => self.open_slideshow(index),
            None => false,
        }
    }

    // ------------------------------------------------------------------------
    // Slideshow
    // ------------------------------------------------------------------------

    pub fn open_slideshow(&mut self, start_index: usize) -> bool {
        let opened = self.slideshow.open(start_index, self.store.len());
        if opened {
            self.notify(Change::Slideshow);
        }
        opened
    }

    pub fn close_slideshow(&mut self) {
        if self.slideshow.is_open() {
            self.slideshow.close();
            self.notify(Change::Slideshow);
        }
    }

    pub fn next(&mut self) -> bool {
        let moved = self.slideshow.next(self.store.len());
        if moved {
            self.notify(Change::Slideshow);
        }
        moved
    }

    pub fn previous(&mut self) -> bool {
        let moved = self.slideshow.previous(self.store.len());
        if moved {
            self.notify(Change::Slideshow);
        }
        moved
    }

    pub fn go_to(&mut self, index: usize) -> bool {
        let moved = self.slideshow.go_to(index, self.store.len());
        if moved {
            self.notify(Change::Slideshow);
        }
        moved
    }

    pub fn start_autoplay(&mut self) -> Option<AutoPlayToken> {
        let token = self.slideshow.start_autoplay(self.store.len());
        if token.is_some() {
            self.notify(Change::Slideshow);
        }
        token
    }

    pub fn stop_autoplay(&mut self) {
        if self.slideshow.is_autoplaying() {
            self.slideshow.stop_autoplay();
            self.notify(Change::Slideshow);
        }
    }

    /// Returns whether autoplay is running afterwards.
    pub fn toggle_autoplay(&mut self) -> bool {
        if self.slideshow.is_autoplaying() {
            self.stop_autoplay();
        } else {
            self.start_autoplay();
        }
        self.slideshow.is_autoplaying()
    }

    /// Autoplay timer callback.
    pub fn fire_autoplay(&mut self, token: AutoPlayToken) -> bool {
        let moved = self.slideshow.fire(token, self.store.len());
        if moved {
            self.notify(Change::Slideshow);
        }
        moved
    }

    /// Frame-loop autoplay driver.
    pub fn tick(&mut self, now: Instant) -> bool {
        let moved = self.slideshow.poll(now, self.store.len());
        if moved {
            self.notify(Change::Slideshow);
        }
        moved
    }

    /// Keyboard navigation; only handled while the slideshow is open.
    pub fn handle_key(&mut self, key: NavKey) -> bool {
        if !self.slideshow.is_open() {
            return false;
        }
        match key {
            NavKey::Escape => {
                self.close_slideshow();
                true
            }
            NavKey::ArrowLeft => self.previous(),
            NavKey::ArrowRight => self.next(),
        }
    }

    // ------------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------------

    pub fn toggle_select_mode(&mut self) {
        self.selection.enter_or_exit();
        self.notify(Change::Selection);
    }

    pub fn toggle_selection(&mut self, id: &str) -> bool {
        if !self.selection.is_select_mode() {
            return false;
        }
        let selected = self.selection.toggle(id);
        self.notify(Change::Selection);
        selected
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.notify(Change::Selection);
    }

    /// Delete every selected photo and leave select mode.
    pub fn delete_selected(&mut self) -> Result<usize> {
        let removed: Vec<usize> = self
            .store
            .all()
            .iter()
            .enumerate()
            .filter(|(_, p)| self.selection.is_selected(&p.id))
            .map(|(index, _)| index)
            .collect();

        let result = self.selection.commit_delete(&mut self.store);
        self.after_removal(&removed);
        self.notify(Change::Selection);
        result
    }
}

impl<S> std::fmt::Debug for Gallery<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gallery")
            .field("store", &self.store)
            .field("slideshow", &self.slideshow)
            .field("selection", &self.selection)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
