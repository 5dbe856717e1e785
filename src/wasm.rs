//! Browser bindings: a localStorage-backed gallery exposed to JavaScript.
//!
//! Photos cross the boundary as JSON strings (the same layout that is
//! persisted). The page drives autoplay by calling `autoplay_tick` from an
//! animation frame or short interval; advances happen at the configured pace.

use wasm_bindgen::prelude::*;
use web_time::Instant;

use crate::storage::LocalStorageStore;
use crate::{Change, Gallery, GalleryConfig, NavKey, NewPhoto, PhotoEdit};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    let config = GalleryConfig::load_or_create_local_storage();
    let level = config
        .log_level
        .to_level_filter()
        .to_level()
        .unwrap_or(log::Level::Error);
    if let Err(e) = console_log::init_with_level(level) {
        web_sys::console::log_1(&format!("Logger already initialized: {}", e).into());
    }
}

fn to_js(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn change_name(change: Change) -> &'static str {
    match change {
        Change::Collection => "collection",
        Change::Slideshow => "slideshow",
        Change::Selection => "selection",
    }
}

/// Gallery handle owned by the page.
#[wasm_bindgen]
pub struct WebGallery {
    inner: Gallery<LocalStorageStore>,
}

#[wasm_bindgen]
impl WebGallery {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<WebGallery, JsValue> {
        let config = GalleryConfig::load_from_local_storage().unwrap_or_default();
        let storage = LocalStorageStore::new().map_err(to_js)?;
        Ok(Self {
            inner: Gallery::open(storage, &config),
        })
    }

    /// Call `callback(kind)` after every change; kind is "collection",
    /// "slideshow" or "selection".
    pub fn on_change(&mut self, callback: js_sys::Function) {
        self.inner.subscribe(move |change| {
            let kind = JsValue::from_str(change_name(change));
            if let Err(e) = callback.call1(&JsValue::NULL, &kind) {
                log::warn!("Change listener failed: {:?}", e);
            }
        });
    }

    /// All photos, newest first, as a JSON array.
    pub fn photos_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.inner.photos()).map_err(to_js)
    }

    /// The current slideshow photo as JSON, `undefined` when closed.
    pub fn current_photo_json(&self) -> Result<Option<String>, JsValue> {
        self.inner
            .current_photo()
            .map(|p| serde_json::to_string(p).map_err(to_js))
            .transpose()
    }

    pub fn len(&self) -> u32 {
        self.inner.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Throws a message suitable for a toast when the file is rejected.
    pub fn validate_upload(&self, size: f64, content_type: &str) -> Result<(), JsValue> {
        self.inner
            .upload_policy()
            .validate_reported(size, content_type)
            .map_err(to_js)
    }

    /// Add a photo; returns it as JSON.
    pub fn add_photo(
        &mut self,
        url: String,
        title: String,
        description: String,
        date: String,
    ) -> Result<String, JsValue> {
        let input = NewPhoto::new(url)
            .with_title(title)
            .with_description(description)
            .with_date(date);
        let photo = self.inner.add_photo(input).map_err(to_js)?;
        serde_json::to_string(&photo).map_err(to_js)
    }

    /// Edit the photo shown in the slideshow. Returns false when closed.
    pub fn edit_current(
        &mut self,
        title: Option<String>,
        date: Option<String>,
        description: Option<String>,
    ) -> Result<bool, JsValue> {
        let edit = PhotoEdit {
            title,
            date,
            description,
        };
        self.inner
            .edit_current(&edit)
            .map(|edited| edited.is_some())
            .map_err(to_js)
    }

    /// Delete the photo shown in the slideshow. Returns false when closed.
    pub fn delete_current(&mut self) -> Result<bool, JsValue> {
        self.inner
            .delete_current()
            .map(|removed| removed.is_some())
            .map_err(to_js)
    }

    pub fn open_slideshow(&mut self, start_index: u32) -> bool {
        self.inner.open_slideshow(start_index as usize)
    }

    pub fn close_slideshow(&mut self) {
        self.inner.close_slideshow();
    }

    pub fn next(&mut self) -> bool {
        self.inner.next()
    }

    pub fn previous(&mut self) -> bool {
        self.inner.previous()
    }

    pub fn go_to(&mut self, index: u32) -> bool {
        self.inner.go_to(index as usize)
    }

    pub fn current_index(&self) -> Option<u32> {
        self.inner.slideshow().current_index().map(|i| i as u32)
    }

    pub fn is_slideshow_open(&self) -> bool {
        self.inner.slideshow().is_open()
    }

    /// Whether to render arrows and navigation dots.
    pub fn shows_navigation(&self) -> bool {
        self.inner.shows_navigation()
    }

    pub fn toggle_autoplay(&mut self) -> bool {
        self.inner.toggle_autoplay()
    }

    pub fn is_autoplaying(&self) -> bool {
        self.inner.slideshow().is_autoplaying()
    }

    pub fn autoplay_tick(&mut self) -> bool {
        self.inner.tick(Instant::now())
    }

    /// Handle a `KeyboardEvent.key`; returns whether it was consumed.
    pub fn handle_key(&mut self, key: &str) -> bool {
        NavKey::from_key_name(key).is_some_and(|key| self.inner.handle_key(key))
    }

    /// Grid click on a photo.
    pub fn activate(&mut self, id: &str) -> bool {
        self.inner.activate(id)
    }

    pub fn toggle_select_mode(&mut self) {
        self.inner.toggle_select_mode();
    }

    pub fn is_select_mode(&self) -> bool {
        self.inner.selection().is_select_mode()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.inner.selection().is_selected(id)
    }

    pub fn toggle_selection(&mut self, id: &str) -> bool {
        self.inner.toggle_selection(id)
    }

    pub fn delete_selected(&mut self) -> Result<u32, JsValue> {
        self.inner
            .delete_selected()
            .map(|count| count as u32)
            .map_err(to_js)
    }
}
