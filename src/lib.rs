//! Keepsake - photo gallery and slideshow state
//!
//! The core of a client-side photo gallery: an ordered photo collection
//! persisted to a local key-value store, slideshow navigation with autoplay,
//! and a select mode for bulk deletion. Rendering, file reading and timers
//! belong to the host; it drives a [`Gallery`] and re-renders on [`Change`].

pub mod clock;
pub mod config;
pub mod constants;
mod error;
mod gallery;
pub mod model;
pub mod persistence;
pub mod selection;
pub mod slideshow;
pub mod storage;
pub mod store;
pub mod upload;

pub use config::{GalleryConfig, LogLevel};
pub use error::{GalleryError, Result};
pub use gallery::{Change, Gallery, NavKey};
pub use model::{NewPhoto, Photo, PhotoEdit};
pub use selection::SelectionController;
pub use slideshow::{AutoPlayToken, SlideshowController, SlideshowState};
pub use storage::{KeyValueStore, MemoryStore, StorageError};
pub use store::PhotoStore;
pub use upload::{UploadPolicy, ValidationError};

// WASM entry point
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::*;
