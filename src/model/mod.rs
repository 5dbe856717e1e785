//! Data models for the Keepsake gallery.

mod photo;

pub use photo::{NewPhoto, Photo, PhotoEdit, sample_photos};
pub(crate) use photo::title_or_placeholder;
