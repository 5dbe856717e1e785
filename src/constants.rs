//! Global constants for the Keepsake gallery

/// LocalStorage / key-value key holding the serialized photo collection
pub const DEFAULT_STORAGE_KEY: &str = "anniversaryPhotos";

/// Title used when an upload has no (or only whitespace) title
pub const UNTITLED_TITLE: &str = "Untitled Memory";

/// Interval between automatic slideshow advances, in milliseconds
pub const DEFAULT_AUTOPLAY_INTERVAL_MS: u64 = 3000;

/// Largest accepted upload (10 MiB)
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Image content types accepted for upload
pub const DEFAULT_ALLOWED_TYPES: &[&str] = &["image/jpeg", "image/png", "image/gif", "image/webp"];

/// Date format used for photo dates (`YYYY-MM-DD`)
pub const DATE_FORMAT: &str = "%Y-%m-%d";
