//! Error types for gallery operations.

use thiserror::Error;

use crate::storage::StorageError;

/// Errors returned by the photo store and the controllers built on top of it.
#[derive(Error, Debug)]
pub enum GalleryError {
    /// Operation referenced a photo id absent from the collection
    #[error("Photo not found: {id}")]
    NotFound {
        /// The id that was looked up
        id: String,
    },

    /// Index-based access outside `[0, len)`
    #[error("Index {index} out of range for collection of {len} photos")]
    OutOfRange {
        /// The requested index
        index: usize,
        /// Length of the collection at the time of access
        len: usize,
    },

    /// Persisting the collection failed.
    ///
    /// The in-memory mutation that triggered the write still stands.
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(#[from] StorageError),
}

impl GalleryError {
    /// Create a not-found error for a photo id.
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Whether the error left the in-memory state changed (write failed after mutation).
    pub fn is_non_fatal(&self) -> bool {
        matches!(self, Self::StorageUnavailable(_))
    }
}

/// Type alias for Results of gallery operations.
pub type Result<T> = std::result::Result<T, GalleryError>;
