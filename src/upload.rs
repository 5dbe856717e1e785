//! Upload acceptance rules for the file-acquisition collaborator.
//!
//! The gallery never reads files itself. Whatever acquires an image (file
//! picker, drag and drop) checks it against an [`UploadPolicy`] before
//! encoding it into a URL and handing a [`crate::NewPhoto`] to the store.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{DEFAULT_ALLOWED_TYPES, DEFAULT_MAX_UPLOAD_BYTES};

/// Reasons an upload is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// File is larger than the configured maximum
    #[error("File too large: {size} bytes (limit is {limit} bytes)")]
    TooLarge {
        /// Size of the rejected file
        size: u64,
        /// Configured maximum
        limit: u64,
    },

    /// Reported size is negative or not a number
    #[error("Invalid file size: {size}")]
    InvalidSize {
        /// The size as reported by the host
        size: String,
    },

    /// Content type is not on the allow-list
    #[error("Unsupported image type '{content_type}'")]
    UnsupportedType {
        /// The rejected content type
        content_type: String,
    },
}

/// Size limit and allowed image formats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadPolicy {
    /// Largest accepted file in bytes
    #[serde(default = "default_max_bytes")]
    pub max_bytes: u64,

    /// Accepted MIME types, compared case-insensitively
    #[serde(default = "default_allowed_types")]
    pub allowed_types: Vec<String>,
}

fn default_max_bytes() -> u64 {
    DEFAULT_MAX_UPLOAD_BYTES
}

fn default_allowed_types() -> Vec<String> {
    DEFAULT_ALLOWED_TYPES.iter().map(|t| t.to_string()).collect()
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_bytes: default_max_bytes(),
            allowed_types: default_allowed_types(),
        }
    }
}

impl UploadPolicy {
    /// Check a file's size and content type. Size is checked first.
    pub fn validate(&self, size: u64, content_type: &str) -> Result<(), ValidationError> {
        if size > self.max_bytes {
            return Err(ValidationError::TooLarge {
                size,
                limit: self.max_bytes,
            });
        }

        if !self.is_allowed_type(content_type) {
            return Err(ValidationError::UnsupportedType {
                content_type: content_type.to_string(),
            });
        }

        Ok(())
    }

    /// [`Self::validate`] for sizes reported as floating point, like the
    /// browser's `File.size`. Non-finite and negative sizes are rejected.
    pub fn validate_reported(&self, size: f64, content_type: &str) -> Result<(), ValidationError> {
        if !size.is_finite() || size < 0.0 {
            return Err(ValidationError::InvalidSize {
                size: size.to_string(),
            });
        }
        self.validate(size as u64, content_type)
    }

    pub fn is_allowed_type(&self, content_type: &str) -> bool {
        let content_type = content_type.trim();
        self.allowed_types
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(content_type))
    }

    /// First-pass filter for dropped files: anything `image/*` goes on to
    /// [`Self::validate`], everything else is rejected immediately.
    pub fn accepts_drop(content_type: &str) -> bool {
        content_type
            .trim()
            .to_ascii_lowercase()
            .starts_with("image/")
    }

    /// Human-readable list of accepted formats, e.g. `"JPEG, PNG, GIF, or WebP"`.
    pub fn describe_types(&self) -> String {
        let names: Vec<String> = self
            .allowed_types
            .iter()
            .map(|t| format_name(t))
            .collect();

        match names.as_slice() {
            [] => String::new(),
            [only] => only.clone(),
            [rest @ .., last] => format!("{}, or {}", rest.join(", "), last),
        }
    }
}

fn format_name(content_type: &str) -> String {
    let subtype = content_type.rsplit('/').next().unwrap_or(content_type);
    match subtype.to_ascii_lowercase().as_str() {
        "jpeg" | "jpg" => "JPEG".to_string(),
        "webp" => "WebP".to_string(),
        other => other.to_ascii_uppercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_default_types() {
        let policy = UploadPolicy::default();
        for t in ["image/jpeg", "image/png", "image/gif", "image/webp", "IMAGE/PNG"] {
            assert_eq!(policy.validate(1024, t), Ok(()), "{}", t);
        }
    }

    #[test]
    fn test_limit_is_inclusive() {
        let policy = UploadPolicy::default();
        assert!(policy.validate(10 * 1024 * 1024, "image/png").is_ok());
        assert_eq!(
            policy.validate(10 * 1024 * 1024 + 1, "image/png"),
            Err(ValidationError::TooLarge {
                size: 10 * 1024 * 1024 + 1,
                limit: 10 * 1024 * 1024,
            })
        );
    }

    #[test]
    fn test_rejects_unsupported_type() {
        let policy = UploadPolicy::default();
        assert_eq!(
            policy.validate(10, "image/tiff"),
            Err(ValidationError::UnsupportedType {
                content_type: "image/tiff".to_string()
            })
        );
    }

    #[test]
    fn test_size_checked_before_type() {
        let policy = UploadPolicy::default();
        assert!(matches!(
            policy.validate(u64::MAX, "text/plain"),
            Err(ValidationError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_reported_size_must_be_a_real_size() {
        let policy = UploadPolicy::default();
        for size in [f64::NAN, f64::INFINITY, -1.0] {
            assert!(
                matches!(
                    policy.validate_reported(size, "image/png"),
                    Err(ValidationError::InvalidSize { .. })
                ),
                "{}",
                size
            );
        }

        assert_eq!(policy.validate_reported(2048.0, "image/png"), Ok(()));
        assert!(matches!(
            policy.validate_reported(11.0 * 1024.0 * 1024.0, "image/png"),
            Err(ValidationError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_accepts_drop() {
        assert!(UploadPolicy::accepts_drop("image/heic"));
        assert!(!UploadPolicy::accepts_drop("application/pdf"));
    }

    #[test]
    fn test_describe_types() {
        assert_eq!(
            UploadPolicy::default().describe_types(),
            "JPEG, PNG, GIF, or WebP"
        );
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let policy: UploadPolicy = serde_json::from_str(r#"{"max_bytes": 5}"#).unwrap();
        assert_eq!(policy.max_bytes, 5);
        assert_eq!(policy.allowed_types.len(), 4);
    }
}
