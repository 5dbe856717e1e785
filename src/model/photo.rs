//! Photo record and the inputs used to create and edit one.

use serde::{Deserialize, Serialize};

use crate::constants::UNTITLED_TITLE;

/// A single photo in the collection.
///
/// Serialized with camelCase keys (`uploadedAt`) so collections written by
/// earlier versions of the widget load unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    /// Unique identifier, immutable after creation
    pub id: String,
    /// Display title
    pub title: String,
    /// Free-form description, may be empty
    #[serde(default)]
    pub description: String,
    /// Calendar date (`YYYY-MM-DD`) the photo belongs to
    #[serde(default)]
    pub date: String,
    /// Opaque image reference (external link or data URL)
    pub url: String,
    /// Creation timestamp, never mutated
    #[serde(default)]
    pub uploaded_at: String,
}

impl Photo {
    /// Apply an edit in place. Only fields present in the edit change.
    pub(crate) fn apply(&mut self, edit: &PhotoEdit) {
        if let Some(title) = &edit.title {
            self.title = title_or_placeholder(title);
        }
        if let Some(date) = &edit.date {
            self.date = date.clone();
        }
        if let Some(description) = &edit.description {
            self.description = description.clone();
        }
    }
}

/// Input for a new photo, supplied by the upload collaborator after validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewPhoto {
    pub title: String,
    pub description: String,
    /// Empty means "today"
    pub date: String,
    pub url: String,
}

impl NewPhoto {
    /// Create an upload input for an already-encoded image reference.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }
}

/// Partial update of a photo's editable fields.
///
/// `id`, `url` and `uploaded_at` are not editable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhotoEdit {
    pub title: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
}

impl PhotoEdit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// True when the edit would not change anything.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.date.is_none() && self.description.is_none()
    }
}

/// Trimmed title, or the placeholder when nothing is left.
pub(crate) fn title_or_placeholder(title: &str) -> String {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        UNTITLED_TITLE.to_string()
    } else {
        trimmed.to_string()
    }
}

/// The deterministic sample collection used when nothing is persisted yet.
pub fn sample_photos(uploaded_at: &str) -> Vec<Photo> {
    let sample = |id: &str, title: &str, description: &str, date: &str, picsum_id: u32| Photo {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        date: date.to_string(),
        url: format!("https://picsum.photos/id/{}/800/600", picsum_id),
        uploaded_at: uploaded_at.to_string(),
    };

    vec![
        sample(
            "1",
            "Beach Day",
            "Our beautiful day at the beach.",
            "2023-07-15",
            1015,
        ),
        sample(
            "2",
            "Anniversary Dinner",
            "Celebrating our anniversary together.",
            "2024-09-25",
            1016,
        ),
        sample(
            "3",
            "Mountain Trip",
            "Hiking in the mountains.",
            "2024-05-10",
            1018,
        ),
    ]
}
