//! Draft buffer for the lesson editor.

use serde::{Deserialize, Serialize};

/// Unsaved lesson-editor form state. The draft holds the raw form fields
/// (the date still as typed, unvalidated) and lives in its own slot with
/// an explicit save/load/discard lifecycle; a successful lesson creation
/// discards it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LessonDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub age_group: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cover_image: Option<String>,
}

impl LessonDraft {
    /// A draft with no content is not worth keeping
    pub fn is_empty(&self) -> bool {
        self.title.trim().is_empty()
            && self.date.trim().is_empty()
            && self.age_group.trim().is_empty()
            && self.description.trim().is_empty()
            && self.cover_image.is_none()
    }
}
