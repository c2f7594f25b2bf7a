//! Values exchanged between tools through the session state.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// A loaded document.
///
/// Every loader stores a whole `Document` in the session, never bare text,
/// so consumers always read [`Document::content`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub content: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

impl Document {
    pub fn from_text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            metadata: BTreeMap::new(),
        }
    }

    pub fn from_web(url: &str, title: Option<String>, content: impl Into<String>) -> Self {
        let mut metadata = BTreeMap::new();
        metadata.insert("source".to_string(), url.to_string());
        if let Some(title) = title {
            metadata.insert("title".to_string(), title);
        }
        Self {
            content: content.into(),
            metadata,
        }
    }

    pub fn from_file(path: &Path, content: impl Into<String>) -> Self {
        let mut metadata = BTreeMap::new();
        metadata.insert("source".to_string(), path.display().to_string());
        Self {
            content: content.into(),
            metadata,
        }
    }

    pub fn source(&self) -> Option<&str> {
        self.metadata.get("source").map(String::as_str)
    }

    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }
}

/// Record of the most recently generated image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageArtifact {
    pub filename: String,
    pub artifact_version: u32,
    pub mime_type: String,
    /// Base64 (standard alphabet) encoding of the image bytes.
    pub image_bytes: String,
}
