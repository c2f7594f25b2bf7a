use crate::constants::IMAGES_DIR;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;
use uuid::Uuid;

/// Local directory generated images are written to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageDirectory {
    root: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedImage {
    pub filename: String,
    pub path: PathBuf,
}

impl Default for ImageDirectory {
    fn default() -> Self {
        Self::new(IMAGES_DIR)
    }
}

impl ImageDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write `data` as `image_<uuid>.<ext>`, creating the directory if needed.
    /// The write is not atomic and a partial file is left behind on failure.
    pub async fn save(&self, data: &[u8], mime_type: &str) -> io::Result<SavedImage> {
        fs::create_dir_all(&self.root).await?;
        let filename = format!("image_{}.{}", Uuid::new_v4(), extension_for_mime(mime_type));
        let path = self.root.join(&filename);
        fs::write(&path, data).await?;
        info!(path = %path.display(), bytes = data.len(), "Image saved to local path");
        Ok(SavedImage { filename, path })
    }
}

/// File extension for a MIME type: its subtype, e.g. `image/png` -> `png`
pub fn extension_for_mime(mime_type: &str) -> &str {
    let subtype = mime_type.rsplit('/').next().unwrap_or(mime_type);
    let subtype = subtype.split(';').next().unwrap_or(subtype).trim();
    if subtype.is_empty() { "bin" } else { subtype }
}
