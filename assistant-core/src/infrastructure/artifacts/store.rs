use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub mime_type: String,
    pub data: Vec<u8>,
    pub created_at: DateTime<Utc>,
}

impl Artifact {
    pub fn new(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("artifact filename must not be empty")]
    EmptyFilename,
    #[error("artifact store backend failure: {0}")]
    Backend(String),
}

/// Session-scoped, versioned storage for binary payloads.
///
/// Saving the same filename again in the same session creates a new version;
/// versions start at 0.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    async fn save(
        &self,
        session_id: &str,
        filename: &str,
        artifact: Artifact,
    ) -> Result<u32, ArtifactError>;

    /// Load a specific version, or the latest when `version` is `None`
    async fn load(
        &self,
        session_id: &str,
        filename: &str,
        version: Option<u32>,
    ) -> Result<Option<Artifact>, ArtifactError>;

    async fn list(&self, session_id: &str) -> Result<Vec<String>, ArtifactError>;
}

#[derive(Default)]
pub struct InMemoryArtifactStore {
    entries: Mutex<HashMap<(String, String), Vec<Artifact>>>,
}

impl InMemoryArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ArtifactStore for InMemoryArtifactStore {
    async fn save(
        &self,
        session_id: &str,
        filename: &str,
        artifact: Artifact,
    ) -> Result<u32, ArtifactError> {
        if filename.trim().is_empty() {
            return Err(ArtifactError::EmptyFilename);
        }
        let mut entries = self.entries.lock().await;
        let versions = entries
            .entry((session_id.to_string(), filename.to_string()))
            .or_default();
        versions.push(artifact);
        let version = u32::try_from(versions.len() - 1)
            .map_err(|_| ArtifactError::Backend("too many artifact versions".into()))?;
        debug!(session_id, filename, version, "Artifact saved");
        Ok(version)
    }

    async fn load(
        &self,
        session_id: &str,
        filename: &str,
        version: Option<u32>,
    ) -> Result<Option<Artifact>, ArtifactError> {
        let entries = self.entries.lock().await;
        let Some(versions) = entries.get(&(session_id.to_string(), filename.to_string())) else {
            return Ok(None);
        };
        let found = match version {
            Some(v) => versions.get(v as usize),
            None => versions.last(),
        };
        Ok(found.cloned())
    }

    async fn list(&self, session_id: &str) -> Result<Vec<String>, ArtifactError> {
        let entries = self.entries.lock().await;
        let mut names: Vec<String> = entries
            .keys()
            .filter(|(session, _)| session == session_id)
            .map(|(_, name)| name.clone())
            .collect();
        names.sort();
        Ok(names)
    }
}
