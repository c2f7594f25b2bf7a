//! Session-scoped state shared by the tools of one conversation.
//!
//! Tools never return intermediate artifacts to each other directly. A
//! producer writes into a [`SessionState`] slot and a later consumer reads the
//! same slot; an empty slot is an ordinary condition the consumer reports as
//! a tool error. Writes are last-write-wins per slot.

use crate::artifacts::ArtifactStore;
use crate::document::{Document, ImageArtifact};
use crate::types::ChatMessage;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

/// Closed set of hand-off slots
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub document: Option<Document>,
    /// Path of a document uploaded outside the conversation, consumed by `load_file`
    pub document_path: Option<PathBuf>,
    pub image_artifact: Option<ImageArtifact>,
}

impl SessionState {
    /// Replace the current document, returning the one it displaced
    pub fn store_document(&mut self, document: Document) -> Option<Document> {
        self.document.replace(document)
    }

    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    pub fn set_document_path(&mut self, path: impl Into<PathBuf>) {
        self.document_path = Some(path.into());
    }

    pub fn record_image(&mut self, artifact: ImageArtifact) {
        self.image_artifact = Some(artifact);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Everything a tool may touch while it runs.
///
/// The exclusive borrow of the state means tool calls within one session are
/// strictly sequential.
pub struct ToolContext<'a> {
    pub session_id: &'a str,
    pub agent: &'a str,
    pub state: &'a mut SessionState,
    pub artifacts: &'a dyn ArtifactStore,
}

impl<'a> ToolContext<'a> {
    pub fn new(
        session_id: &'a str,
        agent: &'a str,
        state: &'a mut SessionState,
        artifacts: &'a dyn ArtifactStore,
    ) -> Self {
        Self {
            session_id,
            agent,
            state,
            artifacts,
        }
    }
}

/// One conversation: hand-off state plus per-agent chat history
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub id: String,
    pub state: SessionState,
    /// Agent that held the conversation at the end of the last run
    pub active_agent: Option<String>,
    history: HashMap<String, Vec<ChatMessage>>,
}

impl Session {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn history(&self, agent: &str) -> &[ChatMessage] {
        self.history.get(agent).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn push_message(&mut self, agent: &str, message: ChatMessage) {
        self.history.entry(agent.to_string()).or_default().push(message);
    }

    pub fn reset(&mut self) {
        self.state.clear();
        self.history.clear();
        self.active_agent = None;
    }
}

/// In-memory registry of sessions.
///
/// Each session sits behind its own mutex; a run holds that lock for its
/// whole duration, so runs on the same session are serialized while
/// different sessions proceed independently.
#[derive(Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<String, Arc<Mutex<Session>>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch an existing session or create it. `None` creates a fresh id.
    pub async fn open(&self, session_id: Option<&str>) -> Arc<Mutex<Session>> {
        let id = session_id
            .map(str::to_string)
            .unwrap_or_else(new_session_id);
        let mut sessions = self.sessions.lock().await;
        sessions
            .entry(id.clone())
            .or_insert_with(|| {
                debug!(session_id = id.as_str(), "Creating session");
                Arc::new(Mutex::new(Session::new(id.clone())))
            })
            .clone()
    }

    pub async fn remove(&self, session_id: &str) -> bool {
        self.sessions.lock().await.remove(session_id).is_some()
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }
}

pub fn new_session_id() -> String {
    Uuid::new_v4().to_string()
}
