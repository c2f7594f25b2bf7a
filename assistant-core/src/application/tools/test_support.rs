//! Scripted stand-ins for the external services, shared by unit tests.

use crate::artifacts::InMemoryArtifactStore;
use crate::model::{
    GeneratedImage, ImageGenerator, ImageRequest, ModelError, ModelProvider, ModelRequest,
    ModelResponse,
};
use crate::session::{SessionState, ToolContext};
use crate::web::{FetchError, FetchedPage, PageFetcher};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::Mutex;

pub(crate) struct Harness {
    pub state: SessionState,
    pub artifacts: InMemoryArtifactStore,
}

impl Harness {
    pub fn new() -> Self {
        Self {
            state: SessionState::default(),
            artifacts: InMemoryArtifactStore::new(),
        }
    }

    pub fn ctx(&mut self) -> ToolContext<'_> {
        ToolContext::new("test-session", "test-agent", &mut self.state, &self.artifacts)
    }
}

/// Replays canned replies in order and records every request.
/// A reply of `None` is answered with a provider error.
#[derive(Clone, Default)]
pub(crate) struct ScriptedProvider {
    replies: Arc<Mutex<VecDeque<Option<String>>>>,
    recordings: Arc<Mutex<Vec<ModelRequest>>>,
}

impl ScriptedProvider {
    pub fn new(replies: Vec<&str>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(
                replies.into_iter().map(|r| Some(r.to_string())).collect(),
            )),
            recordings: Arc::default(),
        }
    }

    pub fn failing() -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::from([None]))),
            recordings: Arc::default(),
        }
    }

    pub async fn requests(&self) -> Vec<ModelRequest> {
        self.recordings.lock().await.clone()
    }
}

#[async_trait]
impl ModelProvider for ScriptedProvider {
    async fn chat(&self, request: ModelRequest) -> Result<ModelResponse, ModelError> {
        self.recordings.lock().await.push(request.clone());
        match self.replies.lock().await.pop_front().flatten() {
            Some(text) => Ok(ModelResponse::new(text, request.session_id)),
            None => Err(ModelError::api(
                "scripted",
                StatusCode::INTERNAL_SERVER_ERROR,
                "scripted failure",
            )),
        }
    }
}

pub(crate) struct StubImageGenerator {
    image: Option<GeneratedImage>,
    pub requests: Mutex<Vec<ImageRequest>>,
}

impl StubImageGenerator {
    pub fn returning(bytes: &[u8], mime_type: &str) -> Self {
        Self {
            image: Some(GeneratedImage {
                bytes: bytes.to_vec(),
                mime_type: mime_type.to_string(),
            }),
            requests: Mutex::default(),
        }
    }

    pub fn failing() -> Self {
        Self {
            image: None,
            requests: Mutex::default(),
        }
    }
}

#[async_trait]
impl ImageGenerator for StubImageGenerator {
    async fn generate_images(
        &self,
        request: ImageRequest,
    ) -> Result<Vec<GeneratedImage>, ModelError> {
        self.requests.lock().await.push(request);
        match &self.image {
            Some(image) => Ok(vec![image.clone()]),
            None => Err(ModelError::api(
                "stub",
                StatusCode::BAD_REQUEST,
                "prompt rejected",
            )),
        }
    }
}

pub(crate) struct StaticFetcher {
    page: Option<(String, String)>,
}

impl StaticFetcher {
    pub fn ok(title: &str, content: &str) -> Self {
        Self {
            page: Some((title.to_string(), content.to_string())),
        }
    }

    pub fn not_found() -> Self {
        Self { page: None }
    }
}

#[async_trait]
impl PageFetcher for StaticFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        match &self.page {
            Some((title, content)) => Ok(FetchedPage {
                url: url.to_string(),
                title: Some(title.clone()),
                content: content.clone(),
            }),
            None => Err(FetchError::Status {
                url: url.to_string(),
                status: StatusCode::NOT_FOUND,
            }),
        }
    }
}
