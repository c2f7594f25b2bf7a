// Shared stand-ins for the external services used by the integration tests.

#![allow(dead_code)]

use assistant_core::artifacts::{ImageDirectory, InMemoryArtifactStore};
use assistant_core::assistant::AssistantBackends;
use assistant_core::model::{
    GeneratedImage, ImageGenerator, ImageRequest, ModelError, ModelProvider, ModelRequest,
    ModelResponse,
};
use assistant_core::web::{FetchError, FetchedPage, PageFetcher};
use assistant_core::{AgentConfig, AssistantConfig};
use assistant_core::config::{ImageAgentConfig, SummarizationAgentConfig};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

pub const SUMMARY_PROMPT: &str = "Summarize the following document as JSON:\n";

/// Replays canned replies in order and records every request
#[derive(Clone, Default)]
pub struct ScriptedProvider {
    replies: Arc<Mutex<VecDeque<String>>>,
    recordings: Arc<Mutex<Vec<ModelRequest>>>,
}

impl ScriptedProvider {
    pub fn new(replies: &[&str]) -> Self {
        Self {
            replies: Arc::new(Mutex::new(replies.iter().map(|r| r.to_string()).collect())),
            recordings: Arc::default(),
        }
    }

    pub fn requests(&self) -> Vec<ModelRequest> {
        self.recordings.lock().unwrap().clone()
    }

    pub fn requests_for(&self, model: &str) -> Vec<ModelRequest> {
        self.requests()
            .into_iter()
            .filter(|request| request.model == model)
            .collect()
    }
}

#[async_trait]
impl ModelProvider for ScriptedProvider {
    async fn chat(&self, request: ModelRequest) -> Result<ModelResponse, ModelError> {
        self.recordings.lock().unwrap().push(request.clone());
        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(text) => Ok(ModelResponse::new(text, request.session_id)),
            None => Err(ModelError::api(
                "scripted",
                StatusCode::INTERNAL_SERVER_ERROR,
                "no scripted reply left",
            )),
        }
    }
}

/// Image generator that either returns one fixed image or rejects the prompt
pub struct FixedImages {
    image: Option<GeneratedImage>,
}

impl FixedImages {
    pub fn png() -> Self {
        Self {
            image: Some(GeneratedImage {
                bytes: b"\x89PNG\r\n\x1a\n".to_vec(),
                mime_type: "image/png".to_string(),
            }),
        }
    }

    pub fn rejecting() -> Self {
        Self { image: None }
    }
}

#[async_trait]
impl ImageGenerator for FixedImages {
    async fn generate_images(
        &self,
        _request: ImageRequest,
    ) -> Result<Vec<GeneratedImage>, ModelError> {
        match &self.image {
            Some(image) => Ok(vec![image.clone()]),
            None => Err(ModelError::api(
                "fixed",
                StatusCode::BAD_REQUEST,
                "prompt was blocked",
            )),
        }
    }
}

pub struct StaticPage {
    pub title: String,
    pub content: String,
}

#[async_trait]
impl PageFetcher for StaticPage {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        if url.contains("missing") {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: StatusCode::NOT_FOUND,
            });
        }
        Ok(FetchedPage {
            url: url.to_string(),
            title: Some(self.title.clone()),
            content: self.content.clone(),
        })
    }
}

pub fn backends(
    provider: &ScriptedProvider,
    images: FixedImages,
    image_dir: &Path,
) -> (AssistantBackends, Arc<InMemoryArtifactStore>) {
    let artifacts = Arc::new(InMemoryArtifactStore::new());
    let backends = AssistantBackends {
        provider: Arc::new(provider.clone()),
        images: Arc::new(images),
        fetcher: Arc::new(StaticPage {
            title: "Rust Blog".to_string(),
            content: "Rust 1.85 stabilizes the 2024 edition.".to_string(),
        }),
        artifacts: artifacts.clone(),
        image_dir: ImageDirectory::new(image_dir),
    };
    (backends, artifacts)
}

fn agent(name: &str) -> AgentConfig {
    AgentConfig {
        name: name.to_string(),
        model: format!("{name}-model"),
        description: format!("Handles {name} requests"),
        instruction: format!("You are {name}."),
    }
}

pub fn assistant_config() -> AssistantConfig {
    AssistantConfig {
        root: agent("root_agent"),
        search: agent("search_agent"),
        summarization: SummarizationAgentConfig {
            agent: agent("summarization_agent"),
            summarization_prompt: SUMMARY_PROMPT.to_string(),
            summarizer_model: "summarizer-model".to_string(),
        },
        image: ImageAgentConfig {
            agent: agent("image_agent"),
            image_model: "imagen-model".to_string(),
            example_prompt: "A lighthouse at dawn, oil painting".to_string(),
            enhancer_model: "enhancer-model".to_string(),
        },
    }
}

pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("Failed to write file");
    path
}
