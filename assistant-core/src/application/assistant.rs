//! Composition of the full agent tree.
//!
//! ```text
//! root_agent
//! ├── tool: search_agent (AgentTool) ── google_search
//! ├── sub-agent: summarization_agent ── load_text, load_weblink, load_file, summarize_document
//! └── sub-agent: image_agent ────────── enhance_prompt, generate_image
//! ```

use crate::agent::{AgentDefinition, AgentError, AgentOptions, AgentOutcome, AgentRunner};
use crate::artifacts::{ArtifactStore, ImageDirectory, InMemoryArtifactStore};
use crate::config::{AssistantConfig, GeminiSettings};
use crate::model::{GeminiClient, ImageGenerator, ModelProvider};
use crate::session::SessionStore;
use crate::tools::{
    AgentTool, EnhancePromptTool, GenerateImageTool, GoogleSearchTool, LoadFileTool, LoadTextTool,
    LoadWeblinkTool, SummarizeDocumentTool,
};
use crate::web::{HttpPageFetcher, PageFetcher};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// External services the agents and tools talk to
#[derive(Clone)]
pub struct AssistantBackends {
    pub provider: Arc<dyn ModelProvider>,
    pub images: Arc<dyn ImageGenerator>,
    pub fetcher: Arc<dyn PageFetcher>,
    pub artifacts: Arc<dyn ArtifactStore>,
    pub image_dir: ImageDirectory,
}

impl AssistantBackends {
    /// Gemini for text and images, plain HTTP for web pages, artifacts kept
    /// in memory.
    pub fn gemini(settings: &GeminiSettings, image_dir: impl Into<PathBuf>) -> Self {
        let client = Arc::new(GeminiClient::from_settings(settings));
        Self {
            provider: client.clone(),
            images: client,
            fetcher: Arc::new(HttpPageFetcher::new()),
            artifacts: Arc::new(InMemoryArtifactStore::new()),
            image_dir: ImageDirectory::new(image_dir),
        }
    }
}

pub struct Assistant {
    root: Arc<AgentDefinition>,
    runner: AgentRunner,
}

impl Assistant {
    pub fn build(config: &AssistantConfig, backends: AssistantBackends) -> Self {
        let AssistantBackends {
            provider,
            images,
            fetcher,
            artifacts,
            image_dir,
        } = backends;

        let search = Arc::new(
            AgentDefinition::from_config(&config.search).with_tool(Arc::new(
                GoogleSearchTool::new(provider.clone(), config.search.model.as_str()),
            )),
        );

        let summarization = &config.summarization;
        let summarization_agent = Arc::new(
            AgentDefinition::from_config(&summarization.agent)
                .with_tool(Arc::new(LoadTextTool))
                .with_tool(Arc::new(LoadWeblinkTool::new(fetcher)))
                .with_tool(Arc::new(LoadFileTool))
                .with_tool(Arc::new(SummarizeDocumentTool::new(
                    provider.clone(),
                    summarization.summarizer_model.as_str(),
                    summarization.summarization_prompt.as_str(),
                ))),
        );

        let image = &config.image;
        let image_agent = Arc::new(
            AgentDefinition::from_config(&image.agent)
                .with_tool(Arc::new(EnhancePromptTool::new(
                    provider.clone(),
                    image.enhancer_model.as_str(),
                    image.example_prompt.as_str(),
                )))
                .with_tool(Arc::new(GenerateImageTool::new(
                    images,
                    image.image_model.as_str(),
                    image_dir,
                ))),
        );

        let root = Arc::new(
            AgentDefinition::from_config(&config.root)
                .with_tool(Arc::new(AgentTool::new(
                    search,
                    provider.clone(),
                    artifacts.clone(),
                )))
                .with_sub_agent(summarization_agent)
                .with_sub_agent(image_agent),
        );
        info!(
            root = root.name.as_str(),
            tools = ?root.tools.names(),
            sub_agents = root.sub_agents.len(),
            "Assistant agent tree built"
        );

        Self {
            root,
            runner: AgentRunner::new(provider, artifacts),
        }
    }

    pub fn from_gemini(
        config: &AssistantConfig,
        settings: &GeminiSettings,
        image_dir: impl Into<PathBuf>,
    ) -> Self {
        Self::build(config, AssistantBackends::gemini(settings, image_dir))
    }

    pub fn root(&self) -> &Arc<AgentDefinition> {
        &self.root
    }

    pub fn sessions(&self) -> &Arc<SessionStore> {
        self.runner.sessions()
    }

    pub async fn run(
        &self,
        prompt: impl Into<String>,
        options: AgentOptions,
    ) -> Result<AgentOutcome, AgentError> {
        self.runner.run(&self.root, prompt.into(), options).await
    }

    /// Record `path` as the session's uploaded document for `load_file`.
    /// A later upload replaces the earlier one.
    pub async fn attach_document(&self, session_id: &str, path: impl Into<PathBuf>) {
        let path = path.into();
        let session = self.sessions().open(Some(session_id)).await;
        info!(session_id, path = %path.display(), "Document attached to session");
        session.lock().await.state.set_document_path(path);
    }

    /// Drop a session's state, history and active agent
    pub async fn reset_session(&self, session_id: &str) -> bool {
        self.sessions().remove(session_id).await
    }
}
