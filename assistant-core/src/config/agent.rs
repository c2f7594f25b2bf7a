use super::error::ConfigError;
use super::loader::{parse_yaml, read_yaml};
use crate::constants::{
    DEFAULT_ENHANCER_MODEL, DEFAULT_SUMMARIZER_MODEL, IMAGE_AGENT_FILE, ROOT_AGENT_FILE,
    SEARCH_AGENT_FILE, SUMMARIZATION_AGENT_FILE,
};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// Raw per-agent YAML document. Every key is optional here; validation
/// happens in the typed constructors below.
#[derive(Debug, Deserialize, Default)]
pub(super) struct RawAgentConfig {
    pub name: Option<String>,
    pub model: Option<String>,
    #[serde(alias = "descriptions")]
    pub description: Option<String>,
    #[serde(alias = "instructions")]
    pub instruction: Option<String>,
    pub example_prompt: Option<String>,
    pub image_model: Option<String>,
    pub enhancer_model: Option<String>,
    pub summarization_prompt: Option<String>,
    pub summarizer_model: Option<String>,
}

/// Fields shared by every agent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentConfig {
    pub name: String,
    pub model: String,
    pub description: String,
    pub instruction: String,
}

impl AgentConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw: RawAgentConfig = read_yaml(path)?;
        Self::from_raw(path, &raw)
    }

    pub fn from_yaml_str(path: &Path, content: &str) -> Result<Self, ConfigError> {
        let raw: RawAgentConfig = parse_yaml(path, content)?;
        Self::from_raw(path, &raw)
    }

    fn from_raw(path: &Path, raw: &RawAgentConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            name: required(path, "name", &raw.name)?,
            model: required(path, "model", &raw.model)?,
            description: required(path, "description", &raw.description)?,
            instruction: required(path, "instruction", &raw.instruction)?,
        })
    }
}

/// Image agent: adds the Imagen model and the example used by prompt enhancement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAgentConfig {
    pub agent: AgentConfig,
    pub image_model: String,
    pub example_prompt: String,
    pub enhancer_model: String,
}

impl ImageAgentConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw: RawAgentConfig = read_yaml(path)?;
        Self::from_raw(path, raw)
    }

    pub fn from_yaml_str(path: &Path, content: &str) -> Result<Self, ConfigError> {
        let raw: RawAgentConfig = parse_yaml(path, content)?;
        Self::from_raw(path, raw)
    }

    fn from_raw(path: &Path, raw: RawAgentConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            agent: AgentConfig::from_raw(path, &raw)?,
            image_model: required(path, "image_model", &raw.image_model)?,
            example_prompt: required(path, "example_prompt", &raw.example_prompt)?,
            enhancer_model: optional(raw.enhancer_model)
                .unwrap_or_else(|| DEFAULT_ENHANCER_MODEL.to_string()),
        })
    }
}

/// Summarization agent: adds the instruction prepended to every document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummarizationAgentConfig {
    pub agent: AgentConfig,
    pub summarization_prompt: String,
    pub summarizer_model: String,
}

impl SummarizationAgentConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw: RawAgentConfig = read_yaml(path)?;
        Self::from_raw(path, raw)
    }

    pub fn from_yaml_str(path: &Path, content: &str) -> Result<Self, ConfigError> {
        let raw: RawAgentConfig = parse_yaml(path, content)?;
        Self::from_raw(path, raw)
    }

    fn from_raw(path: &Path, raw: RawAgentConfig) -> Result<Self, ConfigError> {
        // The prompt is concatenated verbatim with the document, so keep its
        // trailing whitespace.
        let summarization_prompt = match raw.summarization_prompt.as_deref() {
            Some(value) if !value.trim().is_empty() => value.to_string(),
            _ => return Err(ConfigError::missing(path, "summarization_prompt")),
        };
        Ok(Self {
            agent: AgentConfig::from_raw(path, &raw)?,
            summarization_prompt,
            summarizer_model: optional(raw.summarizer_model)
                .unwrap_or_else(|| DEFAULT_SUMMARIZER_MODEL.to_string()),
        })
    }
}

/// Configuration of the whole agent tree, one YAML file per agent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantConfig {
    pub root: AgentConfig,
    pub search: AgentConfig,
    pub summarization: SummarizationAgentConfig,
    pub image: ImageAgentConfig,
}

impl AssistantConfig {
    /// Load every agent file from `dir`. The first invalid file aborts the load.
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        super::loader::ensure_env_loaded();
        let config = Self {
            root: AgentConfig::load(&dir.join(ROOT_AGENT_FILE))?,
            search: AgentConfig::load(&dir.join(SEARCH_AGENT_FILE))?,
            summarization: SummarizationAgentConfig::load(&dir.join(SUMMARIZATION_AGENT_FILE))?,
            image: ImageAgentConfig::load(&dir.join(IMAGE_AGENT_FILE))?,
        };
        info!(
            dir = %dir.display(),
            root = config.root.name.as_str(),
            "Loaded agent configuration"
        );
        Ok(config)
    }
}

fn required(
    path: &Path,
    field: &'static str,
    value: &Option<String>,
) -> Result<String, ConfigError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ConfigError::missing(path, field))
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
