pub mod agent;
pub mod error;
pub mod loader;
pub mod provider;

pub use agent::{AgentConfig, AssistantConfig, ImageAgentConfig, SummarizationAgentConfig};
pub use error::ConfigError;
pub use loader::ensure_env_loaded;
pub use provider::GeminiSettings;
