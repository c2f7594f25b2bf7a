//! Core library for the AI assistant.
//!
//! A root agent delegates to a search agent (wrapped as a tool), a
//! summarization agent and an image agent. Agents are declared from YAML
//! configuration, talk to Gemini over HTTP, and exchange intermediate
//! results (loaded documents, generated images) through a typed,
//! session-scoped [`SessionState`].

pub mod application;
pub mod config;
pub mod constants;
pub mod domain;
pub mod infrastructure;

pub use application::{agent, assistant, session, tooling, tools};
pub use config::{AgentConfig, AssistantConfig, ConfigError, GeminiSettings};
pub use domain::{document, types};
pub use infrastructure::{artifacts, model, web};

pub use application::assistant::Assistant;
pub use application::session::{SessionState, SessionStore, ToolContext};
