mod execution;
mod instructions;
mod parser;

pub(super) use execution::ToolExecution;
pub(super) use instructions::user_request;
pub use parser::parse_agent_action;

pub(super) use super::definition::AgentDefinition;
pub(super) use super::directive::AgentDirective;
pub(super) use super::errors::AgentError;
pub(super) use serde_json::{Value, json};
