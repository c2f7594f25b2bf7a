//! # Agent Module
//!
//! Declarative agent records plus the dispatch loop that drives them.
//!
//! ## Key Types
//!
//! - [`AgentDefinition`] - name, model, instruction, tools and sub-agents
//! - [`AgentRunner`] - runs an agent tree against a model provider
//! - [`AgentOptions`] - per-run options (session, step budget)
//! - [`AgentOutcome`] - result of a run
//! - [`AgentError`] - errors that end a run
//!
//! ## Agent Loop
//!
//! 1. Send the active agent's instruction, history and the next prompt
//! 2. Parse the JSON directive (with retry on parse failure)
//! 3. `call_tool`: run the tool against the session state and feed back the result
//! 4. `transfer`: hand the conversation to a sub-agent or an ancestor
//! 5. `final`: return the answer to the user

mod definition;
mod directive;
mod errors;
mod models;
mod runner;
mod runtime;


pub use definition::AgentDefinition;
pub use directive::AgentDirective;
pub use errors::AgentError;
pub use models::{AgentOptions, AgentOutcome, AgentStep, StepKind};
pub use runner::AgentRunner;
pub use runtime::parse_agent_action;
