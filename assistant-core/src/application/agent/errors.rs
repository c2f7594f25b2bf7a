use crate::model::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error("agent '{agent}' requested unknown tool '{tool}'")]
    UnknownTool { agent: String, tool: String },
    #[error("agent '{from}' cannot transfer to '{target}'")]
    UnknownAgent { from: String, target: String },
    #[error("invalid agent response: {0}")]
    InvalidResponse(String),
    #[error("agent exceeded the maximum of {0} tool interactions")]
    StepLimit(usize),
}

impl AgentError {
    pub fn user_message(&self) -> String {
        match self {
            AgentError::Model(err) => err.user_message(),
            AgentError::UnknownTool { tool, .. } => {
                format!("The assistant tried to use a tool that does not exist: \"{tool}\".")
            }
            AgentError::UnknownAgent { target, .. } => {
                format!("The assistant tried to hand over to an unknown agent: \"{target}\".")
            }
            AgentError::InvalidResponse(_) => {
                "The assistant returned a response that could not be understood. Please try again."
                    .to_string()
            }
            AgentError::StepLimit(_) => {
                "The assistant needed too many steps for this request. Try splitting it up."
                    .to_string()
            }
        }
    }
}
