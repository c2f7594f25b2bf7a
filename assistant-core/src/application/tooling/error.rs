use crate::artifacts::ArtifactError;
use crate::model::ModelError;
use crate::web::FetchError;
use std::path::PathBuf;
use thiserror::Error;

/// Why a tool could not produce its result.
///
/// The dispatch runtime reports these back to the model as
/// `{"error": <message>}`; they never end the conversation.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("invalid input for tool '{tool}': {reason}")]
    InvalidInput { tool: String, reason: String },
    #[error("No document found in session state.")]
    MissingDocument,
    #[error("unsupported document format '{extension}' for {path:?}")]
    UnsupportedDocument { path: PathBuf, extension: String },
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("file operation on {path:?} failed: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Artifact(#[from] ArtifactError),
    #[error("delegated agent '{agent}' failed: {message}")]
    Delegate { agent: String, message: String },
}

impl ToolError {
    pub fn invalid_input(tool: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            tool: tool.into(),
            reason: reason.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
