use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading or validating agent configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file not found at {path:?}")]
    NotFound { path: PathBuf },

    #[error("failed to read config from {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config from {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("missing required field '{field}' in {path:?}")]
    MissingField { path: PathBuf, field: &'static str },
}

impl ConfigError {
    pub fn missing(path: impl Into<PathBuf>, field: &'static str) -> Self {
        Self::MissingField {
            path: path.into(),
            field,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            ConfigError::NotFound { path } => {
                format!("Configuration file {} does not exist.", path.display())
            }
            ConfigError::Io { path, .. } => {
                format!("Could not read configuration file {}.", path.display())
            }
            ConfigError::Parse { path, .. } => {
                format!("Configuration file {} is not valid YAML.", path.display())
            }
            ConfigError::MissingField { path, field } => {
                format!("Add the '{field}' key to {}.", path.display())
            }
        }
    }
}
