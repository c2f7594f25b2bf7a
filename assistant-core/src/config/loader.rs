use super::error::ConfigError;
use crate::constants::ENV_PATHS;
use dotenvy::from_filename;
use serde::de::DeserializeOwned;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::Once;
use tracing::debug;

static ENV_LOADER: Once = Once::new();

/// Ensures environment variables are loaded from the `.env` files
pub fn ensure_env_loaded() {
    ENV_LOADER.call_once(|| {
        for path in ENV_PATHS {
            if from_filename(path).is_ok() {
                debug!(path, "Loaded environment file");
            }
        }
    });
}

/// Read a YAML file into `T`, mapping I/O and syntax failures onto [`ConfigError`]
pub(super) fn read_yaml<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    debug!(path = %path.display(), "Reading agent configuration file");

    let content = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            ConfigError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    parse_yaml(path, &content)
}

pub(super) fn parse_yaml<T: DeserializeOwned>(path: &Path, content: &str) -> Result<T, ConfigError> {
    serde_yaml::from_str(content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
