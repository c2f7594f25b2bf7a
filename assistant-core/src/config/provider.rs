use crate::constants::{API_KEY_ENV_VARS, DEFAULT_GEMINI_API_PATH, DEFAULT_GEMINI_ENDPOINT};
use std::env;
use tracing::warn;

/// Connection settings for the Gemini API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeminiSettings {
    pub endpoint: String,
    pub api_path: String,
    pub api_key: Option<String>,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_GEMINI_ENDPOINT.to_string(),
            api_path: DEFAULT_GEMINI_API_PATH.to_string(),
            api_key: None,
        }
    }
}

impl GeminiSettings {
    /// Build settings from the process environment.
    ///
    /// The key is taken from the first non-empty variable in
    /// [`API_KEY_ENV_VARS`]; `GEMINI_ENDPOINT` and `GEMINI_API_PATH`
    /// override the defaults.
    pub fn from_env() -> Self {
        let api_key = API_KEY_ENV_VARS
            .iter()
            .filter_map(|name| env::var(name).ok())
            .map(|value| value.trim().to_string())
            .find(|value| !value.is_empty());
        if api_key.is_none() {
            warn!(
                vars = ?API_KEY_ENV_VARS,
                "Gemini API key environment variable is not set"
            );
        }

        Self {
            endpoint: non_empty_var("GEMINI_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_GEMINI_ENDPOINT.to_string()),
            api_path: non_empty_var("GEMINI_API_PATH")
                .unwrap_or_else(|| DEFAULT_GEMINI_API_PATH.to_string()),
            api_key,
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
