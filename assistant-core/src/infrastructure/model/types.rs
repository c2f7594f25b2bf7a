//! Model types - Request, Response, and Error types

use crate::types::ChatMessage;
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Sampling and output controls for one request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationOptions {
    pub temperature: Option<f32>,
    pub response_mime_type: Option<String>,
    /// Ground the answer with the provider's built-in Google Search tool
    pub google_search: bool,
}

impl GenerationOptions {
    pub fn json() -> Self {
        Self {
            response_mime_type: Some("application/json".to_string()),
            ..Self::default()
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_google_search(mut self) -> Self {
        self.google_search = true;
        self
    }
}

/// Model request for LLM chat
#[derive(Debug, Clone)]
pub struct ModelRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub options: GenerationOptions,
    pub session_id: Option<String>,
}

impl ModelRequest {
    /// Single user turn with default options
    pub fn prompt(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: vec![ChatMessage::user(prompt)],
            options: GenerationOptions::default(),
            session_id: None,
        }
    }

    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }
}

/// Web page cited by a search-grounded answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchSource {
    pub title: Option<String>,
    pub uri: String,
}

/// Model response from LLM
#[derive(Debug, Clone)]
pub struct ModelResponse {
    pub message: ChatMessage,
    pub session_id: Option<String>,
    pub sources: Vec<SearchSource>,
    /// Undecoded provider payload
    pub raw: Value,
}

impl ModelResponse {
    pub fn new(content: String, session_id: Option<String>) -> Self {
        Self {
            message: ChatMessage::assistant(content),
            session_id,
            sources: Vec::new(),
            raw: Value::Null,
        }
    }

    pub fn text(&self) -> &str {
        &self.message.content
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    pub model: String,
    pub prompt: String,
    pub number_of_images: u32,
}

impl ImageRequest {
    pub fn single(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            number_of_images: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

/// Model errors
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("provider '{provider}' requires an API key")]
    MissingApiKey { provider: String },
    #[error("network error calling provider '{provider}': {source}")]
    Network {
        provider: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("provider '{provider}' rejected the request ({status}): {message}")]
    Api {
        provider: String,
        status: StatusCode,
        message: String,
    },
    #[error("provider '{provider}' returned invalid response: {reason}")]
    InvalidResponse { provider: String, reason: String },
    #[error("provider '{provider}' returned no {what}")]
    EmptyResult {
        provider: String,
        what: &'static str,
    },
}

impl ModelError {
    pub fn missing_api_key(provider: impl Into<String>) -> Self {
        Self::MissingApiKey {
            provider: provider.into(),
        }
    }

    pub fn network(provider: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            provider: provider.into(),
            source,
        }
    }

    pub fn api(provider: impl Into<String>, status: StatusCode, message: impl Into<String>) -> Self {
        Self::Api {
            provider: provider.into(),
            status,
            message: message.into(),
        }
    }

    pub fn invalid_response(provider: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidResponse {
            provider: provider.into(),
            reason: reason.into(),
        }
    }

    pub fn empty(provider: impl Into<String>, what: &'static str) -> Self {
        Self::EmptyResult {
            provider: provider.into(),
            what,
        }
    }

    /// Short message suitable for showing to the person at the terminal
    pub fn user_message(&self) -> String {
        match self {
            ModelError::MissingApiKey { provider } => {
                format!("Provider '{provider}' needs an API key. Set GOOGLE_API_KEY.")
            }
            ModelError::Network { provider, source } => {
                if source.is_connect() {
                    format!("Could not connect to model provider '{provider}'.")
                } else if source.is_timeout() {
                    format!("Request to '{provider}' timed out.")
                } else {
                    format!("Network error talking to '{provider}'.")
                }
            }
            ModelError::Api {
                provider, status, ..
            } => match *status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    format!("Provider '{provider}' rejected the API key.")
                }
                StatusCode::TOO_MANY_REQUESTS => {
                    format!("Provider '{provider}' is rate limiting requests.")
                }
                StatusCode::SERVICE_UNAVAILABLE | StatusCode::BAD_GATEWAY => {
                    format!("Provider '{provider}' is currently unavailable.")
                }
                _ => format!("Request to '{provider}' failed: {}", status.as_u16()),
            },
            ModelError::InvalidResponse { provider, .. } => {
                format!("Response from '{provider}' could not be understood.")
            }
            ModelError::EmptyResult { provider, what } => {
                format!("Provider '{provider}' returned no {what}.")
            }
        }
    }
}
