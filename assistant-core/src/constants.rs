//! Application constants
//!
//! Single source of truth for paths, endpoints and model defaults.

/// Default configuration directory holding one YAML file per agent
pub const CONFIG_DIR: &str = "config";

/// Environment files loaded once at startup, in order
pub const ENV_PATHS: [&str; 2] = ["config/.env", ".env"];

/// Per-agent configuration file names inside [`CONFIG_DIR`]
pub const ROOT_AGENT_FILE: &str = "root.yaml";
pub const SEARCH_AGENT_FILE: &str = "search.yaml";
pub const SUMMARIZATION_AGENT_FILE: &str = "summarization.yaml";
pub const IMAGE_AGENT_FILE: &str = "image.yaml";

/// Default Gemini endpoint and API path
pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_API_PATH: &str = "v1beta/models";

/// Environment variables consulted for the Gemini API key, in order
pub const API_KEY_ENV_VARS: [&str; 2] = ["GOOGLE_API_KEY", "GEMINI_API_KEY"];

/// Models used by tools when the agent config does not name one
pub const DEFAULT_ENHANCER_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_SUMMARIZER_MODEL: &str = "gemini-2.0-flash";

/// Relative directory for generated images
pub const IMAGES_DIR: &str = "images";
