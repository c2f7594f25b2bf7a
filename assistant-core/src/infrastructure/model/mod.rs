//! Model infrastructure module
//!
//! Provides the Gemini client behind provider traits so agents and tools can
//! be exercised against scripted stand-ins.
//!
//! # Structure
//! - `types` - Request, Response, Error types
//! - `traits` - ModelProvider, ImageGenerator traits
//! - `adapter` - Message format adapters
//! - `clients` - HTTP client implementations

pub mod adapter;
pub mod clients;
pub mod traits;
pub mod types;

// Re-exports for convenience
pub use clients::GeminiClient;
pub use traits::{ImageGenerator, ModelProvider};
pub use types::{
    GeneratedImage, GenerationOptions, ImageRequest, ModelError, ModelRequest, ModelResponse,
    SearchSource,
};
