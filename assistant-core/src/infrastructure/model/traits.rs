//! Model traits

use super::types::{GeneratedImage, ImageRequest, ModelError, ModelRequest, ModelResponse};
use async_trait::async_trait;

/// Trait for text generation backends
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Send a chat request to the model provider
    async fn chat(&self, request: ModelRequest) -> Result<ModelResponse, ModelError>;
}

/// Trait for image generation backends
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Generate `request.number_of_images` images for a prompt
    async fn generate_images(&self, request: ImageRequest)
    -> Result<Vec<GeneratedImage>, ModelError>;
}
