use crate::artifacts::{Artifact, ImageDirectory};
use crate::document::ImageArtifact;
use crate::model::{
    GenerationOptions, ImageGenerator, ImageRequest, ModelError, ModelProvider, ModelRequest,
};
use crate::session::ToolContext;
use crate::tooling::{Tool, ToolError, required_str};
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::info;

const ENHANCE_TEMPERATURE: f32 = 0.5;

/// Instruction sent to the text model to expand a short image description
pub fn enhancement_prompt(description: &str, example: &str) -> String {
    format!(
        "You are a creative image generation assistant that enhances text prompts.\n\
         Enhance the following text prompt to make it more descriptive and suitable for image generation:\n\
         \"{description}\"\n\n\
         Examples:\n\
         - {example}\n\n\
         Return the enhanced prompt only as a single string."
    )
}

pub struct EnhancePromptTool {
    provider: Arc<dyn ModelProvider>,
    model: String,
    example: String,
}

impl EnhancePromptTool {
    pub fn new(
        provider: Arc<dyn ModelProvider>,
        model: impl Into<String>,
        example: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            model: model.into(),
            example: example.into(),
        }
    }
}

#[async_trait]
impl Tool for EnhancePromptTool {
    fn name(&self) -> &str {
        "enhance_prompt"
    }

    fn description(&self) -> &str {
        "Rewrites a short image description into a detailed image generation prompt."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {"desc": {"type": "string", "description": "The user's description of the image."}},
            "required": ["desc"],
        })
    }

    async fn invoke(&self, input: Value, ctx: &mut ToolContext<'_>) -> Result<Value, ToolError> {
        let desc = required_str(self.name(), &input, "desc")?;
        let request =
            ModelRequest::prompt(self.model.as_str(), enhancement_prompt(desc, &self.example))
                .with_options(GenerationOptions::default().with_temperature(ENHANCE_TEMPERATURE));

        let response = self.provider.chat(request).await?;
        info!(session_id = ctx.session_id, "Prompt enhanced");
        Ok(json!({
            "user_description": desc,
            "enhanced_prompt": response.text().trim(),
        }))
    }
}

/// Generate one image, keep a local copy, register it as an artifact and
/// record it in the `image_artifact` slot.
pub struct GenerateImageTool {
    generator: Arc<dyn ImageGenerator>,
    model: String,
    images: ImageDirectory,
}

impl GenerateImageTool {
    pub fn new(
        generator: Arc<dyn ImageGenerator>,
        model: impl Into<String>,
        images: ImageDirectory,
    ) -> Self {
        Self {
            generator,
            model: model.into(),
            images,
        }
    }
}

#[async_trait]
impl Tool for GenerateImageTool {
    fn name(&self) -> &str {
        "generate_image"
    }

    fn description(&self) -> &str {
        "Generates an image from a text prompt and saves it as an artifact."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {"prompt": {"type": "string", "description": "The text description of the image."}},
            "required": ["prompt"],
        })
    }

    async fn invoke(&self, input: Value, ctx: &mut ToolContext<'_>) -> Result<Value, ToolError> {
        let prompt = required_str(self.name(), &input, "prompt")?;

        // Nothing touches the filesystem until the provider has answered.
        let image = self
            .generator
            .generate_images(ImageRequest::single(self.model.as_str(), prompt))
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| ModelError::empty("image generator", "images"))?;

        let saved = self
            .images
            .save(&image.bytes, &image.mime_type)
            .await
            .map_err(|source| ToolError::io(self.images.root(), source))?;

        let artifact_version = ctx
            .artifacts
            .save(
                ctx.session_id,
                &saved.filename,
                Artifact::new(image.mime_type.as_str(), image.bytes.clone()),
            )
            .await?;

        ctx.state.record_image(ImageArtifact {
            filename: saved.filename.clone(),
            artifact_version,
            mime_type: image.mime_type.clone(),
            image_bytes: STANDARD.encode(&image.bytes),
        });

        let local_path = saved.path.display().to_string();
        info!(
            session_id = ctx.session_id,
            filename = saved.filename.as_str(),
            artifact_version,
            "Image artifact recorded"
        );
        Ok(json!({
            "filename": saved.filename,
            "artifact_version": artifact_version,
            "confirmation": format!(
                "Image artifact {} saved. Image saved on local at {local_path}",
                saved.filename
            ),
        }))
    }
}
