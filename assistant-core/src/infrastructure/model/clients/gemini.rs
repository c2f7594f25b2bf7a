//! Gemini client implementation

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, info};

use super::base::HttpClientBase;
use crate::config::GeminiSettings;
use crate::infrastructure::model::adapter::MessageAdapter;
use crate::infrastructure::model::traits::{ImageGenerator, ModelProvider};
use crate::infrastructure::model::types::{
    GeneratedImage, GenerationOptions, ImageRequest, ModelError, ModelRequest, ModelResponse,
    SearchSource,
};

const PROVIDER_ID: &str = "gemini";

/// Gemini client for Google AI (text, grounded search and Imagen)
#[derive(Clone)]
pub struct GeminiClient {
    base: HttpClientBase,
    api_path: String,
}

impl GeminiClient {
    pub fn from_settings(settings: &GeminiSettings) -> Self {
        Self {
            base: HttpClientBase::new(
                PROVIDER_ID.to_string(),
                settings.endpoint.clone(),
                settings.api_key.clone(),
            ),
            api_path: settings.api_path.trim_matches('/').to_string(),
        }
    }

    fn build_model_url(&self, model: &str, method: &str) -> String {
        self.base
            .build_url(&format!("{}/{model}:{method}", self.api_path))
    }

    fn build_payload(request: &ModelRequest) -> Value {
        let (system_text, contents) = MessageAdapter::to_gemini_format(&request.messages);

        let mut payload = json!({ "contents": contents });
        if let Some(system) = system_text {
            payload["system_instruction"] = json!({
                "parts": [{"text": system}]
            });
        }

        let generation_config = generation_config(&request.options);
        if !generation_config.is_empty() {
            payload["generationConfig"] = Value::Object(generation_config);
        }
        if request.options.google_search {
            payload["tools"] = json!([{"google_search": {}}]);
        }
        payload
    }
}

fn generation_config(options: &GenerationOptions) -> serde_json::Map<String, Value> {
    let mut config = serde_json::Map::new();
    if let Some(temperature) = options.temperature {
        config.insert("temperature".into(), json!(temperature));
    }
    if let Some(mime) = &options.response_mime_type {
        config.insert("responseMimeType".into(), json!(mime));
    }
    config
}

#[async_trait]
impl ModelProvider for GeminiClient {
    async fn chat(&self, request: ModelRequest) -> Result<ModelResponse, ModelError> {
        let url = self.build_model_url(&request.model, "generateContent");
        let payload = Self::build_payload(&request);

        info!(
            provider = self.base.id.as_str(),
            model = request.model.as_str(),
            messages = request.messages.len(),
            grounded = request.options.google_search,
            "Sending request to Gemini"
        );

        let raw: Value = self.base.post_with_query_key(&url, &payload).await?;
        debug!("Received response from Gemini");

        let response: GeminiResponse = serde_json::from_value(raw.clone())
            .map_err(|e| ModelError::invalid_response(&self.base.id, e.to_string()))?;
        let candidate = response
            .candidates
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or_else(|| ModelError::empty(&self.base.id, "candidates"))?;

        let text = candidate
            .content
            .map(|c| {
                c.parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .filter(|text| !text.is_empty())
            .ok_or_else(|| ModelError::invalid_response(&self.base.id, "missing text"))?;

        let sources = candidate
            .grounding_metadata
            .map(|meta| {
                meta.grounding_chunks
                    .into_iter()
                    .filter_map(|chunk| chunk.web)
                    .filter_map(|web| {
                        web.uri.map(|uri| SearchSource {
                            title: web.title,
                            uri,
                        })
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(ModelResponse {
            sources,
            raw,
            ..ModelResponse::new(text, request.session_id)
        })
    }
}

#[async_trait]
impl ImageGenerator for GeminiClient {
    async fn generate_images(
        &self,
        request: ImageRequest,
    ) -> Result<Vec<GeneratedImage>, ModelError> {
        let url = self.build_model_url(&request.model, "predict");
        let payload = json!({
            "instances": [{"prompt": request.prompt}],
            "parameters": {"sampleCount": request.number_of_images},
        });

        info!(
            provider = self.base.id.as_str(),
            model = request.model.as_str(),
            count = request.number_of_images,
            "Requesting image generation"
        );

        let response: PredictResponse = self.base.post_with_query_key(&url, &payload).await?;
        let images = response
            .predictions
            .into_iter()
            .filter_map(|p| p.bytes_base64_encoded.map(|b| (b, p.mime_type)))
            .map(|(encoded, mime)| {
                STANDARD
                    .decode(encoded.as_bytes())
                    .map(|bytes| GeneratedImage {
                        bytes,
                        mime_type: mime.unwrap_or_else(|| "image/png".to_string()),
                    })
                    .map_err(|e| ModelError::invalid_response(&self.base.id, e.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        if images.is_empty() {
            return Err(ModelError::empty(&self.base.id, "images"));
        }
        debug!(count = images.len(), "Received generated images");
        Ok(images)
    }
}

#[derive(Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<GeminiCandidate>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiContent>,
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Deserialize)]
struct GeminiPart {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Deserialize)]
struct GroundingChunk {
    web: Option<WebChunk>,
}

#[derive(Deserialize)]
struct WebChunk {
    uri: Option<String>,
    title: Option<String>,
}

#[derive(Deserialize)]
struct PredictResponse {
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Prediction {
    bytes_base64_encoded: Option<String>,
    mime_type: Option<String>,
}
