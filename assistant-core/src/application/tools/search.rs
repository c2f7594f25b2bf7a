use crate::model::{GenerationOptions, ModelProvider, ModelRequest};
use crate::session::ToolContext;
use crate::tooling::{Tool, ToolError, required_str};
use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::info;

/// Answer a query with Gemini's built-in Google Search grounding
pub struct GoogleSearchTool {
    provider: Arc<dyn ModelProvider>,
    model: String,
}

impl GoogleSearchTool {
    pub fn new(provider: Arc<dyn ModelProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }
}

#[async_trait]
impl Tool for GoogleSearchTool {
    fn name(&self) -> &str {
        "google_search"
    }

    fn description(&self) -> &str {
        "Searches the web with Google and returns a grounded answer with its sources."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {"query": {"type": "string", "description": "What to search for."}},
            "required": ["query"],
        })
    }

    async fn invoke(&self, input: Value, ctx: &mut ToolContext<'_>) -> Result<Value, ToolError> {
        let query = required_str(self.name(), &input, "query")?;
        let request = ModelRequest::prompt(self.model.as_str(), query)
            .with_options(GenerationOptions::default().with_google_search());

        let response = self.provider.chat(request).await?;
        info!(
            session_id = ctx.session_id,
            sources = response.sources.len(),
            "Search answered"
        );
        Ok(json!({
            "answer": response.text(),
            "sources": response.sources,
        }))
    }
}
