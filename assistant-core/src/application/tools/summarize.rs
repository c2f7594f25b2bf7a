use crate::model::{GenerationOptions, ModelProvider, ModelRequest};
use crate::session::ToolContext;
use crate::tooling::{Tool, ToolError};
use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{error, info};

/// Summarize the session document with a configured instruction.
///
/// The request text is the instruction immediately followed by the document
/// content; the model is asked for JSON at temperature 0.
pub struct SummarizeDocumentTool {
    provider: Arc<dyn ModelProvider>,
    model: String,
    prompt: String,
}

impl SummarizeDocumentTool {
    pub fn new(
        provider: Arc<dyn ModelProvider>,
        model: impl Into<String>,
        prompt: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            model: model.into(),
            prompt: prompt.into(),
        }
    }
}

#[async_trait]
impl Tool for SummarizeDocumentTool {
    fn name(&self) -> &str {
        "summarize_document"
    }

    fn description(&self) -> &str {
        "Summarizes the document previously loaded with load_text, load_weblink or load_file."
    }

    fn input_schema(&self) -> Value {
        json!({"type": "object", "properties": {}})
    }

    async fn invoke(&self, _input: Value, ctx: &mut ToolContext<'_>) -> Result<Value, ToolError> {
        let document = ctx
            .state
            .document()
            .filter(|document| !document.content.trim().is_empty());
        let Some(document) = document else {
            error!(session_id = ctx.session_id, "No document found in session state");
            return Err(ToolError::MissingDocument);
        };

        let request = ModelRequest::prompt(
            self.model.as_str(),
            format!("{}{}", self.prompt, document.content),
        )
        .with_options(GenerationOptions::json().with_temperature(0.0));
        let source = document.source().map(str::to_string);

        info!(
            session_id = ctx.session_id,
            model = self.model.as_str(),
            chars = document.char_count(),
            "Summarizing document"
        );
        let response = self.provider.chat(request).await?;
        let text = response.text().trim();
        let summary = serde_json::from_str::<Value>(text)
            .unwrap_or_else(|_| Value::String(text.to_string()));

        Ok(json!({
            "summary": summary,
            "model": self.model,
            "source": source,
        }))
    }
}
