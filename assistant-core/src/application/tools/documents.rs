use crate::document::Document;
use crate::session::ToolContext;
use crate::tooling::{Tool, ToolError, required_str};
use crate::web::PageFetcher;
use async_trait::async_trait;
use serde_json::{Value, json};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Store raw text as the session document
#[derive(Debug, Default)]
pub struct LoadTextTool;

#[async_trait]
impl Tool for LoadTextTool {
    fn name(&self) -> &str {
        "load_text"
    }

    fn description(&self) -> &str {
        "Loads text supplied by the user as the current document so it can be summarized."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {"text": {"type": "string", "description": "The text to load."}},
            "required": ["text"],
        })
    }

    async fn invoke(&self, input: Value, ctx: &mut ToolContext<'_>) -> Result<Value, ToolError> {
        let text = required_str(self.name(), &input, "text")?;
        let document = Document::from_text(text);
        debug!(
            session_id = ctx.session_id,
            chars = document.char_count(),
            "Storing text document"
        );
        ctx.state.store_document(document.clone());
        Ok(json!({"document": document}))
    }
}

/// Fetch a web page and store its text as the session document
pub struct LoadWeblinkTool {
    fetcher: Arc<dyn PageFetcher>,
}

impl LoadWeblinkTool {
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self { fetcher }
    }
}

#[async_trait]
impl Tool for LoadWeblinkTool {
    fn name(&self) -> &str {
        "load_weblink"
    }

    fn description(&self) -> &str {
        "Loads a web page and stores its text content as the current document."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {"url": {"type": "string", "description": "The URL of the web page to load."}},
            "required": ["url"],
        })
    }

    async fn invoke(&self, input: Value, ctx: &mut ToolContext<'_>) -> Result<Value, ToolError> {
        let url = required_str(self.name(), &input, "url")?;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ToolError::invalid_input(
                self.name(),
                format!("'{url}' is not an http(s) URL"),
            ));
        }

        let page = self.fetcher.fetch(url).await?;
        let document = Document::from_web(&page.url, page.title, page.content);
        info!(
            session_id = ctx.session_id,
            url,
            chars = document.char_count(),
            "Stored web page as document"
        );
        ctx.state.store_document(document.clone());
        Ok(json!({"document": document}))
    }
}

/// Load the document the user uploaded, i.e. the file recorded in the
/// `document_path` slot. The model cannot choose which file is read.
#[derive(Debug, Default)]
pub struct LoadFileTool;

const UNSUPPORTED_EXTENSIONS: [&str; 6] = ["pdf", "docx", "doc", "png", "jpg", "jpeg"];

#[async_trait]
impl Tool for LoadFileTool {
    fn name(&self) -> &str {
        "load_file"
    }

    fn description(&self) -> &str {
        "Loads the UTF-8 text file the user uploaded as the current document."
    }

    fn input_schema(&self) -> Value {
        json!({"type": "object", "properties": {}})
    }

    async fn invoke(&self, input: Value, ctx: &mut ToolContext<'_>) -> Result<Value, ToolError> {
        if input.get("path").is_some() {
            warn!(session_id = ctx.session_id, "Rejected load_file call naming a path");
            return Err(ToolError::invalid_input(
                self.name(),
                "paths cannot be chosen; only the uploaded document can be loaded",
            ));
        }
        let path = ctx.state.document_path.clone().ok_or_else(|| {
            ToolError::invalid_input(self.name(), "no document has been uploaded")
        })?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        if UNSUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(ToolError::UnsupportedDocument { path, extension });
        }

        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|source| ToolError::io(&path, source))?;
        let content = String::from_utf8(bytes).map_err(|_| ToolError::UnsupportedDocument {
            path: path.clone(),
            extension: "binary".to_string(),
        })?;

        let document = Document::from_file(&path, content);
        info!(
            session_id = ctx.session_id,
            path = %path.display(),
            chars = document.char_count(),
            "Stored file as document"
        );
        ctx.state.store_document(document.clone());
        Ok(json!({"document": document}))
    }
}
