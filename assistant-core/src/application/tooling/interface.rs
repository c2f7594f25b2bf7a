use super::error::ToolError;
use crate::session::ToolContext;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

/// A capability the dispatch loop can invoke by name.
///
/// Tools are stateless; anything that must outlive a call goes into
/// [`ToolContext::state`].
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// JSON schema of the `input` object
    fn input_schema(&self) -> Value;

    async fn invoke(&self, input: Value, ctx: &mut ToolContext<'_>) -> Result<Value, ToolError>;

    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: self.name().to_string(),
            description: self.description().to_string(),
            input_schema: self.input_schema(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

/// Fetch a non-blank string field from a tool input object
pub fn required_str<'a>(tool: &str, input: &'a Value, field: &str) -> Result<&'a str, ToolError> {
    optional_str(input, field)
        .ok_or_else(|| ToolError::invalid_input(tool, format!("missing string field '{field}'")))
}

pub fn optional_str<'a>(input: &'a Value, field: &str) -> Option<&'a str> {
    input
        .get(field)
        .and_then(Value::as_str)
        .filter(|value| !value.trim().is_empty())
}
