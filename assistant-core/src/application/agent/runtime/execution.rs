use super::{AgentDefinition, AgentError, Value, json};
use crate::session::ToolContext;
use tracing::{debug, info, warn};

pub(in crate::application::agent) struct ToolExecution {
    pub tool: String,
    pub success: bool,
    pub input: Value,
    pub output: Value,
}

impl AgentDefinition {
    /// Run one of this agent's tools. A failing tool yields an
    /// `{"error": ...}` output; only an unknown tool name is fatal.
    pub(in crate::application::agent) async fn execute_tool(
        &self,
        tool_name: &str,
        input: Value,
        ctx: &mut ToolContext<'_>,
    ) -> Result<ToolExecution, AgentError> {
        let Some(tool) = self.tools.get(tool_name) else {
            warn!(agent = %self.name, requested_tool = %tool_name, "Unknown tool requested by agent");
            return Err(AgentError::UnknownTool {
                agent: self.name.clone(),
                tool: tool_name.to_string(),
            });
        };

        let arguments = match input.clone() {
            Value::Null => Value::Object(Default::default()),
            other => other,
        };

        debug!(agent = %self.name, tool = %tool.name(), "Dispatching tool");
        let (success, output) = match tool.invoke(arguments, ctx).await {
            Ok(output) => (true, output),
            Err(err) => {
                warn!(agent = %self.name, tool = %tool.name(), error = %err, "Tool execution failed");
                (false, json!({"error": err.to_string()}))
            }
        };

        let execution = ToolExecution {
            tool: tool.name().to_string(),
            success,
            input,
            output,
        };
        info!(tool = %execution.tool, success = execution.success, "Tool executed");
        Ok(execution)
    }
}
