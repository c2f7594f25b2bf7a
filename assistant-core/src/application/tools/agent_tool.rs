use crate::agent::{AgentDefinition, AgentOptions, AgentRunner};
use crate::artifacts::ArtifactStore;
use crate::model::ModelProvider;
use crate::session::ToolContext;
use crate::tooling::{Tool, ToolError, required_str};
use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::info;

/// Exposes a whole agent as a single tool.
///
/// Each call runs the wrapped agent in a fresh, isolated session and returns
/// its final answer; the caller's session state is not shared.
pub struct AgentTool {
    agent: Arc<AgentDefinition>,
    provider: Arc<dyn ModelProvider>,
    artifacts: Arc<dyn ArtifactStore>,
}

impl AgentTool {
    pub fn new(
        agent: Arc<AgentDefinition>,
        provider: Arc<dyn ModelProvider>,
        artifacts: Arc<dyn ArtifactStore>,
    ) -> Self {
        Self {
            agent,
            provider,
            artifacts,
        }
    }
}

#[async_trait]
impl Tool for AgentTool {
    fn name(&self) -> &str {
        &self.agent.name
    }

    fn description(&self) -> &str {
        &self.agent.description
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {"request": {"type": "string", "description": "What the agent should do."}},
            "required": ["request"],
        })
    }

    async fn invoke(&self, input: Value, ctx: &mut ToolContext<'_>) -> Result<Value, ToolError> {
        let request = required_str(self.name(), &input, "request")?;
        info!(
            session_id = ctx.session_id,
            caller = ctx.agent,
            agent = self.agent.name.as_str(),
            "Delegating request to agent tool"
        );

        let runner = AgentRunner::new(self.provider.clone(), self.artifacts.clone());
        let outcome = runner
            .run(&self.agent, request.to_string(), AgentOptions::default())
            .await
            .map_err(|err| ToolError::Delegate {
                agent: self.agent.name.clone(),
                message: err.to_string(),
            })?;

        Ok(json!({
            "agent": self.agent.name,
            "response": outcome.response,
            "tool_calls": outcome.steps.len(),
        }))
    }
}
