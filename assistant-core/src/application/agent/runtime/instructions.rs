use super::{AgentDefinition, Value, json};
use std::sync::Arc;

impl AgentDefinition {
    /// System prompt for this agent: its own instruction followed by the
    /// directive protocol, the tool catalogue and the transfer targets.
    pub(in crate::application::agent) fn compose_system_instructions(
        &self,
        ancestors: &[Arc<AgentDefinition>],
    ) -> String {
        let mut lines = vec![
            self.instruction.trim().to_string(),
            String::new(),
            format!("You are the agent '{}'.", self.name),
            "All responses must be a single valid JSON object without commentary or code fences."
                .to_string(),
            "To invoke a tool respond with: {\"action\":\"call_tool\",\"tool\":\"tool_name\",\"input\":{...}}."
                .to_string(),
            "To give the final answer to the user respond with: {\"action\":\"final\",\"response\":\"...\"}."
                .to_string(),
        ];

        if self.tools.is_empty() {
            lines.push("You have no tools.".to_string());
        } else {
            lines.push("Available tools:".to_string());
            for descriptor in self.tools.descriptors() {
                let schema = serde_json::to_string(&descriptor.input_schema).unwrap_or_default();
                lines.push(format!(
                    "- {}: {} Input schema: {}",
                    descriptor.name, descriptor.description, schema
                ));
            }
        }

        let mut targets: Vec<(&str, &str)> = self
            .sub_agents
            .iter()
            .map(|agent| (agent.name.as_str(), agent.description.as_str()))
            .collect();
        targets.extend(
            ancestors
                .iter()
                .map(|agent| (agent.name.as_str(), agent.description.as_str())),
        );
        if !targets.is_empty() {
            lines.push(
                "To hand the conversation to another agent respond with: {\"action\":\"transfer\",\"agent\":\"agent_name\"}."
                    .to_string(),
            );
            lines.push("Agents you can transfer to:".to_string());
            for (name, description) in targets {
                lines.push(format!("- {name}: {description}"));
            }
        }

        lines.join("\n")
    }
}

pub(in crate::application::agent) fn user_request(prompt: &str, transferred_from: Option<&str>) -> String {
    let mut payload = json!({
        "action": "user_request",
        "prompt": prompt,
    });
    if let (Some(from), Some(map)) = (transferred_from, payload.as_object_mut()) {
        map.insert("transferred_from".to_string(), Value::String(from.to_string()));
    }
    payload.to_string()
}
