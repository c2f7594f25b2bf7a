use crate::config::AgentConfig;
use crate::tooling::{Tool, ToolRegistry};
use std::sync::Arc;

/// Declarative agent record. Built once at startup and shared immutably.
#[derive(Debug, Clone)]
pub struct AgentDefinition {
    pub name: String,
    pub model: String,
    pub description: String,
    pub instruction: String,
    pub tools: ToolRegistry,
    pub sub_agents: Vec<Arc<AgentDefinition>>,
}

impl AgentDefinition {
    pub fn new(
        name: impl Into<String>,
        model: impl Into<String>,
        description: impl Into<String>,
        instruction: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
            description: description.into(),
            instruction: instruction.into(),
            tools: ToolRegistry::new(),
            sub_agents: Vec::new(),
        }
    }

    pub fn from_config(config: &AgentConfig) -> Self {
        Self::new(
            config.name.as_str(),
            config.model.as_str(),
            config.description.as_str(),
            config.instruction.as_str(),
        )
    }

    pub fn with_tool(mut self, tool: Arc<dyn Tool>) -> Self {
        self.tools.register(tool);
        self
    }

    pub fn with_sub_agent(mut self, agent: Arc<AgentDefinition>) -> Self {
        self.sub_agents.push(agent);
        self
    }

    pub fn sub_agent(&self, name: &str) -> Option<&Arc<AgentDefinition>> {
        self.sub_agents
            .iter()
            .find(|agent| agent.name.eq_ignore_ascii_case(name))
    }

    /// Agents from `root` down to the descendant called `name`, both inclusive
    pub fn path_to(root: &Arc<AgentDefinition>, name: &str) -> Option<Vec<Arc<AgentDefinition>>> {
        if root.name.eq_ignore_ascii_case(name) {
            return Some(vec![root.clone()]);
        }
        root.sub_agents.iter().find_map(|child| {
            Self::path_to(child, name).map(|mut path| {
                path.insert(0, root.clone());
                path
            })
        })
    }
}
