use serde::Serialize;
use serde_json::Value;

const DEFAULT_MAX_STEPS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    ToolCall,
    Transfer,
}

#[derive(Debug, Clone, Serialize)]
pub struct AgentStep {
    pub kind: StepKind,
    /// Agent that took the step
    pub agent: String,
    /// Tool name, or the target agent for transfers
    pub target: String,
    pub input: Value,
    pub success: bool,
    pub output: Value,
}

#[derive(Debug, Clone)]
pub struct AgentOutcome {
    pub session_id: String,
    /// Agent that produced the final response
    pub agent: String,
    pub response: String,
    pub steps: Vec<AgentStep>,
}

#[derive(Debug, Clone)]
pub struct AgentOptions {
    pub session_id: Option<String>,
    pub max_steps: usize,
}

impl Default for AgentOptions {
    fn default() -> Self {
        Self {
            session_id: None,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

impl AgentOptions {
    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }
}
