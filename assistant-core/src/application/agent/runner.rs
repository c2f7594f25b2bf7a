use super::definition::AgentDefinition;
use super::directive::AgentDirective;
use super::errors::AgentError;
use super::models::{AgentOptions, AgentOutcome, AgentStep, StepKind};
use super::runtime::{ToolExecution, parse_agent_action, user_request};
use crate::artifacts::ArtifactStore;
use crate::model::{GenerationOptions, ModelProvider, ModelRequest};
use crate::session::{Session, SessionStore, ToolContext};
use crate::types::ChatMessage;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Maximum retry attempts for JSON parsing failures
const MAX_JSON_RETRIES: u8 = 3;

const TOOL_RESULT_INSTRUCTION: &str = "Use this tool result to continue: call another tool, \
     transfer to another agent, or give the final answer. Reply with one JSON action.";

const JSON_RETRY_MESSAGE: &str = "Your previous reply was not a valid action. Reply again with \
     exactly one JSON object using the call_tool, transfer or final action.";

/// Drives agent trees against a model provider.
///
/// Tool calls run one at a time against the session's state; a session is
/// locked for the whole run.
pub struct AgentRunner {
    provider: Arc<dyn ModelProvider>,
    artifacts: Arc<dyn ArtifactStore>,
    sessions: Arc<SessionStore>,
}

impl AgentRunner {
    pub fn new(provider: Arc<dyn ModelProvider>, artifacts: Arc<dyn ArtifactStore>) -> Self {
        Self {
            provider,
            artifacts,
            sessions: Arc::new(SessionStore::new()),
        }
    }

    pub fn with_sessions(mut self, sessions: Arc<SessionStore>) -> Self {
        self.sessions = sessions;
        self
    }

    pub fn sessions(&self) -> &Arc<SessionStore> {
        &self.sessions
    }

    /// Run `prompt` through the agent tree rooted at `root`.
    ///
    /// The run starts at whichever agent held the session at the end of the
    /// previous run, or at `root` for a new session. The agent the run ended
    /// on stays active for the next run, whether or not the run succeeded.
    pub async fn run(
        &self,
        root: &Arc<AgentDefinition>,
        prompt: String,
        options: AgentOptions,
    ) -> Result<AgentOutcome, AgentError> {
        let handle = self.sessions.open(options.session_id.as_deref()).await;
        let mut session = handle.lock().await;
        let session_id = session.id.clone();

        let mut ancestors = session
            .active_agent
            .as_deref()
            .and_then(|name| AgentDefinition::path_to(root, name))
            .unwrap_or_default();
        let mut active = ancestors.pop().unwrap_or_else(|| root.clone());
        info!(
            session_id = session_id.as_str(),
            agent = active.name.as_str(),
            prompt = %summarise(&prompt),
            "Agent run started"
        );

        let result = self
            .drive(&mut session, &mut active, &mut ancestors, &prompt, &options)
            .await;
        session.active_agent = Some(active.name.clone());

        match result {
            Ok((response, steps)) => {
                info!(
                    session_id = session_id.as_str(),
                    agent = active.name.as_str(),
                    response = %summarise(&response),
                    "Agent returned final response"
                );
                Ok(AgentOutcome {
                    session_id,
                    agent: active.name.clone(),
                    response,
                    steps,
                })
            }
            Err(err) => {
                warn!(
                    session_id = session_id.as_str(),
                    agent = active.name.as_str(),
                    error = %err,
                    "Agent run failed"
                );
                Err(err)
            }
        }
    }

    /// Dispatch loop for one run. `active` and `ancestors` track transfers
    /// so the caller sees where the run stopped even on error.
    async fn drive(
        &self,
        session: &mut Session,
        active: &mut Arc<AgentDefinition>,
        ancestors: &mut Vec<Arc<AgentDefinition>>,
        prompt: &str,
        options: &AgentOptions,
    ) -> Result<(String, Vec<AgentStep>), AgentError> {
        let session_id = session.id.clone();
        let mut steps = Vec::new();
        let mut remaining_steps = options.max_steps;
        let mut next_prompt = user_request(prompt, None);

        loop {
            debug!(
                session_id = session_id.as_str(),
                agent = active.name.as_str(),
                remaining_steps,
                "Submitting agent turn to model provider"
            );
            let system = active.compose_system_instructions(ancestors);
            let content = self.exchange(session, active, &system, next_prompt).await?;
            let directive = self
                .parse_with_retry(session, active, &system, content)
                .await?;

            match directive {
                AgentDirective::Final { response } => return Ok((response, steps)),
                AgentDirective::CallTool { tool, input } => {
                    if remaining_steps == 0 {
                        warn!("Agent exceeded max tool interactions");
                        return Err(AgentError::StepLimit(options.max_steps));
                    }
                    remaining_steps -= 1;
                    info!(agent = active.name.as_str(), tool = %tool, "Agent requested tool execution");

                    let execution = {
                        let mut ctx = ToolContext::new(
                            &session_id,
                            &active.name,
                            &mut session.state,
                            self.artifacts.as_ref(),
                        );
                        active.execute_tool(&tool, input, &mut ctx).await?
                    };
                    next_prompt = tool_result_prompt(&execution);
                    steps.push(AgentStep {
                        kind: StepKind::ToolCall,
                        agent: active.name.clone(),
                        target: execution.tool,
                        input: execution.input,
                        success: execution.success,
                        output: execution.output,
                    });
                }
                AgentDirective::Transfer { agent: target } => {
                    if remaining_steps == 0 {
                        warn!("Agent exceeded max interactions while transferring");
                        return Err(AgentError::StepLimit(options.max_steps));
                    }
                    remaining_steps -= 1;

                    let from = active.name.clone();
                    if let Some(child) = active.sub_agent(&target).cloned() {
                        ancestors.push(std::mem::replace(active, child));
                    } else if let Some(position) = ancestors
                        .iter()
                        .position(|agent| agent.name.eq_ignore_ascii_case(&target))
                    {
                        ancestors.truncate(position + 1);
                        if let Some(parent) = ancestors.pop() {
                            *active = parent;
                        }
                    } else {
                        warn!(from = %from, target = %target, "Transfer to unknown agent");
                        return Err(AgentError::UnknownAgent { from, target });
                    }

                    info!(from = %from, to = active.name.as_str(), "Conversation transferred");
                    steps.push(AgentStep {
                        kind: StepKind::Transfer,
                        agent: from.clone(),
                        target: active.name.clone(),
                        input: Value::Null,
                        success: true,
                        output: Value::Null,
                    });
                    next_prompt = user_request(prompt, Some(&from));
                }
            }
        }
    }

    /// Send one turn for `agent` and record it in the agent's history
    async fn exchange(
        &self,
        session: &mut Session,
        agent: &AgentDefinition,
        system: &str,
        prompt: String,
    ) -> Result<String, AgentError> {
        // The prompt is recorded before the call so a tool result is kept
        // in history even when the provider fails.
        session.push_message(&agent.name, ChatMessage::user(prompt));
        let history = session.history(&agent.name);
        let mut messages = Vec::with_capacity(history.len() + 1);
        messages.push(ChatMessage::system(system));
        messages.extend(history.iter().cloned());

        let response = self
            .provider
            .chat(ModelRequest {
                model: agent.model.clone(),
                messages,
                options: GenerationOptions::json(),
                session_id: Some(session.id.clone()),
            })
            .await?;

        let content = response.message.content.clone();
        session.push_message(&agent.name, response.message);
        debug!(
            session_id = session.id.as_str(),
            agent = agent.name.as_str(),
            total_messages = session.history(&agent.name).len(),
            "Persisted exchange to agent history"
        );
        Ok(content)
    }

    /// Parse agent action with retry logic for malformed JSON
    async fn parse_with_retry(
        &self,
        session: &mut Session,
        agent: &AgentDefinition,
        system: &str,
        content: String,
    ) -> Result<AgentDirective, AgentError> {
        let mut retry_count = 0u8;
        let mut current_content = content;

        loop {
            match parse_agent_action(&current_content) {
                Ok(directive) => return Ok(directive),
                Err(e) if retry_count < MAX_JSON_RETRIES => {
                    retry_count += 1;
                    warn!(
                        attempt = retry_count,
                        max_attempts = MAX_JSON_RETRIES,
                        error = %e,
                        "JSON parse failed, requesting correction from model"
                    );
                    let retry_message = format!("{JSON_RETRY_MESSAGE}\n\nError details: {e}");
                    current_content = self
                        .exchange(session, agent, system, retry_message)
                        .await
                        .map_err(|chat_err| {
                            warn!(error = %chat_err, "Retry chat request failed");
                            AgentError::InvalidResponse(format!(
                                "Failed to get correction after JSON parse error: {chat_err}"
                            ))
                        })?;
                }
                Err(e) => {
                    warn!(attempts = retry_count, "JSON parse failed after max retries");
                    return Err(AgentError::InvalidResponse(format!(
                        "Invalid JSON after {MAX_JSON_RETRIES} retry attempts: {e}"
                    )));
                }
            }
        }
    }
}

fn tool_result_prompt(execution: &ToolExecution) -> String {
    json!({
        "tool_result": {
            "tool": execution.tool,
            "input": execution.input,
            "success": execution.success,
            "output": execution.output,
        },
        "instruction": TOOL_RESULT_INSTRUCTION,
    })
    .to_string()
}

/// Single-line preview of `text` for log fields
fn summarise(text: &str) -> String {
    const SNIPPET_LIMIT: usize = 160;
    let single_line = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if single_line.is_empty() {
        return "(empty)".to_string();
    }
    let mut chars = single_line.chars();
    let mut result: String = chars.by_ref().take(SNIPPET_LIMIT).collect();
    if chars.next().is_some() {
        result.push('…');
    }
    result
}
