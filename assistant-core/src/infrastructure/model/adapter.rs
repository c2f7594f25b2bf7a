//! Message adapters - convert chat history to provider wire formats

use crate::types::{ChatMessage, MessageRole};
use serde_json::{Value, json};

/// Adapter for converting messages to different API formats
pub struct MessageAdapter;

impl MessageAdapter {
    /// Convert messages to Gemini format
    /// Returns: (system_instruction_text, contents)
    ///
    /// Consecutive turns with the same role are merged, since Gemini expects
    /// `user` and `model` turns to alternate.
    pub fn to_gemini_format(messages: &[ChatMessage]) -> (Option<String>, Vec<Value>) {
        let mut system_parts = Vec::new();
        let mut turns: Vec<(&'static str, Vec<String>)> = Vec::new();

        for message in messages {
            let role = match message.role {
                MessageRole::System => {
                    system_parts.push(message.content.clone());
                    continue;
                }
                MessageRole::User => "user",
                MessageRole::Assistant => "model",
            };
            match turns.last_mut() {
                Some((last_role, parts)) if *last_role == role => {
                    parts.push(message.content.clone())
                }
                _ => turns.push((role, vec![message.content.clone()])),
            }
        }

        let contents = turns
            .into_iter()
            .map(|(role, parts)| {
                let parts: Vec<Value> = parts.into_iter().map(|text| json!({"text": text})).collect();
                json!({"role": role, "parts": parts})
            })
            .collect();

        let system_instruction = if system_parts.is_empty() {
            None
        } else {
            Some(system_parts.join("\n\n"))
        };

        (system_instruction, contents)
    }
}
