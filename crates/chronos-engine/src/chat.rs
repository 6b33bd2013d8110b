//! Chat message types exchanged with the orchestration layer.
//!
//! Message content is a list of tagged parts so that tool calls and tool
//! results travel as typed values rather than free-form maps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::tools::{ToolCall, ToolOutput};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

/// One piece of a message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessagePart {
    Text { text: String },
    ToolCall { call_id: String, call: ToolCall },
    ToolResult { call_id: String, output: ToolOutput },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolState {
    Running,
    Success,
    Error,
}

/// A record of one tool execution, shown to the user alongside the answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolStep {
    pub tool_name: String,
    pub state: ToolState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<ToolCall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<ToolOutput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_text: Option<String>,
}

impl ToolStep {
    pub fn running(call: &ToolCall) -> Self {
        Self {
            tool_name: call.name().to_string(),
            state: ToolState::Running,
            input: Some(call.clone()),
            output: None,
            error_text: None,
        }
    }

    pub fn succeed(&mut self, output: ToolOutput) {
        self.state = ToolState::Success;
        self.output = Some(output);
    }

    pub fn fail(&mut self, error_text: impl Into<String>) {
        self.state = ToolState::Error;
        self.error_text = Some(error_text.into());
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub role: Role,
    pub parts: Vec<MessagePart>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_steps: Vec<ToolStep>,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// A message holding a single text part.
    pub fn from_text(
        id: impl Into<String>,
        role: Role,
        text: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            role,
            parts: vec![MessagePart::Text { text: text.into() }],
            tool_steps: Vec::new(),
            created_at,
        }
    }

    /// The text parts joined by newlines; tool parts are skipped.
    pub fn text(&self) -> String {
        self.parts
            .iter()
            .filter_map(|part| match part {
                MessagePart::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationMeta {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Prompts offered for each insight card, keyed by card title.
pub const SUGGESTED_PROMPTS: &[(&str, &str)] = &[
    ("Meeting Hours", "What meetings do I have this week?"),
    ("Focus Time", "When do I have focus time available?"),
    ("Categories", "What types of meetings do I have?"),
    ("Recurring", "Show me my recurring meetings"),
];

/// The prompt for an insight card, falling back to a generic question.
pub fn prompt_for_insight(title: &str) -> String {
    SUGGESTED_PROMPTS
        .iter()
        .find(|(card, _)| *card == title)
        .map_or_else(
            || format!("Tell me about {}", title.to_lowercase()),
            |(_, prompt)| (*prompt).to_string(),
        )
}
