//! Conversation message and tool-call types.
//!
//! A [`Message`] is created by the session store when the user submits input
//! or when a backend reply arrives, and is never mutated afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Role of a message in the conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::System => write!(f, "system"),
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for MessageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "system" => Ok(MessageRole::System),
            "user" => Ok(MessageRole::User),
            "assistant" => Ok(MessageRole::Assistant),
            other => Err(format!("invalid message role: '{other}'")),
        }
    }
}

/// A structured side effect the backend reports having performed.
///
/// `result` is duck-typed: it usually carries a boolean-ish `success` and an
/// optional human-readable `message`, but neither is guaranteed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub tool: String,
    #[serde(default)]
    pub arguments: Map<String, Value>,
    #[serde(default)]
    pub result: Map<String, Value>,
}

/// Outcome of a tool call as far as the client can tell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolOutcome {
    Succeeded,
    Failed,
    Unknown,
}

impl fmt::Display for ToolOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolOutcome::Succeeded => write!(f, "succeeded"),
            ToolOutcome::Failed => write!(f, "failed"),
            ToolOutcome::Unknown => write!(f, "unknown"),
        }
    }
}

impl ToolCall {
    /// Interpret the `success` field of the result.
    ///
    /// Accepts booleans, `"true"`/`"false"` strings and numbers (non-zero is
    /// success). Anything else, including a missing field, is `Unknown`.
    pub fn outcome(&self) -> ToolOutcome {
        match self.result.get("success") {
            Some(Value::Bool(true)) => ToolOutcome::Succeeded,
            Some(Value::Bool(false)) => ToolOutcome::Failed,
            Some(Value::String(s)) => match s.trim().to_lowercase().as_str() {
                "true" => ToolOutcome::Succeeded,
                "false" => ToolOutcome::Failed,
                _ => ToolOutcome::Unknown,
            },
            Some(Value::Number(n)) => match n.as_f64() {
                Some(v) if v != 0.0 => ToolOutcome::Succeeded,
                Some(_) => ToolOutcome::Failed,
                None => ToolOutcome::Unknown,
            },
            _ => ToolOutcome::Unknown,
        }
    }

    /// The human-readable `message` field of the result, if it is a string.
    pub fn result_message(&self) -> Option<&str> {
        self.result.get("message").and_then(Value::as_str)
    }
}

/// A single message in the conversation history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Opaque id, unique within a session.
    pub id: String,
    pub role: MessageRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    /// Tool calls reported alongside an assistant reply (empty otherwise).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCall>,
}

impl Message {
    /// Create a user message stamped with a fresh id and the current time.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content.into(), Vec::new())
    }

    /// Create an assistant message carrying the reply's tool calls.
    pub fn assistant(content: impl Into<String>, tool_calls: Vec<ToolCall>) -> Self {
        Self::new(MessageRole::Assistant, content.into(), tool_calls)
    }

    fn new(role: MessageRole, content: String, tool_calls: Vec<ToolCall>) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            role,
            content,
            timestamp: Utc::now(),
            tool_calls,
        }
    }
}

/// Role and content of a message, the only fields sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: MessageRole,
    pub content: String,
}

impl From<&Message> for HistoryEntry {
    fn from(message: &Message) -> Self {
        Self {
            role: message.role,
            content: message.content.clone(),
        }
    }
}
