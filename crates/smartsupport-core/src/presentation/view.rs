//! Renderable views derived from a [`SessionSnapshot`].

use serde::Serialize;
use serde_json::{Map, Value};

use smartsupport_types::message::{Message, MessageRole, ToolCall, ToolOutcome};
use smartsupport_types::prompt::find_prompt;

use crate::session::SessionSnapshot;

/// Starter questions offered while the conversation is empty.
pub const SUGGESTED_PROMPTS: &[&str] = &[
    "What can you help me with?",
    "Tell me about RAG",
    "How do AI agents work?",
];

/// Everything a frontend needs to draw one frame of the conversation.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub messages: Vec<MessageView>,
    /// "Thinking..." while a request is in flight, "Online" otherwise.
    pub status: &'static str,
    pub is_loading: bool,
    /// Input must be disabled while loading.
    pub input_enabled: bool,
    pub error: Option<String>,
    pub use_rag: bool,
    pub use_tools: bool,
    pub prompt_key: String,
    pub prompt_description: Option<String>,
    /// Present only while history is empty.
    pub welcome: Option<WelcomeView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WelcomeView {
    pub rag_enabled: bool,
    pub tools_enabled: bool,
    pub prompt_name: String,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageView {
    pub id: String,
    pub role: MessageRole,
    pub author: &'static str,
    pub content: String,
    /// Local wall-clock time, `HH:MM`.
    pub time: String,
    pub tool_calls: Vec<ToolCallView>,
}

/// A tool call with its outcome resolved.
///
/// Missing `success`/`message` fields in the backend result are tolerated:
/// the outcome becomes [`ToolOutcome::Unknown`] and `message` is `None`.
#[derive(Debug, Clone, Serialize)]
pub struct ToolCallView {
    pub tool: String,
    pub outcome: ToolOutcome,
    pub message: Option<String>,
    pub arguments: Map<String, Value>,
}

impl From<&ToolCall> for ToolCallView {
    fn from(call: &ToolCall) -> Self {
        Self {
            tool: call.tool.clone(),
            outcome: call.outcome(),
            message: call.result_message().map(str::to_string),
            arguments: call.arguments.clone(),
        }
    }
}

impl From<&Message> for MessageView {
    fn from(message: &Message) -> Self {
        let author = match message.role {
            MessageRole::User => "You",
            MessageRole::Assistant => "Assistant",
            MessageRole::System => "System",
        };
        Self {
            id: message.id.clone(),
            role: message.role,
            author,
            content: message.content.clone(),
            time: message
                .timestamp
                .with_timezone(&chrono::Local)
                .format("%H:%M")
                .to_string(),
            tool_calls: message.tool_calls.iter().map(ToolCallView::from).collect(),
        }
    }
}

impl SessionView {
    pub fn from_snapshot(snapshot: &SessionSnapshot) -> Self {
        let config = &snapshot.config;
        let prompt = find_prompt(&config.available_prompts, &config.prompt_key);

        let welcome = snapshot.messages.is_empty().then(|| WelcomeView {
            rag_enabled: config.use_rag,
            tools_enabled: config.use_tools,
            prompt_name: prompt
                .map(|p| p.name.clone())
                .unwrap_or_else(|| "Default".to_string()),
            suggestions: SUGGESTED_PROMPTS.iter().map(|s| s.to_string()).collect(),
        });

        Self {
            messages: snapshot.messages.iter().map(MessageView::from).collect(),
            status: if snapshot.is_loading { "Thinking..." } else { "Online" },
            is_loading: snapshot.is_loading,
            input_enabled: !snapshot.is_loading,
            error: snapshot.error.clone(),
            use_rag: config.use_rag,
            use_tools: config.use_tools,
            prompt_key: config.prompt_key.clone(),
            prompt_description: prompt.map(|p| p.description.clone()),
            welcome,
        }
    }
}
