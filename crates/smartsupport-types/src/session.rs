//! Per-session configuration and the shapes exchanged with the transport.

use serde::{Deserialize, Serialize};

use crate::message::ToolCall;
use crate::prompt::{DEFAULT_PROMPT_KEY, PromptOption};

/// Configuration held by a chat session.
///
/// `prompt_key` starts as the [`DEFAULT_PROMPT_KEY`] sentinel and must name a
/// catalog entry once `available_prompts` has loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub use_rag: bool,
    pub use_tools: bool,
    pub prompt_key: String,
    pub available_prompts: Vec<PromptOption>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            use_rag: true,
            use_tools: true,
            prompt_key: DEFAULT_PROMPT_KEY.to_string(),
            available_prompts: Vec::new(),
        }
    }
}

impl SessionConfig {
    /// The options forwarded to the backend with every send.
    pub fn chat_options(&self) -> ChatOptions {
        ChatOptions {
            use_rag: self.use_rag,
            use_tools: self.use_tools,
            prompt_key: self.prompt_key.clone(),
        }
    }
}

/// Per-request toggles sent alongside the history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatOptions {
    pub use_rag: bool,
    pub use_tools: bool,
    pub prompt_key: String,
}

impl Default for ChatOptions {
    fn default() -> Self {
        SessionConfig::default().chat_options()
    }
}

/// A decoded backend reply, ready to become an assistant message.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChatReply {
    pub message: String,
    #[serde(default)]
    pub tool_calls: Vec<ToolCall>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_config_defaults() {
        let config = SessionConfig::default();
        assert!(config.use_rag);
        assert!(config.use_tools);
        assert_eq!(config.prompt_key, "default");
        assert!(config.available_prompts.is_empty());
    }

    #[test]
    fn test_chat_options_mirror_config() {
        let config = SessionConfig {
            use_rag: false,
            use_tools: true,
            prompt_key: "react_agent".to_string(),
            available_prompts: Vec::new(),
        };
        let options = config.chat_options();
        assert!(!options.use_rag);
        assert!(options.use_tools);
        assert_eq!(options.prompt_key, "react_agent");
    }
}
