//! User intents produced by a frontend.
//!
//! Intents are forwarded verbatim to the session store; the adapter adds no
//! logic of its own.

use serde::{Deserialize, Serialize};

use crate::session::ChatSession;
use crate::transport::ChatTransport;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum SessionIntent {
    SendMessage(String),
    RetryLastMessage,
    ClearChat,
    ToggleRag(bool),
    ToggleTools(bool),
    ChangePrompt(String),
}

impl SessionIntent {
    /// Whether this intent issues a network request.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            SessionIntent::SendMessage(_) | SessionIntent::RetryLastMessage
        )
    }

    /// Apply the intent to a session.
    pub async fn apply<T: ChatTransport>(self, session: &ChatSession<T>) {
        match self {
            SessionIntent::SendMessage(text) => session.send_message(&text).await,
            SessionIntent::RetryLastMessage => session.retry_last_message().await,
            SessionIntent::ClearChat => session.clear_chat(),
            SessionIntent::ToggleRag(enabled) => session.set_use_rag(enabled),
            SessionIntent::ToggleTools(enabled) => session.set_use_tools(enabled),
            SessionIntent::ChangePrompt(key) => {
                session.set_prompt_key(&key);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smartsupport_types::error::ClientError;
    use smartsupport_types::message::HistoryEntry;
    use smartsupport_types::prompt::PromptOption;
    use smartsupport_types::session::{ChatOptions, ChatReply, SessionConfig};

    struct EchoTransport;

    impl ChatTransport for EchoTransport {
        async fn send_chat(
            &self,
            history: &[HistoryEntry],
            options: &ChatOptions,
        ) -> Result<ChatReply, ClientError> {
            let last = history.last().map(|h| h.content.clone()).unwrap_or_default();
            Ok(ChatReply {
                message: format!("{last} (rag={})", options.use_rag),
                tool_calls: Vec::new(),
            })
        }

        async fn fetch_prompts(&self) -> Result<Vec<PromptOption>, ClientError> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn intents_forward_to_session() {
        let session = ChatSession::new(EchoTransport, SessionConfig::default());

        SessionIntent::ToggleRag(false).apply(&session).await;
        SessionIntent::ChangePrompt("reflexion".to_string())
            .apply(&session)
            .await;
        SessionIntent::SendMessage("ping".to_string())
            .apply(&session)
            .await;

        let messages = session.messages();
        assert_eq!(messages[1].content, "ping (rag=false)");
        assert_eq!(session.config().prompt_key, "reflexion");

        SessionIntent::ClearChat.apply(&session).await;
        assert!(session.messages().is_empty());
    }

    #[test]
    fn network_intents() {
        assert!(SessionIntent::SendMessage("hi".to_string()).is_network());
        assert!(SessionIntent::RetryLastMessage.is_network());
        assert!(!SessionIntent::ToggleTools(true).is_network());
    }

    #[test]
    fn intent_serde_shape() {
        let json = serde_json::to_string(&SessionIntent::ToggleRag(true)).unwrap();
        assert_eq!(json, r#"{"type":"toggle_rag","value":true}"#);
    }
}
