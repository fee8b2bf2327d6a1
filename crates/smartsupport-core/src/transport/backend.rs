//! ChatTransport trait definition.
//!
//! Uses native async fn in traits (RPITIT) like the rest of the workspace's
//! ports. Implementations are stateless: every call carries the full history
//! snapshot and the session toggles it needs.

use std::future::Future;
use std::sync::Arc;

use smartsupport_types::error::ClientError;
use smartsupport_types::message::HistoryEntry;
use smartsupport_types::prompt::PromptOption;
use smartsupport_types::session::{ChatOptions, ChatReply};

/// Session-facing operations of the chat backend.
///
/// Every failure collapses to a [`ClientError`] carrying a human-readable
/// message; callers never branch on failure subtype.
pub trait ChatTransport: Send + Sync {
    /// Send the full ordered history plus toggles and receive one complete reply.
    fn send_chat(
        &self,
        history: &[HistoryEntry],
        options: &ChatOptions,
    ) -> impl Future<Output = Result<ChatReply, ClientError>> + Send;

    /// Fetch the prompt catalog.
    fn fetch_prompts(&self) -> impl Future<Output = Result<Vec<PromptOption>, ClientError>> + Send;
}

impl<T: ChatTransport> ChatTransport for Arc<T> {
    fn send_chat(
        &self,
        history: &[HistoryEntry],
        options: &ChatOptions,
    ) -> impl Future<Output = Result<ChatReply, ClientError>> + Send {
        (**self).send_chat(history, options)
    }

    fn fetch_prompts(&self) -> impl Future<Output = Result<Vec<PromptOption>, ClientError>> + Send {
        (**self).fetch_prompts()
    }
}
