//! Chat session store.
//!
//! [`ChatSession`] owns the ordered message history, the session toggles and
//! the loading/error flags. It is the only component that mutates history:
//!
//! - `Idle --send--> Sending`: append the trimmed user message, clear `error`.
//! - `Sending --reply--> Idle`: append the assistant message.
//! - `Sending --failure--> Idle-with-error`: set `error`, notify the observer.
//!
//! State lives inside a `tokio::sync::watch` channel so presentation code can
//! subscribe to snapshots. No lock is held across an `.await`, so `clear_chat`
//! and the config setters stay callable while a send is in flight.
//!
//! The store does not reject overlapping sends. Callers gate their input on
//! [`SessionSnapshot::is_loading`].

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use smartsupport_types::message::{HistoryEntry, Message, MessageRole};
use smartsupport_types::prompt::find_prompt;
use smartsupport_types::session::{ChatOptions, SessionConfig};

use super::observer::{ErrorObserver, TracingErrorObserver};
use crate::transport::ChatTransport;

/// Observable state of a chat session.
#[derive(Debug, Clone, Default)]
pub struct SessionSnapshot {
    pub messages: Vec<Message>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub config: SessionConfig,
    pub(crate) in_flight: usize,
    pub(crate) generation: u64,
    pub(crate) prompts_loaded: bool,
}

impl SessionSnapshot {
    fn new(config: SessionConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Whether the prompt catalog has been fetched successfully.
    pub fn prompts_loaded(&self) -> bool {
        self.prompts_loaded
    }

    fn history(&self) -> Vec<HistoryEntry> {
        self.messages.iter().map(HistoryEntry::from).collect()
    }

    /// Enter `Sending`: clear the previous error and capture the request.
    fn begin_send(&mut self) -> PendingSend {
        self.error = None;
        self.in_flight += 1;
        self.is_loading = true;
        PendingSend {
            history: self.history(),
            options: self.config.chat_options(),
            generation: self.generation,
        }
    }

    fn finish_send(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.is_loading = self.in_flight > 0;
    }
}

/// A request captured when a send starts.
struct PendingSend {
    history: Vec<HistoryEntry>,
    options: ChatOptions,
    generation: u64,
}

/// One user's conversation: history, toggles and the in-flight request slot.
///
/// Sessions are explicitly instantiated and fully independent; nothing is
/// shared between two `ChatSession` values.
pub struct ChatSession<T: ChatTransport> {
    transport: T,
    observer: Arc<dyn ErrorObserver>,
    state: watch::Sender<SessionSnapshot>,
    discard_stale_replies: bool,
}

impl<T: ChatTransport> ChatSession<T> {
    /// Create a new idle session with an empty history.
    pub fn new(transport: T, config: SessionConfig) -> Self {
        let (state, _) = watch::channel(SessionSnapshot::new(config));
        Self {
            transport,
            observer: Arc::new(TracingErrorObserver),
            state,
            discard_stale_replies: false,
        }
    }

    /// Replace the error observer (defaults to [`TracingErrorObserver`]).
    pub fn with_observer(mut self, observer: Arc<dyn ErrorObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Drop replies whose send started before the most recent `clear_chat`.
    pub fn with_stale_reply_discard(mut self, discard: bool) -> Self {
        self.discard_stale_replies = discard;
        self
    }

    /// Access the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Clone of the current state.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.borrow().clone()
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.state.subscribe()
    }

    pub fn messages(&self) -> Vec<Message> {
        self.state.borrow().messages.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading
    }

    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    pub fn config(&self) -> SessionConfig {
        self.state.borrow().config.clone()
    }

    // --- Sending ---

    /// Send user input to the backend.
    ///
    /// Blank or whitespace-only input is ignored without side effects.
    /// Otherwise the trimmed text is appended as a user message and exactly
    /// one request is issued; its outcome either appends an assistant message
    /// or sets `error`, never both.
    pub async fn send_message(&self, text: &str) {
        let content = text.trim();
        if content.is_empty() {
            return;
        }

        let mut pending = None;
        self.state.send_modify(|s| {
            s.messages.push(Message::user(content));
            pending = Some(s.begin_send());
        });

        if let Some(pending) = pending {
            self.dispatch(pending).await;
        }
    }

    /// Re-issue the most recent user message.
    ///
    /// Rolls back at most one trailing assistant message, then resends the
    /// last user turn. When that turn is the trailing message it is reused in
    /// place rather than duplicated. No-op when history has no user message.
    pub async fn retry_last_message(&self) {
        let mut pending = None;
        let mut fallback = None;

        self.state.send_if_modified(|s| {
            let mut popped = false;
            let Some(index) = s.messages.iter().rposition(|m| m.role == MessageRole::User) else {
                return false;
            };
            let user_id = s.messages[index].id.clone();
            let content = s.messages[index].content.clone();

            if s.messages.last().is_some_and(|m| m.role == MessageRole::Assistant) {
                s.messages.pop();
                popped = true;
            }

            if s.messages.last().is_some_and(|m| m.id == user_id) {
                pending = Some(s.begin_send());
            } else {
                fallback = Some(content);
            }
            popped || pending.is_some()
        });

        if let Some(pending) = pending {
            debug!(history_len = pending.history.len(), "Retrying last user message");
            self.dispatch(pending).await;
        } else if let Some(content) = fallback {
            debug!("Last user message is not trailing, sending it again");
            self.send_message(&content).await;
        }
    }

    async fn dispatch(&self, pending: PendingSend) {
        debug!(
            history_len = pending.history.len(),
            use_rag = pending.options.use_rag,
            use_tools = pending.options.use_tools,
            prompt_key = %pending.options.prompt_key,
            "Sending chat request"
        );

        let result = self
            .transport
            .send_chat(&pending.history, &pending.options)
            .await;

        match result {
            Ok(reply) => {
                self.state.send_modify(|s| {
                    s.finish_send();
                    if self.is_stale(s, pending.generation) {
                        debug!("Discarding reply that resolved after the chat was cleared");
                        return;
                    }
                    info!(tool_calls = reply.tool_calls.len(), "Assistant reply received");
                    s.messages
                        .push(Message::assistant(reply.message, reply.tool_calls));
                });
            }
            Err(err) => {
                self.state.send_modify(|s| {
                    s.finish_send();
                    if self.is_stale(s, pending.generation) {
                        debug!(error = %err, "Discarding failure that resolved after the chat was cleared");
                        return;
                    }
                    s.error = Some(err.message().to_string());
                });
                self.observer.on_error(&err);
            }
        }
    }

    fn is_stale(&self, state: &SessionSnapshot, generation: u64) -> bool {
        self.discard_stale_replies && state.generation != generation
    }

    // --- History ---

    /// Reset history to empty and clear `error`.
    ///
    /// Does not cancel an in-flight send. Unless stale-reply discard is
    /// enabled, a reply resolving afterwards is appended to the new history.
    pub fn clear_chat(&self) {
        self.state.send_modify(|s| {
            s.messages.clear();
            s.error = None;
            s.generation += 1;
        });
        info!("Chat history cleared");
    }

    // --- Configuration ---

    pub fn set_use_rag(&self, enabled: bool) {
        self.state.send_if_modified(|s| {
            let changed = s.config.use_rag != enabled;
            s.config.use_rag = enabled;
            changed
        });
    }

    pub fn set_use_tools(&self, enabled: bool) {
        self.state.send_if_modified(|s| {
            let changed = s.config.use_tools != enabled;
            s.config.use_tools = enabled;
            changed
        });
    }

    /// Select the active system prompt.
    ///
    /// Once the catalog has loaded, keys not present in it are rejected and
    /// `false` is returned. Before that any key is accepted.
    pub fn set_prompt_key(&self, key: &str) -> bool {
        let mut accepted = false;
        self.state.send_if_modified(|s| {
            if s.prompts_loaded && find_prompt(&s.config.available_prompts, key).is_none() {
                return false;
            }
            accepted = true;
            let changed = s.config.prompt_key != key;
            s.config.prompt_key = key.to_string();
            changed
        });
        if !accepted {
            warn!(prompt_key = %key, "Ignoring unknown prompt key");
        }
        accepted
    }

    /// Fetch the prompt catalog.
    ///
    /// Intended to run once, fire-and-forget, when the session starts. A
    /// failure is reported to the observer but never sets `error`, and the
    /// current prompt key stays usable. After a successful load the key is
    /// moved to the first catalog entry if the catalog does not contain it.
    pub async fn load_prompt_catalog(&self) {
        if self.state.borrow().prompts_loaded {
            debug!("Prompt catalog already loaded");
            return;
        }

        match self.transport.fetch_prompts().await {
            Ok(prompts) => {
                info!(count = prompts.len(), "Prompt catalog loaded");
                self.state.send_modify(|s| {
                    if find_prompt(&prompts, &s.config.prompt_key).is_none() {
                        if let Some(first) = prompts.first() {
                            debug!(from = %s.config.prompt_key, to = %first.key, "Prompt key not in catalog, selecting first entry");
                            s.config.prompt_key = first.key.clone();
                        }
                    }
                    s.config.available_prompts = prompts;
                    s.prompts_loaded = true;
                });
            }
            Err(err) => {
                warn!(error = %err, "Failed to fetch prompt catalog");
                self.observer.on_error(&err);
            }
        }
    }
}
