//! Application state shared by every CLI command.
//!
//! Holds the configured backend client. Chat sessions are created per
//! command on top of it and never shared.

use std::sync::Arc;

use tracing::debug;

use smartsupport_core::session::ChatSession;
use smartsupport_infra::config::{config_path, load_client_config, resolve_data_dir};
use smartsupport_infra::http::HttpBackend;
use smartsupport_types::config::ClientConfig;

use crate::cli::SessionArgs;

/// Session type used by the CLI, pinned to the HTTP backend.
pub type CliSession = ChatSession<Arc<HttpBackend>>;

pub struct AppState {
    pub backend: Arc<HttpBackend>,
    pub config: ClientConfig,
}

impl AppState {
    /// Load configuration and build the backend client.
    ///
    /// `api_url` comes from `--api-url` or `SMARTSUPPORT_API_URL` and wins
    /// over the config file.
    pub async fn init(api_url: Option<String>) -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        let mut config = load_client_config(&data_dir).await;
        if let Some(url) = api_url {
            config.api_url = url;
        }

        let backend = HttpBackend::from_config(&config)?;
        debug!(
            api_url = %backend.base_url(),
            config_path = %config_path(&data_dir).display(),
            "backend configured"
        );

        Ok(Self {
            backend: Arc::new(backend),
            config,
        })
    }

    /// Start a fresh, empty chat session.
    pub fn new_session(&self, args: &SessionArgs) -> CliSession {
        let mut session_config = self.config.session_config();
        args.apply(&mut session_config);
        ChatSession::new(Arc::clone(&self.backend), session_config)
            .with_stale_reply_discard(self.config.discard_stale_replies)
    }
}
