//! Client configuration types.
//!
//! `ClientConfig` represents the optional `config.toml` in the data directory.
//! Every field has a default so a missing or partial file is always usable.

use serde::{Deserialize, Serialize};

use crate::prompt::DEFAULT_PROMPT_KEY;
use crate::session::SessionConfig;

/// Backend address used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Top-level configuration for the chat client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the chat backend (without the `/api` suffix).
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Transport-level timeout for a single request, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Initial retrieval-augmentation toggle for new sessions.
    #[serde(default = "default_true")]
    pub use_rag: bool,

    /// Initial tool-use toggle for new sessions.
    #[serde(default = "default_true")]
    pub use_tools: bool,

    /// Initial prompt key for new sessions.
    #[serde(default = "default_prompt_key")]
    pub prompt_key: String,

    /// Drop replies that resolve after the history was cleared.
    #[serde(default)]
    pub discard_stale_replies: bool,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    300
}

fn default_true() -> bool {
    true
}

fn default_prompt_key() -> String {
    DEFAULT_PROMPT_KEY.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            request_timeout_secs: default_request_timeout_secs(),
            use_rag: true,
            use_tools: true,
            prompt_key: default_prompt_key(),
            discard_stale_replies: false,
        }
    }
}

impl ClientConfig {
    /// Initial session configuration derived from these settings.
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            use_rag: self.use_rag,
            use_tools: self.use_tools,
            prompt_key: self.prompt_key.clone(),
            available_prompts: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_default_values() {
        let config = ClientConfig::default();
        assert_eq!(config.api_url, "http://localhost:8000");
        assert_eq!(config.request_timeout_secs, 300);
        assert!(config.use_rag);
        assert!(config.use_tools);
        assert_eq!(config.prompt_key, "default");
        assert!(!config.discard_stale_replies);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: ClientConfig = toml::from_str(
            r#"
api_url = "https://support.example.com"
use_rag = false
"#,
        )
        .unwrap();
        assert_eq!(config.api_url, "https://support.example.com");
        assert!(!config.use_rag);
        assert!(config.use_tools);
        assert_eq!(config.request_timeout_secs, 300);
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config: ClientConfig = toml::from_str("").unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_session_config_from_client_config() {
        let config = ClientConfig {
            prompt_key: "reflexion".to_string(),
            use_tools: false,
            ..ClientConfig::default()
        };
        let session = config.session_config();
        assert_eq!(session.prompt_key, "reflexion");
        assert!(!session.use_tools);
        assert!(session.use_rag);
    }
}
