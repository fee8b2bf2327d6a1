//! [`HttpBackend`]: the reqwest implementation of [`ChatTransport`].

use std::time::Duration;

use reqwest::Url;
use tracing::{debug, warn};

use smartsupport_core::transport::ChatTransport;
use smartsupport_types::config::ClientConfig;
use smartsupport_types::error::ClientError;
use smartsupport_types::message::HistoryEntry;
use smartsupport_types::prompt::{PromptDetail, PromptOption};
use smartsupport_types::session::{ChatOptions, ChatReply};

use super::error::{self, fixed, with_status};
use super::types::{ChatRequestBody, ChatResponseBody, PromptDetailBody};

/// Client for the chat backend's `/api` endpoints.
///
/// Holds no session state: every call is a single request/response pair.
/// Cloning is cheap and shares the underlying connection pool.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    /// Create a backend client for `base_url` (without the `/api` suffix).
    ///
    /// `timeout` bounds each whole request, including reading the body.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::new(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: normalize_base_url(base_url),
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        Self::new(
            &config.api_url,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the full API URL for a path below `/api`.
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.client
    }

    /// Fetch the full text of one prompt.
    ///
    /// The backend reports an unknown key with a success status and an
    /// `error` body; that case becomes `"Prompt not found: <key>"`.
    pub async fn fetch_prompt_detail(&self, key: &str) -> Result<PromptDetail, ClientError> {
        let mut url = Url::parse(&self.url("/prompts"))
            .map_err(|e| ClientError::new(format!("Invalid API URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::new(format!("Invalid API URL: {}", self.base_url)))?
            .push(key);

        debug!(url = %url, "GET prompt detail");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(ClientError::network)?;

        if !response.status().is_success() {
            return Err(error::from_response(response, fixed("Failed to fetch prompt")).await);
        }

        match response
            .json::<PromptDetailBody>()
            .await
            .map_err(ClientError::decode)?
        {
            PromptDetailBody::Found(detail) => Ok(detail),
            PromptDetailBody::Missing { error } => {
                debug!(key, error = %error, "backend has no such prompt");
                Err(ClientError::new(format!("Prompt not found: {key}")))
            }
        }
    }
}

/// Trim whitespace and trailing slashes so path joining never doubles them.
pub fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

impl ChatTransport for HttpBackend {
    async fn send_chat(
        &self,
        history: &[HistoryEntry],
        options: &ChatOptions,
    ) -> Result<ChatReply, ClientError> {
        let body = ChatRequestBody {
            messages: history,
            use_rag: options.use_rag,
            prompt_key: &options.prompt_key,
            use_tools: options.use_tools,
        };
        let url = self.url("/chat");
        debug!(
            url = %url,
            messages = history.len(),
            use_rag = options.use_rag,
            use_tools = options.use_tools,
            prompt_key = %options.prompt_key,
            "POST chat"
        );

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(ClientError::network)?;

        let status = response.status();
        if !status.is_success() {
            let err = error::from_response(response, with_status("API error")).await;
            warn!(status = status.as_u16(), error = %err, "chat request failed");
            return Err(err);
        }

        let body: ChatResponseBody = response.json().await.map_err(ClientError::decode)?;
        let reply = body.into_reply();
        debug!(tool_calls = reply.tool_calls.len(), "chat reply received");
        Ok(reply)
    }

    async fn fetch_prompts(&self) -> Result<Vec<PromptOption>, ClientError> {
        let url = self.url("/prompts");
        debug!(url = %url, "GET prompts");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(ClientError::network)?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "prompt catalog request failed");
            return Err(ClientError::new("Failed to fetch prompts"));
        }

        response.json().await.map_err(ClientError::decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use smartsupport_core::session::ChatSession;
    use smartsupport_types::message::{MessageRole, ToolOutcome};
    use smartsupport_types::session::SessionConfig;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn backend(server: &MockServer) -> HttpBackend {
        HttpBackend::new(&server.uri(), Duration::from_secs(5)).unwrap()
    }

    fn history(text: &str) -> Vec<HistoryEntry> {
        vec![HistoryEntry {
            role: MessageRole::User,
            content: text.to_string(),
        }]
    }

    #[test]
    fn base_url_trailing_slashes_are_trimmed() {
        assert_eq!(normalize_base_url("http://host:8000//"), "http://host:8000");
        assert_eq!(normalize_base_url(" http://host:8000 "), "http://host:8000");

        let backend = HttpBackend::new("http://host:8000/", Duration::from_secs(1)).unwrap();
        assert_eq!(backend.url("/chat"), "http://host:8000/api/chat");
    }

    #[tokio::test]
    async fn send_chat_posts_history_and_options() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(body_json(json!({
                "messages": [{"role": "user", "content": "Hello"}],
                "use_rag": false,
                "prompt_key": "react_agent",
                "use_tools": true
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": "Hi there",
                "sources": null,
                "tool_calls": null
            })))
            .expect(1)
            .mount(&server)
            .await;

        let options = ChatOptions {
            use_rag: false,
            use_tools: true,
            prompt_key: "react_agent".to_string(),
        };
        let reply = backend(&server)
            .send_chat(&history("Hello"), &options)
            .await
            .unwrap();
        assert_eq!(reply.message, "Hi there");
        assert!(reply.tool_calls.is_empty());
    }

    #[tokio::test]
    async fn send_chat_appends_sources_and_passes_tool_calls() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": "Your ticket is open.",
                "sources": ["faq.md"],
                "tool_calls": [{
                    "tool": "create_ticket",
                    "arguments": {"priority": "high"},
                    "result": {"success": true, "message": "Ticket #42 created"}
                }]
            })))
            .mount(&server)
            .await;

        let reply = backend(&server)
            .send_chat(&history("Open a ticket"), &ChatOptions::default())
            .await
            .unwrap();
        assert_eq!(reply.message, "Your ticket is open.\n\n📚 *Sources: faq.md*");
        assert_eq!(reply.tool_calls.len(), 1);
        assert_eq!(reply.tool_calls[0].tool, "create_ticket");
        assert_eq!(reply.tool_calls[0].outcome(), ToolOutcome::Succeeded);
    }

    #[tokio::test]
    async fn send_chat_failure_uses_detail() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({"detail": "DB down"})))
            .mount(&server)
            .await;

        let err = backend(&server)
            .send_chat(&history("Hello"), &ChatOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err.message(), "DB down");
    }

    #[tokio::test]
    async fn send_chat_failure_without_detail_uses_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
            .mount(&server)
            .await;

        let err = backend(&server)
            .send_chat(&history("Hello"), &ChatOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err.message(), "API error: 500");
    }

    #[tokio::test]
    async fn send_chat_undecodable_body_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = backend(&server)
            .send_chat(&history("Hello"), &ChatOptions::default())
            .await
            .unwrap_err();
        assert!(err.message().starts_with("Invalid response"));
    }

    #[tokio::test]
    async fn unreachable_backend_is_network_error() {
        let backend = HttpBackend::new("http://127.0.0.1:1", Duration::from_secs(2)).unwrap();
        let err = backend
            .send_chat(&history("Hello"), &ChatOptions::default())
            .await
            .unwrap_err();
        assert!(err.message().starts_with("Network error"));
    }

    #[tokio::test]
    async fn fetch_prompts_decodes_catalog() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/prompts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"key": "well_engineered", "name": "Well engineered", "description": "Detailed"},
                {"key": "react_agent", "name": "ReAct", "description": "Reason and act"}
            ])))
            .mount(&server)
            .await;

        let prompts = backend(&server).fetch_prompts().await.unwrap();
        assert_eq!(prompts.len(), 2);
        assert_eq!(prompts[0].key, "well_engineered");
        assert_eq!(prompts[1].name, "ReAct");
    }

    #[tokio::test]
    async fn fetch_prompts_failure_ignores_detail() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/prompts"))
            .respond_with(ResponseTemplate::new(503).set_body_json(json!({"detail": "busy"})))
            .mount(&server)
            .await;

        let err = backend(&server).fetch_prompts().await.unwrap_err();
        assert_eq!(err.message(), "Failed to fetch prompts");
    }

    #[tokio::test]
    async fn fetch_prompt_detail_found_and_missing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/prompts/react_agent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "key": "react_agent",
                "name": "ReAct",
                "description": "Reason and act",
                "prompt": "You are a support agent."
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/prompts/nope"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"error": "Prompt not found"})),
            )
            .mount(&server)
            .await;

        let backend = backend(&server);
        let detail = backend.fetch_prompt_detail("react_agent").await.unwrap();
        assert_eq!(detail.prompt, "You are a support agent.");

        let err = backend.fetch_prompt_detail("nope").await.unwrap_err();
        assert_eq!(err.message(), "Prompt not found: nope");
    }

    #[tokio::test]
    async fn session_round_trip_over_http() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Hi there"})))
            .mount(&server)
            .await;

        let session = ChatSession::new(backend(&server), SessionConfig::default());
        session.send_message("  Hello  ").await;

        let messages = session.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].content, "Hello");
        assert_eq!(messages[1].content, "Hi there");
        assert!(!session.is_loading());
        assert_eq!(session.error(), None);
    }
}
