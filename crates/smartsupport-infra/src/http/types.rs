//! Backend wire types.
//!
//! These are the JSON bodies exchanged with the `/api` endpoints. They are
//! NOT the domain types from smartsupport-types; conversion happens at the
//! edge of [`super::client::HttpBackend`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use smartsupport_types::message::{HistoryEntry, ToolCall};
use smartsupport_types::prompt::PromptDetail;
use smartsupport_types::session::ChatReply;

/// Request body for `POST /api/chat`.
#[derive(Debug, Serialize)]
pub struct ChatRequestBody<'a> {
    pub messages: &'a [HistoryEntry],
    pub use_rag: bool,
    pub prompt_key: &'a str,
    pub use_tools: bool,
}

/// Response body for `POST /api/chat`.
#[derive(Debug, Deserialize)]
pub struct ChatResponseBody {
    pub message: String,
    #[serde(default)]
    pub sources: Option<Vec<String>>,
    #[serde(default)]
    pub tool_calls: Option<Vec<ToolCall>>,
}

impl ChatResponseBody {
    /// Fold the sources into a footer on the message text.
    pub fn into_reply(self) -> ChatReply {
        let mut message = self.message;
        if let Some(sources) = self.sources.filter(|s| !s.is_empty()) {
            message.push_str(&sources_footer(&sources));
        }
        ChatReply {
            message,
            tool_calls: self.tool_calls.unwrap_or_default(),
        }
    }
}

/// Markdown footer listing the documents an answer was grounded on.
pub fn sources_footer(sources: &[String]) -> String {
    format!("\n\n📚 *Sources: {}*", sources.join(", "))
}

/// Response body for `GET /api/prompts/{key}`.
///
/// An unknown key comes back as a success status with an `error` field.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum PromptDetailBody {
    Found(PromptDetail),
    Missing { error: String },
}

/// Request body for `POST /api/documents/add-text`.
#[derive(Debug, Serialize)]
pub struct AddTextBody<'a> {
    pub texts: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadatas: Option<&'a [Map<String, Value>]>,
}

/// Request body for `POST /api/documents/load-directory`.
#[derive(Debug, Serialize)]
pub struct LoadDirectoryBody<'a> {
    pub directory_path: &'a str,
}

/// Response body for `DELETE /api/documents/clear`.
#[derive(Debug, Deserialize)]
pub struct ClearBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// Error body returned by the backend on failure.
///
/// `detail` is usually a string but validation failures carry a list.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<Value>,
}
