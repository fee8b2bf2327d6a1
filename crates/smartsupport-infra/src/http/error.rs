//! Failure normalisation for backend responses.
//!
//! A failed response becomes a [`ClientError`] carrying the backend's
//! `detail` when present, otherwise an operation-specific fallback.

use reqwest::{Response, StatusCode};
use serde_json::Value;

use smartsupport_types::error::ClientError;

use super::types::ErrorBody;

/// Turn a non-success response into a [`ClientError`].
///
/// The body is read once; a missing, empty or unparsable `detail` yields
/// `fallback(status)`.
pub async fn from_response(
    response: Response,
    fallback: impl FnOnce(StatusCode) -> String,
) -> ClientError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    match detail_from_body(&body) {
        Some(detail) => ClientError::new(detail),
        None => ClientError::new(fallback(status)),
    }
}

fn detail_from_body(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.detail? {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

/// `"API error: 500"` style fallback.
pub fn with_status(prefix: &'static str) -> impl FnOnce(StatusCode) -> String {
    move |status| format!("{prefix}: {}", status.as_u16())
}

/// Fixed fallback regardless of status.
pub fn fixed(message: &'static str) -> impl FnOnce(StatusCode) -> String {
    move |_| message.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_detail_is_used() {
        assert_eq!(
            detail_from_body(r#"{"detail": "DB down"}"#).as_deref(),
            Some("DB down")
        );
    }

    #[test]
    fn empty_or_missing_detail_falls_back() {
        assert_eq!(detail_from_body(r#"{"detail": ""}"#), None);
        assert_eq!(detail_from_body(r#"{"detail": null}"#), None);
        assert_eq!(detail_from_body(r#"{"other": 1}"#), None);
        assert_eq!(detail_from_body("<html>Bad gateway</html>"), None);
        assert_eq!(detail_from_body(""), None);
    }

    #[test]
    fn structured_detail_is_stringified() {
        let detail = detail_from_body(r#"{"detail": [{"msg": "field required"}]}"#).unwrap();
        assert!(detail.contains("field required"));
    }

    #[test]
    fn fallback_builders() {
        assert_eq!(with_status("API error")(StatusCode::BAD_GATEWAY), "API error: 502");
        assert_eq!(
            fixed("Failed to get stats")(StatusCode::INTERNAL_SERVER_ERROR),
            "Failed to get stats"
        );
    }
}
