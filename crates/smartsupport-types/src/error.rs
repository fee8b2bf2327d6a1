use thiserror::Error;

/// The single failure value produced by every backend operation.
///
/// Callers only ever branch on success vs. failure, so the error carries
/// nothing but a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ClientError {
    message: String,
}

impl ClientError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// A request that never produced an HTTP response (DNS, refused, timeout).
    pub fn network(cause: impl std::fmt::Display) -> Self {
        Self::new(format!("Network error: {cause}"))
    }

    /// A success response whose body could not be decoded.
    pub fn decode(cause: impl std::fmt::Display) -> Self {
        Self::new(format!("Invalid response: {cause}"))
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors from reading the on-disk client configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(String),

    #[error("failed to parse config file: {0}")]
    Parse(String),
}
