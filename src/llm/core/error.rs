//! Error types for the provider layer

use thiserror::Error;

/// Errors a provider can raise while answering a prompt
///
/// These never reach HTTP callers directly; `LlmClient` folds every variant
/// into a single `LlmServiceError`.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Required API key not configured
    #[error("Missing API key: {0}")]
    MissingApiKey(String),

    /// HTTP request failures
    #[error("HTTP error (status {status}): {body}")]
    HttpError { status: u16, body: String },

    /// JSON encoding/decoding issues
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Provider answered without any usable text
    #[error("Empty response: {0}")]
    EmptyResponse(String),

    /// Unknown provider name in configuration
    #[error("Unsupported provider: {0}")]
    Unsupported(String),
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        ProviderError::SerializationError(err.to_string())
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return ProviderError::SerializationError(err.to_string());
        }
        ProviderError::HttpError {
            status: err.status().map(|s| s.as_u16()).unwrap_or(0),
            body: err.to_string(),
        }
    }
}
