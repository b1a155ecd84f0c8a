//! Error types for the service boundary

use std::error::Error as StdError;

use serde::Serialize;
use thiserror::Error;
use warp::http::StatusCode;

/// Status code used when a failure does not carry a more specific one
pub const DEFAULT_ERROR_STATUS: u16 = 500;

type BoxError = Box<dyn StdError + Send + Sync>;

/// The single domain error raised when the LLM service fails
///
/// Callers only ever see `message` and `status_code`. The underlying cause is
/// kept in `source` for server-side logging.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct LlmServiceError {
    pub message: String,
    pub status_code: u16,
    #[source]
    source: Option<BoxError>,
}

impl LlmServiceError {
    /// Create an error with the default 500 status
    pub fn new(message: impl Into<String>) -> Self {
        Self::with_status(message, DEFAULT_ERROR_STATUS)
    }

    /// Create an error with an explicit status code
    pub fn with_status(message: impl Into<String>, status_code: u16) -> Self {
        Self {
            message: message.into(),
            status_code,
            source: None,
        }
    }

    /// Attach the lower-level error that caused this one
    pub fn caused_by<E>(mut self, cause: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        self.source = Some(Box::new(cause));
        self
    }

    /// HTTP status for this error, falling back to 500 for out-of-range codes
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

/// JSON body returned for every failed request
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl From<&LlmServiceError> for ErrorBody {
    fn from(err: &LlmServiceError) -> Self {
        Self {
            detail: err.message.clone(),
        }
    }
}

/// Errors that abort process startup
#[derive(Debug, Error)]
pub enum AppError {
    #[error("logger error: {0}")]
    Logger(String),

    #[error("invalid bind address: {0}")]
    BindAddress(String),

    #[error("provider error: {0}")]
    Provider(#[from] crate::llm::ProviderError),
}
