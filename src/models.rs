// Request and response bodies for the HTTP API

use serde::{Deserialize, Serialize};

pub use crate::errors::ErrorBody;

// Request Types
#[derive(Debug, Clone, Deserialize)]
pub struct AskRequest {
    pub prompt: String,
    #[serde(default)]
    pub max_tokens: Option<u32>,
}

// Health check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub name: String,
    pub version: String,
}
