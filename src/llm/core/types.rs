//! Core types for the LLM layer

use serde::{Deserialize, Serialize};

/// Token usage reported for one answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    /// Tokens consumed by the prompt
    pub prompt_tokens: u32,
    /// Tokens generated in the answer
    pub completion_tokens: u32,
}

impl Usage {
    /// Create new usage figures
    pub fn new(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
        }
    }
}

/// What a provider hands back for a single prompt
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    /// Generated text
    pub text: String,
    /// Token accounting for this call
    pub usage: Usage,
}

/// Response returned to callers of `LlmClient::ask`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AskResponse {
    pub answer: String,
    pub model: String,
    pub usage: Usage,
}
