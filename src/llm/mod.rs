//! LLM Abstraction Layer
//!
//! `LlmClient` is what the HTTP layer calls. It delegates to an `LlmProvider`
//! (the offline simulator by default, or Gemini) and turns provider failures
//! into the single `LlmServiceError` kind.

pub mod client;
pub mod core;
pub mod gemini;
pub mod simulated;

// Re-export commonly used types
pub use client::{LlmClient, DEFAULT_ASK_MAX_TOKENS, LLM_FAILURE_MESSAGE};
pub use self::core::{
    error::ProviderError,
    provider::{create_provider, LlmProvider},
    types::{AskResponse, Completion, Usage},
};
pub use gemini::GeminiProvider;
pub use simulated::SimulatedProvider;
