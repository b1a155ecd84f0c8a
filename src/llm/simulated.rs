//! Offline provider that echoes the prompt back

use async_trait::async_trait;

use crate::llm::core::{
    error::ProviderError,
    provider::LlmProvider,
    types::{Completion, Usage},
};

/// Model name reported by the simulated provider
pub const SIMULATED_MODEL: &str = "dummy-llm-001";

/// Characters of the prompt echoed back
const ECHO_CHARS: usize = 200;

/// Ceiling on reported completion tokens
const MAX_COMPLETION_TOKENS: u32 = 50;

/// Stand-in for a real model call
///
/// Answers with `"Echo from LLM: "` plus the first 200 characters of the
/// prompt. Prompt tokens are a whitespace word count; completion tokens are
/// `min(max_tokens, 50)`.
#[derive(Debug, Clone, Default)]
pub struct SimulatedProvider;

impl SimulatedProvider {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl LlmProvider for SimulatedProvider {
    fn model(&self) -> &str {
        SIMULATED_MODEL
    }

    async fn answer(&self, prompt: &str, max_tokens: u32) -> Result<Completion, ProviderError> {
        let echoed: String = prompt.chars().take(ECHO_CHARS).collect();
        let prompt_tokens = u32::try_from(prompt.split_whitespace().count()).unwrap_or(u32::MAX);

        Ok(Completion {
            text: format!("Echo from LLM: {}", echoed),
            usage: Usage::new(prompt_tokens, max_tokens.min(MAX_COMPLETION_TOKENS)),
        })
    }
}
