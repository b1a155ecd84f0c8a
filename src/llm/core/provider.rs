//! Provider trait for LLM implementations

use std::sync::Arc;

use async_trait::async_trait;

use super::{error::ProviderError, types::Completion};
use crate::config::Settings;
use crate::llm::gemini::GeminiProvider;
use crate::llm::simulated::SimulatedProvider;

/// Capability every model backend must offer
///
/// Implementations turn a prompt into text plus token usage. They know nothing
/// about HTTP routes or the domain error; `LlmClient` handles both.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Model identifier reported back to callers
    fn model(&self) -> &str;

    /// Answer a prompt, generating at most `max_tokens` tokens
    async fn answer(&self, prompt: &str, max_tokens: u32) -> Result<Completion, ProviderError>;
}

/// Create the provider selected by `Settings::llm_provider`
///
/// # Errors
///
/// Returns `ProviderError::Unsupported` for unknown provider names, or the
/// provider's own construction error (e.g. a missing API key).
pub fn create_provider(settings: &Settings) -> Result<Arc<dyn LlmProvider>, ProviderError> {
    match settings.llm_provider.as_str() {
        "simulated" => Ok(Arc::new(SimulatedProvider::new())),
        "gemini" => Ok(Arc::new(GeminiProvider::from_settings(settings)?)),
        other => Err(ProviderError::Unsupported(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_provider_is_simulated() {
        let provider = create_provider(&Settings::default()).unwrap();
        assert_eq!(provider.model(), "dummy-llm-001");
    }

    #[test]
    fn test_gemini_requires_api_key() {
        let settings = Settings {
            llm_provider: "gemini".to_string(),
            ..Settings::default()
        };
        let err = create_provider(&settings).err().expect("should fail");
        assert!(matches!(err, ProviderError::MissingApiKey(_)));
    }

    #[test]
    fn test_gemini_with_api_key() {
        let settings = Settings {
            llm_provider: "gemini".to_string(),
            gemini_api_key: Some("key".to_string()),
            ..Settings::default()
        };
        let provider = create_provider(&settings).unwrap();
        assert_eq!(provider.model(), "models/gemini-2.5-flash");
    }

    #[test]
    fn test_unknown_provider() {
        let settings = Settings {
            llm_provider: "carrier-pigeon".to_string(),
            ..Settings::default()
        };
        let err = create_provider(&settings).err().expect("should fail");
        assert!(matches!(err, ProviderError::Unsupported(ref name) if name == "carrier-pigeon"));
    }
}
