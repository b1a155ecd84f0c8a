use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use llm_ask::config::Settings;
use llm_ask::handlers::AppState;
use llm_ask::llm::{Completion, LlmClient, LlmProvider, ProviderError, SimulatedProvider};

/// Settings built from explicit key/value pairs instead of the process env
pub fn settings_from(pairs: &[(&str, &str)]) -> Settings {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Settings::from_lookup(|key| map.get(key).cloned())
}

/// App state backed by the simulated provider
pub fn simulated_state(settings: Settings) -> AppState {
    AppState::new(
        Arc::new(settings),
        LlmClient::new(Arc::new(SimulatedProvider::new())),
    )
}

/// App state whose provider always fails
pub fn failing_state(settings: Settings) -> AppState {
    AppState::new(Arc::new(settings), LlmClient::new(Arc::new(FailingProvider)))
}

pub struct FailingProvider;

#[async_trait]
impl LlmProvider for FailingProvider {
    fn model(&self) -> &str {
        "failing-model"
    }

    async fn answer(&self, _prompt: &str, _max_tokens: u32) -> Result<Completion, ProviderError> {
        Err(ProviderError::SerializationError(
            "unexpected token at line 1 column 1".to_string(),
        ))
    }
}
