//! Client used by the HTTP layer to talk to the configured provider

use std::sync::Arc;

use tracing::{debug, error};

use crate::errors::LlmServiceError;
use crate::llm::core::{provider::LlmProvider, types::AskResponse};

/// Token budget used when the caller passes none
pub const DEFAULT_ASK_MAX_TOKENS: u32 = 256;

/// Message returned to callers whenever the provider fails
pub const LLM_FAILURE_MESSAGE: &str = "Failed to get response from LLM";

/// Characters of the prompt included in debug logs
const PROMPT_PREVIEW_CHARS: usize = 50;

/// Wraps a provider, shapes its output and collapses its failures
#[derive(Clone)]
pub struct LlmClient {
    provider: Arc<dyn LlmProvider>,
}

impl LlmClient {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self { provider }
    }

    /// Model identifier of the underlying provider
    pub fn model(&self) -> &str {
        self.provider.model()
    }

    /// Send a prompt to the provider
    ///
    /// `max_tokens` defaults to 256. Any provider error is logged and
    /// returned as an `LlmServiceError` with status 500 and a generic message;
    /// the original error is only reachable through `source()`.
    pub async fn ask(
        &self,
        prompt: &str,
        max_tokens: Option<u32>,
    ) -> Result<AskResponse, LlmServiceError> {
        let max_tokens = max_tokens.unwrap_or(DEFAULT_ASK_MAX_TOKENS);
        let preview: String = prompt.chars().take(PROMPT_PREVIEW_CHARS).collect();
        debug!(prompt_preview = %preview, max_tokens, "sending prompt to LLM");

        let completion = match self.provider.answer(prompt, max_tokens).await {
            Ok(completion) => completion,
            Err(e) => {
                error!(
                    error = %e,
                    error_debug = ?e,
                    model = self.provider.model(),
                    "error while calling LLM service"
                );
                return Err(LlmServiceError::new(LLM_FAILURE_MESSAGE).caused_by(e));
            }
        };

        let response = AskResponse {
            answer: completion.text,
            model: self.provider.model().to_string(),
            usage: completion.usage,
        };
        debug!(raw_response = ?response, "received response from LLM");

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::core::error::ProviderError;
    use crate::llm::core::types::{Completion, Usage};
    use crate::llm::simulated::SimulatedProvider;
    use async_trait::async_trait;
    use std::error::Error;
    use std::fmt;
    use std::sync::Mutex;
    use tracing::field::{Field, Visit};
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{Context, Layer};
    use tracing_subscriber::prelude::*;

    type Records = Arc<Mutex<Vec<(Level, String)>>>;

    /// Collects level and message of every event
    struct RecordingLayer(Records);

    struct MessageVisitor(String);

    impl Visit for MessageVisitor {
        fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
            if field.name() == "message" {
                self.0 = format!("{:?}", value);
            }
        }
    }

    impl<S: Subscriber> Layer<S> for RecordingLayer {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let mut visitor = MessageVisitor(String::new());
            event.record(&mut visitor);
            self.0
                .lock()
                .unwrap()
                .push((*event.metadata().level(), visitor.0));
        }
    }

    /// Run `client.ask` with a recording subscriber installed for this thread
    async fn ask_recorded(
        client: &LlmClient,
        prompt: &str,
    ) -> (Result<AskResponse, LlmServiceError>, Vec<(Level, String)>) {
        let records = Records::default();
        let subscriber = tracing_subscriber::registry().with(RecordingLayer(Arc::clone(&records)));
        let _guard = tracing::subscriber::set_default(subscriber);

        let result = client.ask(prompt, Some(10)).await;
        let captured = records.lock().unwrap().clone();
        (result, captured)
    }

    struct FailingProvider;

    #[async_trait]
    impl LlmProvider for FailingProvider {
        fn model(&self) -> &str {
            "failing-model"
        }

        async fn answer(&self, _prompt: &str, _max_tokens: u32) -> Result<Completion, ProviderError> {
            Err(ProviderError::HttpError {
                status: 502,
                body: "upstream exploded".to_string(),
            })
        }
    }

    struct FixedProvider(Usage);

    #[async_trait]
    impl LlmProvider for FixedProvider {
        fn model(&self) -> &str {
            "fixed"
        }

        async fn answer(&self, prompt: &str, _max_tokens: u32) -> Result<Completion, ProviderError> {
            Ok(Completion {
                text: prompt.to_uppercase(),
                usage: self.0,
            })
        }
    }

    fn simulated_client() -> LlmClient {
        LlmClient::new(Arc::new(SimulatedProvider::new()))
    }

    #[tokio::test]
    async fn test_hello_world_scenario() {
        let response = simulated_client().ask("hello world", Some(10)).await.unwrap();
        assert_eq!(response.answer, "Echo from LLM: hello world");
        assert_eq!(response.model, "dummy-llm-001");
        assert_eq!(response.usage.prompt_tokens, 2);
        assert_eq!(response.usage.completion_tokens, 10);
    }

    #[tokio::test]
    async fn test_default_max_tokens_is_256() {
        let response = simulated_client().ask("hello", None).await.unwrap();
        // 256 is above the simulated ceiling of 50
        assert_eq!(response.usage.completion_tokens, 50);
    }

    #[tokio::test]
    async fn test_completion_tokens_never_exceed_request() {
        let client = simulated_client();
        for n in [0, 1, 25, 50, 51, 1000] {
            let response = client.ask("some prompt", Some(n)).await.unwrap();
            assert_eq!(response.usage.completion_tokens, n.min(50));
        }
    }

    #[tokio::test]
    async fn test_provider_failure_becomes_domain_error() {
        let client = LlmClient::new(Arc::new(FailingProvider));
        let err = client.ask("hello", Some(10)).await.unwrap_err();

        assert_eq!(err.message, LLM_FAILURE_MESSAGE);
        assert_eq!(err.status_code, 500);
        assert!(!err.to_string().contains("upstream exploded"));

        let source = err.source().expect("cause should be chained");
        assert!(source.to_string().contains("upstream exploded"));
    }

    #[tokio::test]
    async fn test_response_uses_provider_output() {
        let client = LlmClient::new(Arc::new(FixedProvider(Usage::new(3, 7))));
        let response = client.ask("abc", Some(10)).await.unwrap();
        assert_eq!(response.answer, "ABC");
        assert_eq!(response.model, "fixed");
        assert_eq!(response.usage, Usage::new(3, 7));
        assert_eq!(client.model(), "fixed");
    }

    #[tokio::test]
    async fn test_success_logs_outbound_and_inbound_records() {
        let (result, records) = ask_recorded(&simulated_client(), "hello world").await;
        assert!(result.is_ok());

        let debug: Vec<&str> = records
            .iter()
            .filter(|(level, _)| *level == Level::DEBUG)
            .map(|(_, message)| message.as_str())
            .collect();
        assert_eq!(debug, vec!["sending prompt to LLM", "received response from LLM"]);
        assert!(records.iter().all(|(level, _)| *level != Level::ERROR));
    }

    #[tokio::test]
    async fn test_failure_logs_error_record() {
        let client = LlmClient::new(Arc::new(FailingProvider));
        let (result, records) = ask_recorded(&client, "hello").await;
        assert!(result.is_err());

        let errors: Vec<&str> = records
            .iter()
            .filter(|(level, _)| *level == Level::ERROR)
            .map(|(_, message)| message.as_str())
            .collect();
        assert_eq!(errors, vec!["error while calling LLM service"]);
        assert!(!records
            .iter()
            .any(|(_, message)| message == "received response from LLM"));
    }
}
