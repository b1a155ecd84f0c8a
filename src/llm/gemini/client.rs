//! Gemini provider implementation

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::config::Settings;
use crate::llm::core::{
    error::ProviderError,
    provider::LlmProvider,
    types::{Completion, Usage},
};

use super::types::{GenerateContentRequest, GenerateContentResponse};

/// Public Generative Language API endpoint
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Provider backed by the Gemini `generateContent` REST endpoint
pub struct GeminiProvider {
    /// HTTP client for making requests
    http_client: Client,
    /// Server-side API key
    api_key: String,
    /// Base URL without trailing slash
    base_url: String,
    /// Model resource name, e.g. "models/gemini-2.5-flash"
    model: String,
}

impl GeminiProvider {
    /// Create a new Gemini provider
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(
        api_key: String,
        base_url: Option<String>,
        model: String,
    ) -> Result<Self, ProviderError> {
        let http_client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| ProviderError::HttpError {
                status: 0,
                body: format!("Failed to create HTTP client: {}", e),
            })?;

        let base_url = base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            http_client,
            api_key,
            base_url,
            model,
        })
    }

    /// Build from settings, requiring `GEMINI_API_KEY`
    ///
    /// `LLM_API_BASE_URL` overrides the public endpoint when set.
    pub fn from_settings(settings: &Settings) -> Result<Self, ProviderError> {
        let api_key = settings
            .gemini_api_key
            .clone()
            .ok_or_else(|| ProviderError::MissingApiKey("GEMINI_API_KEY".to_string()))?;

        Self::new(
            api_key,
            settings.llm_api_base_url.clone(),
            settings.gemini_default_model.clone(),
        )
    }

    /// Build the endpoint URL for a single generation
    fn build_endpoint_url(&self) -> String {
        let model = if self.model.starts_with("models/") {
            self.model.clone()
        } else {
            format!("models/{}", self.model)
        };
        format!("{}/{}:generateContent", self.base_url, model)
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    fn model(&self) -> &str {
        &self.model
    }

    async fn answer(&self, prompt: &str, max_tokens: u32) -> Result<Completion, ProviderError> {
        let request = GenerateContentRequest::prompt(prompt, max_tokens);

        let response = self
            .http_client
            .post(self.build_endpoint_url())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::HttpError {
                status: status.as_u16(),
                body,
            });
        }

        let body: GenerateContentResponse = response.json().await?;
        completion_from_response(body, max_tokens)
    }
}

fn completion_from_response(
    response: GenerateContentResponse,
    max_tokens: u32,
) -> Result<Completion, ProviderError> {
    let text = response
        .text()
        .ok_or_else(|| ProviderError::EmptyResponse("no text in first candidate".to_string()))?;
    let usage = response.usage_metadata.unwrap_or_default();

    Ok(Completion {
        text,
        usage: Usage::new(
            usage.prompt_token_count,
            usage.candidates_token_count.min(max_tokens),
        ),
    })
}
