// Handlers module

pub mod ask;
pub mod health;
pub mod rejection;

use std::sync::Arc;

use crate::config::Settings;
use crate::llm::LlmClient;

pub use ask::ask_handler;
pub use health::health_handler;
pub use rejection::handle_rejection;

/// Shared, read-only state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub client: LlmClient,
}

impl AppState {
    pub fn new(settings: Arc<Settings>, client: LlmClient) -> Self {
        Self { settings, client }
    }
}
