use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::prompt::PromptLibrary;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
    /// Templates resolved once at startup; never reloaded mid-flight.
    pub prompts: Arc<PromptLibrary>,
    pub config: Config,
}
