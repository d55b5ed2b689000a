mod company;
mod config;
mod cost;
mod errors;
mod guidance;
mod harness;
mod interview;
mod jd;
mod letter;
mod llm_client;
mod prompt;
mod questions;
mod recovery;
mod report;
mod routes;
mod sse;
mod state;
mod streaming;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::prompt::PromptLibrary;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Jasoseo API v{}", env!("CARGO_PKG_VERSION"));

    // Prompt templates: disk overrides when present, builtins otherwise
    let prompts = Arc::new(PromptLibrary::load_or_builtin(&config.prompts_path));

    // Initialize LLM client
    let llm = LlmClient::new(config.openai_api_url.clone(), config.openai_api_key.clone());
    info!("LLM client initialized ({})", config.openai_api_url);

    // Build app state
    let state = AppState {
        llm,
        prompts,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
