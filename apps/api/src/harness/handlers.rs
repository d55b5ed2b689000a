use axum::extract::State;
use axum::response::Html;
use axum::Json;
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::state::AppState;

use super::{default_cases, html, run_cases, HarnessCase, DEFAULT_CONCURRENCY};

#[derive(Debug, Deserialize)]
pub struct RunRequest {
    #[serde(default)]
    pub cases: Vec<HarnessCase>,
    pub concurrency: Option<usize>,
}

/// POST /api/v1/harness/run
/// Runs the full drafting pipeline over the given cases (built-in smoke
/// cases when the list is empty) and renders the HTML report. Case
/// failures are part of the report, not HTTP errors.
pub async fn handle_run(
    State(state): State<AppState>,
    Json(request): Json<RunRequest>,
) -> Result<Html<String>, AppError> {
    let cases = if request.cases.is_empty() {
        default_cases()
    } else {
        request.cases
    };
    let concurrency = request.concurrency.unwrap_or(DEFAULT_CONCURRENCY);
    info!(cases = cases.len(), concurrency, "Starting harness run");

    let report = run_cases(&state, cases, concurrency).await;
    info!(
        succeeded = report.succeeded,
        failed = report.failed,
        "Harness run finished"
    );

    Ok(Html(html::render_report(&report)))
}
