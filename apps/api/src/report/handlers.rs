use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::llm_client::{Citation, SearchTier};
use crate::prompt::{self, FormattingContext, PromptKey};
use crate::state::AppState;

use super::parser::{self, ContextReport};
use super::{prompts, REPORT_MODEL};

#[derive(Debug, Deserialize)]
pub struct ContextReportRequest {
    pub company_name: String,
    pub job_position: String,
    pub experience_level: String,
}

#[derive(Debug, Serialize)]
pub struct ContextReportResponse {
    pub report: ContextReport,
    /// False when the placeholder was substituted.
    pub parsed: bool,
    pub citations: Vec<Citation>,
}

/// POST /api/v1/report/context
/// Research-backed company report. Always 200: an unrecoverable payload
/// comes back as the sentinel placeholder with `parsed: false`.
pub async fn handle_context_report(
    State(state): State<AppState>,
    Json(request): Json<ContextReportRequest>,
) -> Result<Json<ContextReportResponse>, AppError> {
    if request.company_name.trim().is_empty()
        || request.job_position.trim().is_empty()
        || request.experience_level.trim().is_empty()
    {
        return Err(AppError::Validation(
            "직무, 회사명, 경력 수준을 모두 입력해주세요.".to_string(),
        ));
    }

    let context = FormattingContext::new()
        .set("company_name", request.company_name.as_str())
        .set("job_position", request.job_position.as_str())
        .set("experience_level", request.experience_level.as_str());
    let rendered = prompt::render(state.prompts.get(PromptKey::ContextReport), &context)?;
    let input = format!("{}\n\n{}", prompts::ANALYST_PREAMBLE, rendered);

    let completion = state
        .llm
        .search(REPORT_MODEL, &input, SearchTier::High)
        .await?;

    let recovered = parser::parse_report(&completion.text);
    let parsed = !recovered.is_placeholder();

    Ok(Json(ContextReportResponse {
        report: recovered.into_inner(),
        parsed,
        citations: completion.citations,
    }))
}
