use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::AppError;
use crate::llm_client::{Citation, SearchTier};
use crate::prompt::{self, FormattingContext, PromptKey};
use crate::state::AppState;

use super::classify::{self, INDUSTRY_FAILURE};
use super::{prompts, INDUSTRY_MODEL, SIZE_MODEL};

#[derive(Debug, Deserialize)]
pub struct IndustryRequest {
    pub company_name: String,
    pub job_position: String,
}

#[derive(Debug, Serialize)]
pub struct IndustryTag {
    pub tag: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct IndustryResponse {
    pub tags: Vec<IndustryTag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SizeRequest {
    pub company_name: String,
}

#[derive(Debug, Serialize)]
pub struct SizeResponse {
    pub category: &'static str,
    pub analysis: String,
    pub citations: Vec<Citation>,
}

/// POST /api/v1/company/industry
/// Classifies the company into up to five hyphenated industry tags.
pub async fn handle_industry(
    State(state): State<AppState>,
    Json(request): Json<IndustryRequest>,
) -> Result<Json<IndustryResponse>, AppError> {
    if request.company_name.trim().is_empty() || request.job_position.trim().is_empty() {
        return Err(AppError::Validation(
            "직무와 회사명을 모두 입력해주세요.".to_string(),
        ));
    }

    let context = FormattingContext::new()
        .set("company_name", request.company_name.as_str())
        .set("job_position", request.job_position.as_str());
    let rendered = prompt::render(state.prompts.get(PromptKey::Industry), &context)?;

    let completion = state
        .llm
        .search(INDUSTRY_MODEL, &rendered, SearchTier::High)
        .await?;

    let tags = classify::extract_industry_tags(&completion.text);
    let error = if tags.is_empty() {
        warn!(company = %request.company_name, "No industry tags survived recovery");
        Some(INDUSTRY_FAILURE.to_string())
    } else {
        None
    };
    let tags = tags
        .into_iter()
        .map(|tag| {
            let label = classify::label(&tag);
            IndustryTag { tag, label }
        })
        .collect();

    Ok(Json(IndustryResponse { tags, error }))
}

/// POST /api/v1/company/size
/// Single size verdict with the analysis prose and search citations. The
/// low search tier is deliberate; size rarely needs deep research.
pub async fn handle_size(
    State(state): State<AppState>,
    Json(request): Json<SizeRequest>,
) -> Result<Json<SizeResponse>, AppError> {
    if request.company_name.trim().is_empty() {
        return Err(AppError::Validation("회사명을 입력해주세요.".to_string()));
    }

    let context = FormattingContext::new().set("company_name", request.company_name.as_str());
    let rendered = prompt::render(state.prompts.get(PromptKey::CompanySize), &context)?;

    let completion = state
        .llm
        .search(SIZE_MODEL, &rendered, SearchTier::Low)
        .await?;

    Ok(Json(SizeResponse {
        category: classify::extract_size_category(&completion.text),
        analysis: classify::analysis_text(&completion.text),
        citations: completion.citations,
    }))
}
