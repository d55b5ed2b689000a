use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;
use crate::llm_client::ChatMessage;
use crate::prompt::{self, FormattingContext, PromptKey};
use crate::recovery;
use crate::state::AppState;

use super::{prompts, JD_MODEL};

#[derive(Debug, Deserialize)]
pub struct RecommendJdRequest {
    pub company_name: String,
    pub job_position: String,
}

#[derive(Debug, Serialize)]
pub struct RecommendJdResponse {
    pub jd: String,
}

/// POST /api/v1/jd/recommend
/// Synthesizes a plausible JD for applicants who have no posting to paste
/// in. The JD feeds later prompts, so an unrecoverable payload is a 422
/// rather than a silent fallback.
pub async fn handle_recommend(
    State(state): State<AppState>,
    Json(request): Json<RecommendJdRequest>,
) -> Result<Json<RecommendJdResponse>, AppError> {
    if request.company_name.trim().is_empty() || request.job_position.trim().is_empty() {
        return Err(AppError::Validation(
            "회사명과 직무를 모두 입력해주세요.".to_string(),
        ));
    }

    let context = FormattingContext::new()
        .set("company_name", request.company_name.as_str())
        .set("job_position", request.job_position.as_str());
    let rendered = prompt::render(state.prompts.get(PromptKey::RecommendJd), &context)?;

    let completion = state
        .llm
        .complete(
            JD_MODEL,
            &[
                ChatMessage::system(prompts::JD_SYSTEM),
                ChatMessage::user(rendered),
            ],
        )
        .await?;

    let jd = recovery::json_object_with_key(&completion.text, "recommended_jd")
        .ok()
        .and_then(|value| {
            value
                .get("recommended_jd")
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .ok_or_else(|| {
            AppError::UnprocessableEntity("채용 공고 생성 결과를 해석할 수 없습니다.".to_string())
        })?;

    Ok(Json(RecommendJdResponse { jd }))
}
