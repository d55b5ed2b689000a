use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::errors::AppError;
use crate::state::AppState;

use super::generator::{self, FlowRequest, GuideRequest};

#[derive(Debug, Serialize)]
pub struct GuideResponse {
    pub guide: String,
}

#[derive(Debug, Serialize)]
pub struct FlowResponse {
    pub flow: String,
}

/// POST /api/v1/guide
/// Writing guide for one question. Degrades to raw model text when no
/// table can be recovered.
pub async fn handle_guide(
    State(state): State<AppState>,
    Json(request): Json<GuideRequest>,
) -> Result<Json<GuideResponse>, AppError> {
    validate(&request.question, &request.company_name, &request.job_position)?;
    let (guide, _) = generator::generate_guide(&state, &request).await?;
    Ok(Json(GuideResponse { guide }))
}

/// POST /api/v1/answer-flow
/// Answer skeleton distilled from the finished interview. Returns 422
/// when the payload has no markdown table.
pub async fn handle_answer_flow(
    State(state): State<AppState>,
    Json(request): Json<FlowRequest>,
) -> Result<Json<FlowResponse>, AppError> {
    validate(&request.question, &request.company_name, &request.job_position)?;
    let (flow, _) = generator::generate_answer_flow(&state, &request).await?;
    Ok(Json(FlowResponse { flow }))
}

fn validate(question: &str, company_name: &str, job_position: &str) -> Result<(), AppError> {
    if question.trim().is_empty() || company_name.trim().is_empty() || job_position.trim().is_empty()
    {
        return Err(AppError::Validation(
            "문항, 회사명, 직무를 모두 입력해주세요.".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_blank_question() {
        assert!(validate("", "카카오", "백엔드 개발자").is_err());
        assert!(validate("지원 동기", "  ", "백엔드 개발자").is_err());
        assert!(validate("지원 동기", "카카오", "백엔드 개발자").is_ok());
    }
}
