use axum::extract::State;
use axum::Json;
use serde::Serialize;
use tracing::warn;

use crate::errors::AppError;
use crate::state::AppState;

use super::generator::{self, CommonRequest, RecommendRequest, COMMON_FAILURE};

#[derive(Debug, Serialize)]
pub struct CommonQuestionsResponse {
    pub questions: Vec<String>,
    /// Set when recovery produced nothing usable. Kept in the body rather
    /// than the status line so the client can show it inline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    pub question: String,
}

/// POST /api/v1/questions/common
/// Commonly-asked questions for one company and position.
pub async fn handle_common(
    State(state): State<AppState>,
    Json(request): Json<CommonRequest>,
) -> Result<Json<CommonQuestionsResponse>, AppError> {
    validate(&request.company_name, &request.job_position)?;

    let (questions, _) = generator::generate_common(&state, &request).await?;
    let error = if questions.is_empty() {
        warn!(
            company = %request.company_name,
            "No common questions survived recovery"
        );
        Some(COMMON_FAILURE.to_string())
    } else {
        None
    };

    Ok(Json(CommonQuestionsResponse { questions, error }))
}

/// POST /api/v1/questions/recommend
/// One recommended question. Always 200; recovery bottoms out at a
/// sentinel message instead of failing.
pub async fn handle_recommend(
    State(state): State<AppState>,
    Json(request): Json<RecommendRequest>,
) -> Result<Json<RecommendResponse>, AppError> {
    validate(&request.company_name, &request.job_position)?;

    let (question, _) = generator::recommend(&state, &request).await?;
    Ok(Json(RecommendResponse { question }))
}

fn validate(company_name: &str, job_position: &str) -> Result<(), AppError> {
    if company_name.trim().is_empty() || job_position.trim().is_empty() {
        return Err(AppError::Validation("모든 필드를 입력해주세요.".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_requires_both_fields() {
        assert!(validate("카카오", "").is_err());
        assert!(validate("", "백엔드 개발자").is_err());
        assert!(validate("카카오", "백엔드 개발자").is_ok());
    }

    #[test]
    fn test_empty_questions_serialize_with_error_field() {
        let response = CommonQuestionsResponse {
            questions: vec![],
            error: Some(COMMON_FAILURE.to_string()),
        };
        let body = serde_json::to_value(&response).unwrap();
        assert_eq!(body["error"], COMMON_FAILURE);
        assert_eq!(body["questions"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_successful_questions_omit_error_field() {
        let response = CommonQuestionsResponse {
            questions: vec!["지원 동기를 기술하시오.".to_string()],
            error: None,
        };
        let body = serde_json::to_value(&response).unwrap();
        assert!(body.get("error").is_none());
    }
}
