use axum::extract::State;
use axum::response::Sse;
use axum::Json;
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::llm_client::{ChatMessage, LlmError};
use crate::prompt::{self, FormattingContext, PromptKey};
use crate::sse::{self, EventStream};
use crate::state::AppState;
use crate::streaming;

use super::prompts;
use super::session::{
    recover_answer, render_transcript, InterviewContext, InterviewUpdate, Turn,
};
use super::{INTERVIEWER_MODEL, MEMORY_MODEL, STUDENT_MODEL};

// ────────────────────────────────────────────────────────────────────────────
// Request / response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct QuestionRequest {
    #[serde(flatten)]
    pub context: InterviewContext,
    /// Progress reported by the previous turn; carried forward when the
    /// new payload cannot be parsed.
    #[serde(default)]
    pub progress: u8,
}

#[derive(Debug, Deserialize)]
pub struct ReplyRequest {
    #[serde(flatten)]
    pub context: InterviewContext,
}

#[derive(Debug, Deserialize)]
pub struct MemoryRequest {
    pub transcript: Vec<Turn>,
    #[serde(default)]
    pub current_memory: String,
}

#[derive(Debug, Serialize)]
pub struct MemoryResponse {
    pub memory: String,
    /// False when the upstream stream died early and the summary was
    /// recovered from a partial buffer.
    pub complete: bool,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/interview/question
/// Streams the next interviewer turn over SSE. Every vendor fragment yields
/// one snapshot of the whole buffer, projected so the client can render the
/// `answer` field while the object is still open; the final frame carries
/// the recovered update.
pub async fn handle_question(
    State(state): State<AppState>,
    Json(request): Json<QuestionRequest>,
) -> Result<Sse<EventStream>, AppError> {
    validate_context(&request.context)?;

    let template = state.prompts.get(PromptKey::Interviewer);
    let rendered = prompt::render(template, &request.context.formatting_context())?;

    let session_id = Uuid::new_v4();
    info!(%session_id, company = %request.context.company_name, "Starting interviewer turn");

    let fragments = state
        .llm
        .stream(
            INTERVIEWER_MODEL,
            &[
                ChatMessage::system(prompts::JSON_FORMAT_SYSTEM),
                ChatMessage::user(rendered),
            ],
        )
        .await?;

    let previous_progress = request.progress;
    let (tx, stream) = sse::stream_channel();
    tokio::spawn(async move {
        let mut accumulated = streaming::accumulate(fragments);
        while let Some(result) = accumulated.next().await {
            match result {
                Ok(snapshot) => {
                    let frame = sse::snapshot_frame(&streaming::project(&snapshot, "answer"));
                    if !sse::send_frame(&tx, &frame).await {
                        return;
                    }
                }
                Err(e) => {
                    warn!(%session_id, "Interviewer stream failed: {e}");
                    sse::send_frame(&tx, &sse::error_frame("면접관 응답 수신에 실패했습니다."))
                        .await;
                    sse::send_done(&tx).await;
                    return;
                }
            }
        }

        let update = InterviewUpdate::from_response(accumulated.buffer(), previous_progress);
        if !update.parsed {
            warn!(%session_id, "Interviewer payload was not valid JSON; passing raw text through");
        }
        let frame = json!({
            "type": "final",
            "session_id": session_id,
            "answer": update.answer,
            "progress": update.progress,
            "reasoning": update.reasoning,
            "complete": update.is_complete(),
            "parsed": update.parsed,
        });
        sse::send_frame(&tx, &frame).await;
        sse::send_done(&tx).await;
    });

    Ok(stream)
}

/// POST /api/v1/interview/reply
/// Streams a simulated applicant answer for the current transcript. Same
/// frame protocol as the question endpoint, minus the progress bookkeeping.
pub async fn handle_reply(
    State(state): State<AppState>,
    Json(request): Json<ReplyRequest>,
) -> Result<Sse<EventStream>, AppError> {
    validate_context(&request.context)?;

    let template = state.prompts.get(PromptKey::Student);
    let rendered = prompt::render(template, &request.context.formatting_context())?;

    let fragments = state
        .llm
        .stream(
            STUDENT_MODEL,
            &[
                ChatMessage::system(prompts::JSON_FORMAT_SYSTEM),
                ChatMessage::user(rendered),
            ],
        )
        .await?;

    let (tx, stream) = sse::stream_channel();
    tokio::spawn(async move {
        let mut accumulated = streaming::accumulate(fragments);
        while let Some(result) = accumulated.next().await {
            match result {
                Ok(snapshot) => {
                    let frame = sse::snapshot_frame(&streaming::project(&snapshot, "answer"));
                    if !sse::send_frame(&tx, &frame).await {
                        return;
                    }
                }
                Err(e) => {
                    warn!("Student stream failed: {e}");
                    sse::send_frame(&tx, &sse::error_frame("학생 응답 수신에 실패했습니다."))
                        .await;
                    sse::send_done(&tx).await;
                    return;
                }
            }
        }

        let (answer, parsed) = recover_answer(accumulated.buffer());
        let frame = json!({
            "type": "final",
            "answer": answer,
            "parsed": parsed,
        });
        sse::send_frame(&tx, &frame).await;
        sse::send_done(&tx).await;
    });

    Ok(stream)
}

/// POST /api/v1/interview/memory
/// Consolidates the transcript into the rolling memory summary. Streams
/// from the vendor internally so an aborted connection still yields
/// whatever was buffered; `complete` reports whether recovery was partial.
pub async fn handle_memory(
    State(state): State<AppState>,
    Json(request): Json<MemoryRequest>,
) -> Result<Json<MemoryResponse>, AppError> {
    if request.transcript.is_empty() {
        return Err(AppError::Validation(
            "대화 내용이 비어 있습니다.".to_string(),
        ));
    }

    let template = state.prompts.get(PromptKey::Memory);
    let context = FormattingContext::new()
        .set("memory", request.current_memory.as_str())
        .set("conversation", render_transcript(&request.transcript));
    let rendered = prompt::render(template, &context)?;

    let fragments = state
        .llm
        .stream(
            MEMORY_MODEL,
            &[
                ChatMessage::system(prompts::JSON_FORMAT_SYSTEM),
                ChatMessage::user(rendered),
            ],
        )
        .await?;

    let mut accumulated = streaming::accumulate(fragments);
    let mut stream_error = None;
    while let Some(result) = accumulated.next().await {
        if let Err(e) = result {
            warn!("Memory stream aborted, recovering from partial buffer: {e}");
            stream_error = Some(e);
        }
    }

    Ok(Json(memory_from_buffer(
        accumulated.into_buffer(),
        stream_error,
    )?))
}

/// One recovery pass over whatever the memory stream left behind.
///
/// Runs whether the stream ended normally or died mid-flight; only an
/// empty buffer surfaces the transport error. `complete` reports which of
/// the two it was.
fn memory_from_buffer(
    buffer: String,
    stream_error: Option<LlmError>,
) -> Result<MemoryResponse, AppError> {
    if buffer.is_empty() {
        return Err(AppError::Llm(
            stream_error.unwrap_or(LlmError::EmptyContent),
        ));
    }

    let memory = match crate::recovery::json_object(&buffer) {
        Ok(value) => value
            .get("memory")
            .and_then(serde_json::Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| buffer.trim().to_string()),
        Err(_) => buffer.trim().to_string(),
    };

    Ok(MemoryResponse {
        memory,
        complete: stream_error.is_none(),
    })
}

fn validate_context(context: &InterviewContext) -> Result<(), AppError> {
    if context.company_name.trim().is_empty() || context.position_title.trim().is_empty() {
        return Err(AppError::Validation(
            "회사명과 직무를 모두 입력해주세요.".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_context_rejects_blank_company() {
        let context: InterviewContext = serde_json::from_value(json!({
            "company_name": "   ",
            "position_title": "백엔드 개발자",
        }))
        .unwrap();
        assert!(validate_context(&context).is_err());
    }

    #[test]
    fn test_validate_context_accepts_minimal_fields() {
        let context: InterviewContext = serde_json::from_value(json!({
            "company_name": "네이버",
            "position_title": "데이터 엔지니어",
        }))
        .unwrap();
        assert!(validate_context(&context).is_ok());
    }

    #[test]
    fn test_question_request_flattens_context() {
        let request: QuestionRequest = serde_json::from_value(json!({
            "company_name": "네이버",
            "position_title": "데이터 엔지니어",
            "progress": 35,
            "transcript": [
                {"speaker": "interviewer", "content": "자기소개 부탁드립니다."},
                {"speaker": "student", "content": "안녕하세요."}
            ]
        }))
        .unwrap();
        assert_eq!(request.progress, 35);
        assert_eq!(request.context.transcript.len(), 2);
        assert_eq!(request.context.company_name, "네이버");
    }

    #[test]
    fn test_memory_from_complete_buffer() {
        let response = memory_from_buffer(
            r#"{"memory": "지원자는 부트캠프 출신으로 팀 프로젝트 경험이 많다."}"#.to_string(),
            None,
        )
        .unwrap();
        assert!(response.complete);
        assert_eq!(
            response.memory,
            "지원자는 부트캠프 출신으로 팀 프로젝트 경험이 많다."
        );
    }

    #[test]
    fn test_memory_recovered_after_transport_failure() {
        // The stream died after the object closed but before the
        // terminator; the buffered object is still recovered.
        let response = memory_from_buffer(
            r#"{"memory": "지원자는 인턴 경험 보유"}"#.to_string(),
            Some(LlmError::Api {
                status: 502,
                message: "bad gateway".to_string(),
            }),
        )
        .unwrap();
        assert!(!response.complete);
        assert_eq!(response.memory, "지원자는 인턴 경험 보유");
    }

    #[test]
    fn test_memory_partial_buffer_falls_back_to_raw_text() {
        let buffer = r#"{"memory": "지원자는 데이터"#;
        let response = memory_from_buffer(
            buffer.to_string(),
            Some(LlmError::EmptyContent),
        )
        .unwrap();
        assert!(!response.complete);
        assert_eq!(response.memory, buffer);
    }

    #[test]
    fn test_memory_empty_buffer_surfaces_the_stream_error() {
        let result = memory_from_buffer(
            String::new(),
            Some(LlmError::Api {
                status: 502,
                message: "bad gateway".to_string(),
            }),
        );
        assert!(matches!(
            result,
            Err(AppError::Llm(LlmError::Api { status: 502, .. }))
        ));
    }

    #[test]
    fn test_memory_empty_buffer_without_error_is_empty_content() {
        let result = memory_from_buffer(String::new(), None);
        assert!(matches!(result, Err(AppError::Llm(LlmError::EmptyContent))));
    }

    #[test]
    fn test_question_request_progress_defaults_to_zero() {
        let request: QuestionRequest = serde_json::from_value(json!({
            "company_name": "네이버",
            "position_title": "데이터 엔지니어",
        }))
        .unwrap();
        assert_eq!(request.progress, 0);
    }
}
