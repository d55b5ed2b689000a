use axum::extract::State;
use axum::response::Sse;
use axum::Json;
use futures::StreamExt;
use serde_json::json;
use tracing::warn;

use crate::errors::AppError;
use crate::llm_client::ChatMessage;
use crate::prompt::{self, PromptKey};
use crate::sse::{self, EventStream};
use crate::state::AppState;
use crate::streaming;

use super::compose::{final_answer, DraftRequest};
use super::DRAFT_MODEL;

/// POST /api/v1/cover-letter
/// Streams a cover letter draft over SSE. The draft is requested as plain
/// prose, so snapshots usually arrive as `delta` frames; the final frame
/// carries the fence-stripped body.
pub async fn handle_draft(
    State(state): State<AppState>,
    Json(request): Json<DraftRequest>,
) -> Result<Sse<EventStream>, AppError> {
    if request.question.trim().is_empty()
        || request.company_name.trim().is_empty()
        || request.job_position.trim().is_empty()
    {
        return Err(AppError::Validation(
            "문항, 회사명, 직무를 모두 입력해주세요.".to_string(),
        ));
    }

    let template = state.prompts.get(PromptKey::CoverLetter);
    let rendered = prompt::render(template, &request.formatting_context())?;

    let fragments = state
        .llm
        .stream(DRAFT_MODEL, &[ChatMessage::user(rendered)])
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
                    warn!("Draft stream failed: {e}");
                    sse::send_frame(&tx, &sse::error_frame("자기소개서 생성에 실패했습니다."))
                        .await;
                    sse::send_done(&tx).await;
                    return;
                }
            }
        }

        let (draft, parsed) = final_answer(accumulated.buffer());
        let frame = json!({
            "type": "final",
            "answer": draft,
            "parsed": parsed,
        });
        sse::send_frame(&tx, &frame).await;
        sse::send_done(&tx).await;
    });

    Ok(stream)
}
