//! Guide and answer-flow generation.
//!
//! Both endpoints want a markdown table back. The guide is advisory, so a
//! tableless payload degrades to raw text; the answer flow feeds later
//! drafting steps and is rejected when no table can be recovered.

use serde::Deserialize;
use tracing::warn;

use crate::errors::AppError;
use crate::interview::{render_transcript, Turn};
use crate::llm_client::{ChatMessage, Usage};
use crate::prompt::{self, FormattingContext, PromptKey};
use crate::recovery;
use crate::state::AppState;

use super::GUIDANCE_MODEL;

#[derive(Debug, Deserialize)]
pub struct GuideRequest {
    pub question: String,
    pub company_name: String,
    pub job_position: String,
    #[serde(default)]
    pub experience_level: String,
}

#[derive(Debug, Deserialize)]
pub struct FlowRequest {
    pub question: String,
    pub company_name: String,
    pub job_position: String,
    #[serde(default)]
    pub transcript: Vec<Turn>,
}

/// Lenient path: a missing table is logged and the trimmed text returned
/// as-is, the guide being advice rather than downstream input.
pub async fn generate_guide(
    state: &AppState,
    request: &GuideRequest,
) -> Result<(String, Usage), AppError> {
    let context = FormattingContext::new()
        .set("question", request.question.as_str())
        .set("company_name", request.company_name.as_str())
        .set("job_position", request.job_position.as_str())
        .set("experience_level", request.experience_level.as_str());
    let rendered = prompt::render(state.prompts.get(PromptKey::Guide), &context)?;

    let completion = state
        .llm
        .complete(GUIDANCE_MODEL, &[ChatMessage::user(rendered)])
        .await?;

    if recovery::markdown_table(&completion.text).is_err() {
        warn!("Guide payload had no markdown table; returning raw text");
    }
    Ok((
        recovery::markdown_table_or_text(&completion.text),
        completion.usage,
    ))
}

/// Strict path: no table means the payload is unusable for drafting, so
/// the caller gets a 422 instead of garbage.
pub async fn generate_answer_flow(
    state: &AppState,
    request: &FlowRequest,
) -> Result<(String, Usage), AppError> {
    let context = FormattingContext::new()
        .set("question", request.question.as_str())
        .set("company_name", request.company_name.as_str())
        .set("job_position", request.job_position.as_str())
        .set("conversation", render_transcript(&request.transcript));
    let rendered = prompt::render(state.prompts.get(PromptKey::AnswerFlow), &context)?;

    let completion = state
        .llm
        .complete(GUIDANCE_MODEL, &[ChatMessage::user(rendered)])
        .await?;

    let flow = recovery::markdown_table(&completion.text)
        .map_err(|e| AppError::UnprocessableEntity(e.to_string()))?;
    Ok((flow, completion.usage))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guide_template_renders() {
        let context = FormattingContext::new()
            .set("question", "지원 동기를 기술하시오.")
            .set("company_name", "LG전자")
            .set("job_position", "품질 엔지니어")
            .set("experience_level", "신입");
        let rendered = prompt::render(super::super::prompts::GUIDE_TEMPLATE, &context)
            .expect("all guide placeholders should resolve");
        assert!(rendered.contains("LG전자"));
        assert!(rendered.contains("| 단계 | 작성 포인트 | 예시 문장 |"));
    }

    #[test]
    fn test_flow_template_renders() {
        let context = FormattingContext::new()
            .set("question", "협업 경험을 기술하시오.")
            .set("company_name", "LG전자")
            .set("job_position", "품질 엔지니어")
            .set("conversation", "AI: 협업 경험이 있나요?\n학생: 네, 있습니다.");
        let rendered = prompt::render(super::super::prompts::ANSWER_FLOW_TEMPLATE, &context)
            .expect("all flow placeholders should resolve");
        assert!(rendered.contains("학생: 네, 있습니다."));
    }
}
