//! Draft request shaping and final-text recovery for cover letters.

use serde::Deserialize;
use serde_json::Value;

use crate::errors::AppError;
use crate::interview::{render_transcript, Turn};
use crate::llm_client::{ChatMessage, Usage};
use crate::prompt::{self, FormattingContext, PromptKey};
use crate::recovery::{self, fence};
use crate::state::AppState;

use super::DRAFT_MODEL;

/// Character budget used when the caller does not pick one.
pub const DEFAULT_WORD_LIMIT: u32 = 300;

#[derive(Debug, Clone, Deserialize)]
pub struct DraftRequest {
    pub question: String,
    #[serde(default)]
    pub guideline: String,
    pub company_name: String,
    pub job_position: String,
    #[serde(default)]
    pub experience_level: String,
    pub word_limit: Option<u32>,
    #[serde(default)]
    pub transcript: Vec<Turn>,
}

impl DraftRequest {
    pub fn formatting_context(&self) -> FormattingContext {
        FormattingContext::new()
            .set("question", self.question.as_str())
            .set("guideline", self.guideline.as_str())
            .set("company_name", self.company_name.as_str())
            .set("job_position", self.job_position.as_str())
            .set("experience_level", self.experience_level.as_str())
            .set(
                "word_limit",
                self.word_limit.unwrap_or(DEFAULT_WORD_LIMIT).to_string(),
            )
            .set("conversation", render_transcript(&self.transcript))
    }
}

/// Recovers the draft body from an accumulated buffer.
///
/// Drafts are requested as plain prose, but models sometimes wrap them in
/// a JSON object or a code fence anyway. The flag reports whether the
/// structured form was found.
pub fn final_answer(buffer: &str) -> (String, bool) {
    if let Ok(value) = recovery::json_object(buffer) {
        if let Some(answer) = value.get("answer").and_then(Value::as_str) {
            return (fence::strip_fences(answer).to_string(), true);
        }
    }
    (fence::strip_fences(buffer).to_string(), false)
}

/// Non-streaming draft for the batch harness.
pub async fn compose_draft(
    state: &AppState,
    request: &DraftRequest,
) -> Result<(String, Usage), AppError> {
    let template = state.prompts.get(PromptKey::CoverLetter);
    let rendered = prompt::render(template, &request.formatting_context())?;
    let completion = state
        .llm
        .complete(DRAFT_MODEL, &[ChatMessage::user(rendered)])
        .await?;
    let (draft, _) = final_answer(&completion.text);
    Ok((draft, completion.usage))
}
