//! Interview session types: transcript turns, the parsed interviewer
//! update, and the non-streaming service calls the batch harness uses.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;
use crate::llm_client::{ChatMessage, Usage};
use crate::prompt::{self, FormattingContext, PromptKey};
use crate::recovery;
use crate::state::AppState;

use super::prompts;
use super::{INTERVIEWER_MODEL, STUDENT_MODEL};

/// Shown in place of the question when the interviewer payload cannot be
/// recovered as JSON even after repair.
pub const ANSWER_UNAVAILABLE: &str = "응답을 처리하는 데 실패했습니다.";

/// Appended to the final interviewer message once progress reaches 100.
pub const CLOSING_NOTICE: &str = "면접이 종료되었습니다. 자기소개서 생성 탭으로 이동하세요.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    Interviewer,
    Student,
}

/// One utterance in the simulated interview.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    pub speaker: Speaker,
    pub content: String,
}

impl Turn {
    pub fn interviewer(content: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Interviewer,
            content: content.into(),
        }
    }

    pub fn student(content: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Student,
            content: content.into(),
        }
    }
}

/// Renders turns into the `{conversation}` block the prompts expect.
pub fn render_transcript(turns: &[Turn]) -> String {
    turns
        .iter()
        .map(|turn| match turn.speaker {
            Speaker::Interviewer => format!("AI: {}", turn.content),
            Speaker::Student => format!("학생: {}", turn.content),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Everything the interview prompts need to know about one session.
/// All fields except company and position are optional so that callers can
/// start an interview before the company analysis tools have run.
#[derive(Debug, Clone, Deserialize)]
pub struct InterviewContext {
    pub company_name: String,
    pub position_title: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub core_values: String,
    #[serde(default)]
    pub company_size: String,
    #[serde(default)]
    pub context_report: String,
    #[serde(default)]
    pub jd: String,
    #[serde(default)]
    pub recent_issue: String,
    #[serde(default)]
    pub student_name: String,
    #[serde(default)]
    pub student_major: String,
    #[serde(default)]
    pub student_status: String,
    #[serde(default)]
    pub experience_summary: String,
    #[serde(default)]
    pub transcript: Vec<Turn>,
}

impl InterviewContext {
    pub fn formatting_context(&self) -> FormattingContext {
        FormattingContext::new()
            .set("company_name", self.company_name.as_str())
            .set("position_title", self.position_title.as_str())
            .set("industry", self.industry.as_str())
            .set("core_values", self.core_values.as_str())
            .set("company_size", self.company_size.as_str())
            .set("context_report", self.context_report.as_str())
            .set("jd", self.jd.as_str())
            .set("recent_issue", self.recent_issue.as_str())
            .set("student_name", self.student_name.as_str())
            .set("student_major", self.student_major.as_str())
            .set("student_status", self.student_status.as_str())
            .set("experience_summary", self.experience_summary.as_str())
            .set("conversation", render_transcript(&self.transcript))
    }
}

/// One interviewer turn after JSON recovery.
///
/// `parsed` records whether the structured form was recovered; when it was
/// not, `answer` carries the raw model text and `progress` stays where the
/// caller last saw it so a single garbled turn never resets the session.
#[derive(Debug, Clone, Serialize)]
pub struct InterviewUpdate {
    pub answer: String,
    pub progress: u8,
    pub reasoning: Option<String>,
    pub parsed: bool,
}

impl InterviewUpdate {
    pub fn from_response(text: &str, previous_progress: u8) -> Self {
        match recovery::json_object(text) {
            Ok(value) => {
                let answer = value
                    .get("answer")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| ANSWER_UNAVAILABLE.to_string());
                let progress = coerce_progress(value.get("progress"), previous_progress);
                let reasoning = value
                    .get("reasoning_for_progress")
                    .and_then(Value::as_str)
                    .map(str::to_string);
                let mut update = Self {
                    answer,
                    progress,
                    reasoning,
                    parsed: true,
                };
                if update.is_complete() {
                    update.answer = format!("{}\n\n{}", update.answer, CLOSING_NOTICE);
                }
                update
            }
            Err(_) => Self {
                answer: text.trim().to_string(),
                progress: previous_progress,
                reasoning: None,
                parsed: false,
            },
        }
    }

    pub fn is_complete(&self) -> bool {
        self.progress >= 100
    }
}

/// Pulls the `answer` field out of a possibly fenced, possibly broken
/// payload. Falls back to the trimmed raw text; the flag reports whether
/// the structured form was recovered.
pub fn recover_answer(text: &str) -> (String, bool) {
    match recovery::json_object(text) {
        Ok(value) => match value.get("answer").and_then(Value::as_str) {
            Some(answer) => (answer.to_string(), true),
            None => (text.trim().to_string(), false),
        },
        Err(_) => (text.trim().to_string(), false),
    }
}

/// Models report progress as an integer, a float, or a quoted number
/// depending on the day. Anything out of range falls back to `previous`.
fn coerce_progress(raw: Option<&Value>, previous: u8) -> u8 {
    let candidate = match raw {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    match candidate {
        Some(p) if (0..=100).contains(&p) => p as u8,
        _ => previous,
    }
}

/// One non-streaming interviewer turn. The SSE handler has its own path;
/// this one exists for the harness, which wants the usage back for costing.
pub async fn next_question(
    state: &AppState,
    context: &InterviewContext,
    previous_progress: u8,
) -> Result<(InterviewUpdate, Usage), AppError> {
    let template = state.prompts.get(PromptKey::Interviewer);
    let rendered = prompt::render(template, &context.formatting_context())?;
    let completion = state
        .llm
        .complete(
            INTERVIEWER_MODEL,
            &[
                ChatMessage::system(prompts::JSON_FORMAT_SYSTEM),
                ChatMessage::user(rendered),
            ],
        )
        .await?;
    let update = InterviewUpdate::from_response(&completion.text, previous_progress);
    Ok((update, completion.usage))
}

/// One simulated applicant answer, for unattended harness runs.
pub async fn simulated_reply(
    state: &AppState,
    context: &InterviewContext,
) -> Result<(String, Usage), AppError> {
    let template = state.prompts.get(PromptKey::Student);
    let rendered = prompt::render(template, &context.formatting_context())?;
    let completion = state
        .llm
        .complete(
            STUDENT_MODEL,
            &[
                ChatMessage::system(prompts::JSON_FORMAT_SYSTEM),
                ChatMessage::user(rendered),
            ],
        )
        .await?;
    let (answer, _) = recover_answer(&completion.text);
    Ok((answer, completion.usage))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_transcript_labels_speakers() {
        let turns = vec![
            Turn::interviewer("자기소개 부탁드립니다."),
            Turn::student("안녕하세요, 김민준입니다."),
        ];
        assert_eq!(
            render_transcript(&turns),
            "AI: 자기소개 부탁드립니다.\n학생: 안녕하세요, 김민준입니다."
        );
    }

    #[test]
    fn test_render_transcript_empty() {
        assert_eq!(render_transcript(&[]), "");
    }

    #[test]
    fn test_update_from_well_formed_response() {
        let text = r#"{"answer": "가장 어려웠던 프로젝트는 무엇이었나요?", "progress": 40, "reasoning_for_progress": "경험 소재 1개 확보"}"#;
        let update = InterviewUpdate::from_response(text, 20);
        assert!(update.parsed);
        assert_eq!(update.answer, "가장 어려웠던 프로젝트는 무엇이었나요?");
        assert_eq!(update.progress, 40);
        assert_eq!(update.reasoning.as_deref(), Some("경험 소재 1개 확보"));
        assert!(!update.is_complete());
    }

    #[test]
    fn test_update_from_fenced_response() {
        let text = "```json\n{\"answer\": \"지원 동기를 말씀해 주세요.\", \"progress\": 10}\n```";
        let update = InterviewUpdate::from_response(text, 0);
        assert!(update.parsed);
        assert_eq!(update.answer, "지원 동기를 말씀해 주세요.");
        assert_eq!(update.progress, 10);
        assert_eq!(update.reasoning, None);
    }

    #[test]
    fn test_update_completion_appends_closing_notice() {
        let text = r#"{"answer": "수고하셨습니다.", "progress": 100}"#;
        let update = InterviewUpdate::from_response(text, 90);
        assert!(update.is_complete());
        assert_eq!(update.answer, format!("수고하셨습니다.\n\n{CLOSING_NOTICE}"));
    }

    #[test]
    fn test_update_parse_failure_keeps_previous_progress() {
        let update = InterviewUpdate::from_response("면접을 계속 진행하겠습니다.", 60);
        assert!(!update.parsed);
        assert_eq!(update.answer, "면접을 계속 진행하겠습니다.");
        assert_eq!(update.progress, 60);
    }

    #[test]
    fn test_update_missing_answer_uses_placeholder() {
        let text = r#"{"progress": 30}"#;
        let update = InterviewUpdate::from_response(text, 0);
        assert!(update.parsed);
        assert_eq!(update.answer, ANSWER_UNAVAILABLE);
        assert_eq!(update.progress, 30);
    }

    #[test]
    fn test_recover_answer_falls_back_to_raw_text() {
        let (answer, parsed) = recover_answer(r#"{"answer": "네, 해봤습니다."}"#);
        assert!(parsed);
        assert_eq!(answer, "네, 해봤습니다.");

        let (answer, parsed) = recover_answer("  네, 해봤습니다.  ");
        assert!(!parsed);
        assert_eq!(answer, "네, 해봤습니다.");
    }

    #[test]
    fn test_coerce_progress_accepts_float_and_string() {
        let float = serde_json::json!(55.7);
        assert_eq!(coerce_progress(Some(&float), 0), 55);

        let string = serde_json::json!("70");
        assert_eq!(coerce_progress(Some(&string), 0), 70);
    }

    #[test]
    fn test_coerce_progress_rejects_out_of_range() {
        let too_big = serde_json::json!(250);
        assert_eq!(coerce_progress(Some(&too_big), 45), 45);

        let negative = serde_json::json!(-5);
        assert_eq!(coerce_progress(Some(&negative), 45), 45);

        assert_eq!(coerce_progress(None, 45), 45);
    }

    #[test]
    fn test_formatting_context_covers_interviewer_placeholders() {
        let context = InterviewContext {
            company_name: "카카오".to_string(),
            position_title: "백엔드 개발자".to_string(),
            industry: String::new(),
            core_values: String::new(),
            company_size: String::new(),
            context_report: String::new(),
            jd: String::new(),
            recent_issue: String::new(),
            student_name: String::new(),
            student_major: String::new(),
            student_status: String::new(),
            experience_summary: String::new(),
            transcript: vec![Turn::interviewer("자기소개 부탁드립니다.")],
        };
        let rendered =
            prompt::render(prompts::INTERVIEWER_TEMPLATE, &context.formatting_context())
                .expect("all interviewer placeholders should resolve");
        assert!(rendered.contains("카카오"));
        assert!(rendered.contains("AI: 자기소개 부탁드립니다."));

        let rendered = prompt::render(prompts::STUDENT_TEMPLATE, &context.formatting_context())
            .expect("all student placeholders should resolve");
        assert!(rendered.contains("백엔드 개발자"));
    }
}
