//! Question generation over the web-search endpoint.
//!
//! Search-backed payloads are the least disciplined in the whole service,
//! so both paths lean hard on recovery: the common-question list can come
//! back as a wrapper object, a bare array, or numbered prose; the single
//! recommendation falls back through quoted lines down to a sentinel.

use serde::Deserialize;
use serde_json::Value;

use crate::errors::AppError;
use crate::llm_client::{SearchTier, Usage};
use crate::prompt::{self, FormattingContext, PromptKey};
use crate::recovery;
use crate::state::AppState;

use super::prompts;
use super::{COMMON_MODEL, RECOMMEND_MODEL};

/// Returned in the response body when no usable question survives recovery.
pub const COMMON_FAILURE: &str = "질문 생성에 실패했습니다. 다시 시도해주세요.";

/// Sentinel recommendation when every fallback comes up empty.
pub const RECOMMEND_FAILURE: &str = "질문 생성에 실패했습니다.";

/// Anything at or under this many characters is heading or filler, not a
/// question.
pub const MIN_QUESTION_CHARS: usize = 10;

pub const DEFAULT_NUM_QUESTIONS: usize = 3;

#[derive(Debug, Deserialize)]
pub struct CommonRequest {
    pub company_name: String,
    pub job_position: String,
    pub num_questions: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    pub company_name: String,
    pub job_position: String,
    #[serde(default)]
    pub jd: String,
}

/// Searches for commonly-asked questions. An empty result is not an
/// error here; the handler reports it in the response body.
pub async fn generate_common(
    state: &AppState,
    request: &CommonRequest,
) -> Result<(Vec<String>, Usage), AppError> {
    let num = request
        .num_questions
        .unwrap_or(DEFAULT_NUM_QUESTIONS)
        .clamp(1, recovery::DEFAULT_LIST_CAP);

    let context = FormattingContext::new()
        .set("company_name", request.company_name.as_str())
        .set("job_position", request.job_position.as_str())
        .set("num_questions", num.to_string());
    let rendered = prompt::render(state.prompts.get(PromptKey::CommonQuestions), &context)?;
    let input = format!("{}\n\n{}", prompts::SEARCH_EXPERT_PREAMBLE, rendered);

    let completion = state
        .llm
        .search(COMMON_MODEL, &input, SearchTier::High)
        .await?;

    Ok((recover_questions(&completion.text, num), completion.usage))
}

/// List recovery for the common-question payload. The structured rungs
/// return the model's list as-is; length filtering and de-duplication
/// happen only inside `string_list`'s loose rung, where the candidates
/// are scraped out of prose.
fn recover_questions(text: &str, num: usize) -> Vec<String> {
    let mut questions =
        recovery::string_list(text, "sample_questions", recovery::DEFAULT_LIST_CAP);
    questions.truncate(num);
    questions
}

/// Searches for one recommended question. Never fails past the transport:
/// recovery bottoms out at the sentinel instead.
pub async fn recommend(
    state: &AppState,
    request: &RecommendRequest,
) -> Result<(String, Usage), AppError> {
    let context = FormattingContext::new()
        .set("company_name", request.company_name.as_str())
        .set("job_position", request.job_position.as_str())
        .set("jd", request.jd.as_str());
    let rendered = prompt::render(state.prompts.get(PromptKey::RecommendQuestion), &context)?;

    let completion = state
        .llm
        .search(RECOMMEND_MODEL, &rendered, SearchTier::High)
        .await?;

    Ok((extract_recommendation(&completion.text), completion.usage))
}

/// Object ladder, then the first plausible quoted line, then the whole
/// text, then the sentinel.
fn extract_recommendation(text: &str) -> String {
    if let Ok(value) = recovery::json_object_with_key(text, "recommended_question") {
        if let Some(question) = value.get("recommended_question").and_then(Value::as_str) {
            return question.to_string();
        }
    }

    for line in text.lines() {
        let line = line.trim();
        if line.starts_with('#') || line.starts_with('-') {
            continue;
        }
        let unquoted = line
            .strip_prefix('"')
            .and_then(|l| l.strip_suffix('"'))
            .or_else(|| line.strip_prefix('“').and_then(|l| l.strip_suffix('”')));
        if let Some(question) = unquoted {
            let question = question.trim();
            if question.chars().count() > MIN_QUESTION_CHARS {
                return question.to_string();
            }
        }
    }

    let trimmed = text.trim();
    if trimmed.chars().count() > MIN_QUESTION_CHARS {
        return trimmed.to_string();
    }

    RECOMMEND_FAILURE.to_string()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::config::Config;
    use crate::llm_client::LlmClient;
    use crate::prompt::PromptLibrary;

    use super::*;

    fn state_for(server: &MockServer) -> AppState {
        AppState {
            llm: LlmClient::new(server.uri(), "test-key".to_string()),
            prompts: Arc::new(PromptLibrary::builtin()),
            config: Config {
                openai_api_key: "test-key".to_string(),
                openai_api_url: server.uri(),
                prompts_path: String::new(),
                port: 0,
                rust_log: "info".to_string(),
            },
        }
    }

    #[test]
    fn test_recover_questions_keeps_short_structured_items() {
        let text =
            r#"{"sample_questions": ["지원 동기는?", "입사 후 포부를 구체적으로 기술하시오."]}"#;
        assert_eq!(
            recover_questions(text, 3),
            vec!["지원 동기는?", "입사 후 포부를 구체적으로 기술하시오."]
        );
    }

    #[test]
    fn test_recover_questions_truncates_to_requested_count() {
        let text = r#"{"sample_questions": ["문항 하나", "문항 둘", "문항 셋"]}"#;
        assert_eq!(recover_questions(text, 2), vec!["문항 하나", "문항 둘"]);
    }

    #[test]
    fn test_recover_questions_loose_rung_still_filters_short_lines() {
        assert!(recover_questions("1. 네\n2. 아니요", 3).is_empty());
    }

    #[tokio::test]
    async fn test_generate_common_keeps_short_questions_from_structured_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/responses"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "output": [{"type": "message", "content": [{
                    "type": "output_text",
                    "text": r#"{"sample_questions": ["지원 동기는?", "입사 후 포부를 구체적으로 기술하시오."]}"#
                }]}],
                "usage": {"input_tokens": 20, "output_tokens": 10}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let state = state_for(&server);
        let request = CommonRequest {
            company_name: "카카오".to_string(),
            job_position: "백엔드 개발자".to_string(),
            num_questions: Some(3),
        };
        let (questions, usage) = generate_common(&state, &request).await.unwrap();

        assert_eq!(
            questions,
            vec!["지원 동기는?", "입사 후 포부를 구체적으로 기술하시오."]
        );
        assert_eq!(usage.prompt_tokens, 20);
    }

    #[test]
    fn test_extract_recommendation_from_object() {
        let text = r#"{"recommended_question": "카카오의 기술 블로그에서 인상 깊었던 글과 그 이유를 말해 보세요."}"#;
        assert_eq!(
            extract_recommendation(text),
            "카카오의 기술 블로그에서 인상 깊었던 글과 그 이유를 말해 보세요."
        );
    }

    #[test]
    fn test_extract_recommendation_from_quoted_line() {
        let text = "추천 문항은 다음과 같습니다.\n\n\"본인이 주도적으로 문제를 해결한 경험을 기술하시오.\"\n\n이 문항은 최근 공고에서 자주 보입니다.";
        assert_eq!(
            extract_recommendation(text),
            "본인이 주도적으로 문제를 해결한 경험을 기술하시오."
        );
    }

    #[test]
    fn test_extract_recommendation_skips_heading_and_list_lines() {
        let text = "# \"추천 문항 정리\"\n- \"이것은 목록에 있는 긴 후보 문항입니다.\"\n\"입사 후 포부를 구체적으로 기술하시오.\"";
        assert_eq!(
            extract_recommendation(text),
            "입사 후 포부를 구체적으로 기술하시오."
        );
    }

    #[test]
    fn test_extract_recommendation_whole_text_fallback() {
        let text = "  성장 과정에서 가장 큰 영향을 준 경험을 기술하시오.  ";
        assert_eq!(
            extract_recommendation(text),
            "성장 과정에서 가장 큰 영향을 준 경험을 기술하시오."
        );
    }

    #[test]
    fn test_extract_recommendation_sentinel_on_garbage() {
        assert_eq!(extract_recommendation("실패"), RECOMMEND_FAILURE);
        assert_eq!(extract_recommendation(""), RECOMMEND_FAILURE);
    }

    #[test]
    fn test_common_templates_render() {
        let context = FormattingContext::new()
            .set("company_name", "현대자동차")
            .set("job_position", "생산관리")
            .set("num_questions", "3");
        let rendered = prompt::render(prompts::COMMON_QUESTIONS_TEMPLATE, &context)
            .expect("all common-question placeholders should resolve");
        assert!(rendered.contains("현대자동차"));
        assert!(rendered.contains("3개"));

        let context = FormattingContext::new()
            .set("company_name", "현대자동차")
            .set("job_position", "생산관리")
            .set("jd", "");
        prompt::render(prompts::RECOMMEND_QUESTION_TEMPLATE, &context)
            .expect("all recommend placeholders should resolve");
    }
}
