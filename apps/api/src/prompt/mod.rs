//! Prompt assembly — `{placeholder}` templates rendered against a
//! per-call [`FormattingContext`].
//!
//! Assembly is the last gate before a model call: a template that
//! references a field the context does not carry fails here, loudly,
//! instead of sending a half-filled prompt to the model. No other
//! validation happens — empty strings and odd values pass through as-is.
//!
//! `{{` and `}}` escape literal braces; braces that do not wrap an
//! identifier (JSON examples, table syntax) are left untouched.

pub mod library;

pub use library::{PromptKey, PromptLibrary};

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PromptError {
    #[error("prompt template references {{{0}}} but the formatting context has no such field")]
    MissingField(String),
}

/// The placeholder values for one prompt rendering.
#[derive(Debug, Clone, Default)]
pub struct FormattingContext {
    fields: HashMap<String, String>,
}

impl FormattingContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field, builder-style.
    pub fn set(mut self, name: &str, value: impl Into<String>) -> Self {
        self.fields.insert(name.to_string(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{|\}\}|\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("valid regex")
});

/// Renders a template against a context.
///
/// Every identifier-shaped placeholder must resolve; the first unresolved
/// one is reported. Rendering is pure text substitution.
pub fn render(template: &str, context: &FormattingContext) -> Result<String, PromptError> {
    let mut missing: Option<String> = None;

    let rendered = PLACEHOLDER.replace_all(template, |caps: &Captures| -> String {
        match caps.get(1) {
            None => {
                // Escaped literal brace.
                if &caps[0] == "{{" { "{" } else { "}" }.to_string()
            }
            Some(name) => match context.get(name.as_str()) {
                Some(value) => value.to_string(),
                None => {
                    missing.get_or_insert_with(|| name.as_str().to_string());
                    String::new()
                }
            },
        }
    });

    match missing {
        Some(name) => Err(PromptError::MissingField(name)),
        None => Ok(rendered.into_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_substitutes_fields() {
        let context = FormattingContext::new()
            .set("company_name", "카카오")
            .set("job_position", "백엔드 개발자");
        let rendered = render("{company_name}의 {job_position} 면접입니다.", &context).unwrap();
        assert_eq!(rendered, "카카오의 백엔드 개발자 면접입니다.");
    }

    #[test]
    fn test_render_repeated_placeholder() {
        let context = FormattingContext::new().set("name", "지원자");
        let rendered = render("{name}님, {name}님의 차례입니다.", &context).unwrap();
        assert_eq!(rendered, "지원자님, 지원자님의 차례입니다.");
    }

    #[test]
    fn test_missing_field_fails_before_any_call() {
        let context = FormattingContext::new().set("question", "지원 동기는?");
        let result = render("{question}에 대해 {word_limit}자로 답하세요.", &context);
        assert_eq!(result, Err(PromptError::MissingField("word_limit".to_string())));
    }

    #[test]
    fn test_escaped_braces_render_literally() {
        let context = FormattingContext::new().set("key", "answer");
        let rendered = render(r#"응답 형식: {{"{key}": "..."}}"#, &context).unwrap();
        assert_eq!(rendered, r#"응답 형식: {"answer": "..."}"#);
    }

    #[test]
    fn test_json_example_braces_are_not_placeholders() {
        let template = r#"다음 형식을 따르세요: {"answer": "내용", "progress": 10}"#;
        let rendered = render(template, &FormattingContext::new()).unwrap();
        assert_eq!(rendered, template);
    }

    #[test]
    fn test_non_identifier_braces_untouched() {
        let rendered = render("범위는 {1..100} 입니다.", &FormattingContext::new()).unwrap();
        assert_eq!(rendered, "범위는 {1..100} 입니다.");
    }

    #[test]
    fn test_extra_context_fields_are_ignored() {
        let context = FormattingContext::new()
            .set("question", "자기소개")
            .set("unused", "값");
        assert_eq!(render("Q: {question}", &context).unwrap(), "Q: 자기소개");
    }
}
