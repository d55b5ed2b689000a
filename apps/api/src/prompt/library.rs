//! Prompt library — feature templates resolved once at startup.
//!
//! Operators can override any template through a TOML file (path from
//! config); every feature also carries a built-in template so the service
//! starts and works with no file at all. Load problems degrade to the
//! built-ins with a log line, never a startup failure.
//!
//! File format:
//!
//! ```toml
//! [templates]
//! guide = """..."""
//! interviewer = """..."""
//! ```

use std::collections::HashMap;

use serde::Deserialize;
use tracing::{info, warn};

/// Every prompt the service can send, one key per feature call shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromptKey {
    Interviewer,
    Student,
    Memory,
    CoverLetter,
    Guide,
    AnswerFlow,
    CommonQuestions,
    RecommendQuestion,
    RecommendJd,
    Industry,
    CompanySize,
    ContextReport,
}

impl PromptKey {
    pub const ALL: [PromptKey; 12] = [
        PromptKey::Interviewer,
        PromptKey::Student,
        PromptKey::Memory,
        PromptKey::CoverLetter,
        PromptKey::Guide,
        PromptKey::AnswerFlow,
        PromptKey::CommonQuestions,
        PromptKey::RecommendQuestion,
        PromptKey::RecommendJd,
        PromptKey::Industry,
        PromptKey::CompanySize,
        PromptKey::ContextReport,
    ];

    /// Name used in the TOML override file.
    pub fn as_str(self) -> &'static str {
        match self {
            PromptKey::Interviewer => "interviewer",
            PromptKey::Student => "student",
            PromptKey::Memory => "memory",
            PromptKey::CoverLetter => "cover_letter",
            PromptKey::Guide => "guide",
            PromptKey::AnswerFlow => "answer_flow",
            PromptKey::CommonQuestions => "common_questions",
            PromptKey::RecommendQuestion => "recommend_question",
            PromptKey::RecommendJd => "recommend_jd",
            PromptKey::Industry => "industry",
            PromptKey::CompanySize => "company_size",
            PromptKey::ContextReport => "context_report",
        }
    }

    fn from_name(name: &str) -> Option<PromptKey> {
        PromptKey::ALL.iter().find(|key| key.as_str() == name).copied()
    }

    /// The compiled-in fallback template for this key.
    fn builtin(self) -> &'static str {
        match self {
            PromptKey::Interviewer => crate::interview::prompts::INTERVIEWER_TEMPLATE,
            PromptKey::Student => crate::interview::prompts::STUDENT_TEMPLATE,
            PromptKey::Memory => crate::interview::prompts::MEMORY_TEMPLATE,
            PromptKey::CoverLetter => crate::letter::prompts::COVER_LETTER_TEMPLATE,
            PromptKey::Guide => crate::guidance::prompts::GUIDE_TEMPLATE,
            PromptKey::AnswerFlow => crate::guidance::prompts::ANSWER_FLOW_TEMPLATE,
            PromptKey::CommonQuestions => crate::questions::prompts::COMMON_QUESTIONS_TEMPLATE,
            PromptKey::RecommendQuestion => crate::questions::prompts::RECOMMEND_QUESTION_TEMPLATE,
            PromptKey::RecommendJd => crate::jd::prompts::RECOMMEND_JD_TEMPLATE,
            PromptKey::Industry => crate::company::prompts::INDUSTRY_TEMPLATE,
            PromptKey::CompanySize => crate::company::prompts::COMPANY_SIZE_TEMPLATE,
            PromptKey::ContextReport => crate::report::prompts::CONTEXT_REPORT_TEMPLATE,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct PromptFile {
    #[serde(default)]
    templates: HashMap<String, String>,
}

/// Resolved templates: overrides where given, built-ins everywhere else.
#[derive(Debug, Default)]
pub struct PromptLibrary {
    overrides: HashMap<PromptKey, String>,
}

impl PromptLibrary {
    /// A library with no overrides.
    pub fn builtin() -> Self {
        Self::default()
    }

    /// Loads overrides from `path`, falling back to built-ins on any
    /// problem.
    pub fn load_or_builtin(path: &str) -> Self {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(error) => {
                info!(path, %error, "no prompt file, using built-in templates");
                return Self::builtin();
            }
        };

        let file: PromptFile = match toml::from_str(&raw) {
            Ok(file) => file,
            Err(error) => {
                warn!(path, %error, "invalid prompt file, using built-in templates");
                return Self::builtin();
            }
        };

        let mut overrides = HashMap::new();
        for (name, template) in file.templates {
            match PromptKey::from_name(&name) {
                Some(key) => {
                    overrides.insert(key, template);
                }
                None => warn!(%name, "unknown template name in prompt file, ignoring"),
            }
        }

        info!(path, overridden = overrides.len(), "prompt file loaded");
        Self { overrides }
    }

    pub fn get(&self, key: PromptKey) -> &str {
        self.overrides
            .get(&key)
            .map(String::as_str)
            .unwrap_or_else(|| key.builtin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_library_resolves_every_key() {
        let library = PromptLibrary::builtin();
        for key in PromptKey::ALL {
            assert!(!library.get(key).trim().is_empty(), "{:?} has no template", key);
        }
    }

    #[test]
    fn test_missing_file_falls_back_to_builtin() {
        let library = PromptLibrary::load_or_builtin("/nonexistent/prompts.toml");
        assert_eq!(library.get(PromptKey::Guide), PromptKey::Guide.builtin());
    }

    #[test]
    fn test_file_overrides_only_named_templates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prompts.toml");
        std::fs::write(&path, "[templates]\nguide = \"재작성된 {question} 가이드\"\n").unwrap();

        let library = PromptLibrary::load_or_builtin(path.to_str().unwrap());
        assert_eq!(library.get(PromptKey::Guide), "재작성된 {question} 가이드");
        assert_eq!(
            library.get(PromptKey::AnswerFlow),
            PromptKey::AnswerFlow.builtin()
        );
    }

    #[test]
    fn test_invalid_toml_falls_back_to_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prompts.toml");
        std::fs::write(&path, "[templates\nguide = broken").unwrap();

        let library = PromptLibrary::load_or_builtin(path.to_str().unwrap());
        assert_eq!(library.get(PromptKey::Guide), PromptKey::Guide.builtin());
    }

    #[test]
    fn test_unknown_names_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prompts.toml");
        std::fs::write(&path, "[templates]\nnot_a_feature = \"값\"\n").unwrap();

        let library = PromptLibrary::load_or_builtin(path.to_str().unwrap());
        assert_eq!(library.get(PromptKey::Guide), PromptKey::Guide.builtin());
    }

    #[test]
    fn test_key_names_round_trip() {
        for key in PromptKey::ALL {
            assert_eq!(PromptKey::from_name(key.as_str()), Some(key));
        }
    }
}
