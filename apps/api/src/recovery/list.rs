//! Flat string-list recovery ladder.
//!
//! Used for generated question lists and industry tags. Strategies, in
//! order:
//!   1. object with the caller's wrapper key holding an array of strings;
//!   2. the fence interior (or whole text), repaired, parsed as a bare
//!      JSON array of strings;
//!   3. quoted strings inside the first `[...]` span;
//!   4. loose patterns over the whole text: long quoted strings and
//!      `1.`-numbered lines, de-duplicated and capped.
//!
//! This mode never hard-fails; an empty `Vec` is the recoverable bottom.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::recovery::{fence, json, repair};

/// Cap applied to loose-pattern extraction, which is noisy by nature.
pub const DEFAULT_LIST_CAP: usize = 5;

/// Minimum length (in characters) for a loose quoted string to count.
const LOOSE_QUOTED_MIN_CHARS: usize = 20;

/// Minimum length (in characters) for any loose item to survive filtering.
const LOOSE_ITEM_MIN_CHARS: usize = 15;

static QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"]+)""#).expect("valid regex"));

static LOOSE_QUOTED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r#""([^"]{{{LOOSE_QUOTED_MIN_CHARS},}})""#)).expect("valid regex")
});

static NUMBERED_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*\d+\.\s*(.+)$").expect("valid regex"));

/// Recovers a flat list of strings from model output.
///
/// `cap` bounds the loose-pattern rung only; the structured rungs return
/// whatever the model actually listed and leave trimming to the caller.
pub fn string_list(text: &str, wrapper_key: &str, cap: usize) -> Vec<String> {
    if let Ok(object) = json::json_object_with_key(text, wrapper_key) {
        let items = array_of_strings(object.get(wrapper_key));
        if !items.is_empty() {
            return items;
        }
    }

    let candidate = fence::json_block(text).unwrap_or_else(|| text.trim());
    let repaired = repair::repair_json(candidate);
    if let Ok(value) = serde_json::from_str::<Value>(&repaired) {
        if value.is_array() {
            let items = array_of_strings(Some(&value));
            if !items.is_empty() {
                return items;
            }
        }
    }

    if let Some(span) = bracket_span(text) {
        let quoted: Vec<String> = QUOTED
            .captures_iter(span)
            .map(|caps| caps[1].to_string())
            .collect();
        if !quoted.is_empty() {
            debug!(items = quoted.len(), "list recovered from bracket span");
            return quoted;
        }
    }

    loose_items(text, cap)
}

fn array_of_strings(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// The span from the first `[` to the first `]` after it.
fn bracket_span(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let len = text[start..].find(']')?;
    Some(&text[start..=start + len])
}

/// Last-resort extraction: long quoted strings, then numbered lines.
fn loose_items(text: &str, cap: usize) -> Vec<String> {
    let mut items: Vec<String> = Vec::new();

    let candidates = LOOSE_QUOTED
        .captures_iter(text)
        .chain(NUMBERED_LINE.captures_iter(text))
        .map(|caps| caps[1].trim().to_string());

    for item in candidates {
        if items.len() >= cap {
            break;
        }
        if item.chars().count() > LOOSE_ITEM_MIN_CHARS && !items.contains(&item) {
            items.push(item);
        }
    }

    if !items.is_empty() {
        debug!(items = items.len(), "list recovered from loose patterns");
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapper_key_object_returns_the_list() {
        let text = r#"{"sample_questions": ["지원 동기를 말씀해 주세요", "입사 후 포부를 말씀해 주세요"]}"#;
        let items = string_list(text, "sample_questions", DEFAULT_LIST_CAP);
        assert_eq!(
            items,
            vec!["지원 동기를 말씀해 주세요", "입사 후 포부를 말씀해 주세요"]
        );
    }

    #[test]
    fn test_bare_array_round_trips() {
        let text = r#"["질문1", "질문2", "질문3"]"#;
        let items = string_list(text, "sample_questions", DEFAULT_LIST_CAP);
        assert_eq!(items, vec!["질문1", "질문2", "질문3"]);
    }

    #[test]
    fn test_fenced_array_with_trailing_comma() {
        let text = "```json\n[\"platform-portal\", \"it-solution\",]\n```";
        let items = string_list(text, "industries", DEFAULT_LIST_CAP);
        assert_eq!(items, vec!["platform-portal", "it-solution"]);
    }

    #[test]
    fn test_bracket_span_inside_prose() {
        let text = r#"분류 결과는 ["platform-portal", "game"] 입니다."#;
        let items = string_list(text, "industries", DEFAULT_LIST_CAP);
        assert_eq!(items, vec!["platform-portal", "game"]);
    }

    #[test]
    fn test_numbered_lines_as_last_resort() {
        let text = "추천 질문은 다음과 같습니다.\n1. 본인의 강점과 약점을 솔직하게 말씀해 주세요\n2. 우리 회사에 지원하게 된 동기가 무엇인가요\n3. 입사 후 5년 뒤 본인의 모습을 설명해 주세요";
        let items = string_list(text, "sample_questions", DEFAULT_LIST_CAP);
        assert_eq!(items.len(), 3);
        assert_eq!(items[0], "본인의 강점과 약점을 솔직하게 말씀해 주세요");
    }

    #[test]
    fn test_loose_items_are_capped() {
        let text = (1..=8)
            .map(|i| format!("{i}. 충분히 길이가 되는 예상 면접 질문 번호 {i}"))
            .collect::<Vec<_>>()
            .join("\n");
        let items = string_list(&text, "sample_questions", DEFAULT_LIST_CAP);
        assert_eq!(items.len(), DEFAULT_LIST_CAP);
    }

    #[test]
    fn test_loose_items_are_deduplicated() {
        let text = "1. 지원 동기를 구체적으로 말씀해 주세요\n2. 지원 동기를 구체적으로 말씀해 주세요";
        let items = string_list(text, "sample_questions", DEFAULT_LIST_CAP);
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_short_loose_items_are_filtered() {
        let text = "1. 네\n2. 아니요";
        assert!(string_list(text, "sample_questions", DEFAULT_LIST_CAP).is_empty());
    }

    #[test]
    fn test_no_structure_yields_empty_vec() {
        assert!(string_list("질문을 만들 수 없습니다.", "sample_questions", DEFAULT_LIST_CAP).is_empty());
    }

    #[test]
    fn test_non_string_array_items_fall_through_to_empty() {
        let text = r#"{"sample_questions": [1, 2, 3]}"#;
        assert!(string_list(text, "sample_questions", DEFAULT_LIST_CAP).is_empty());
    }
}
