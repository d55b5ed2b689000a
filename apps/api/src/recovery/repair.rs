//! Pre-parse repair for almost-JSON model output.
//!
//! Applied before every parse attempt in the object and report ladders.
//! The two defects models actually produce: pretty-printing with stray
//! indentation, and trailing commas before a closing brace or bracket.
//! Collapsing newline runs also flattens newlines inside string values;
//! recovered payloads are short-form answers, so the trade is acceptable.

use std::sync::LazyLock;

use regex::Regex;

static NEWLINE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*").expect("valid regex"));

static TRAILING_COMMA_OBJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*\}").expect("valid regex"));

static TRAILING_COMMA_ARRAY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*\]").expect("valid regex"));

/// Normalizes almost-JSON text so a strict parser has a chance.
pub fn repair_json(text: &str) -> String {
    let flattened = NEWLINE_RUNS.replace_all(text, " ");
    let objects_fixed = TRAILING_COMMA_OBJECT.replace_all(&flattened, "}");
    TRAILING_COMMA_ARRAY
        .replace_all(&objects_fixed, "]")
        .into_owned()
}
