//! JSON-object recovery ladder.
//!
//! Strategies, in order:
//!   1. interior of the first ```json / ``` fence (else the whole trimmed
//!      text), repaired, parsed;
//!   2. the first-`{`-to-last-`}` span of that same candidate, repaired,
//!      parsed.
//!
//! A parse only counts if it yields a JSON object; the required-key variant
//! additionally rejects objects missing the key and keeps climbing.

use serde_json::Value;
use tracing::debug;

use crate::recovery::{fence, repair, RecoveryError};

/// Recovers a JSON object from model output.
pub fn json_object(text: &str) -> Result<Value, RecoveryError> {
    scan(text, |_| true).ok_or(RecoveryError::NoJsonObject)
}

/// Recovers a JSON object that must contain `key` at the top level.
///
/// An object without the key is treated as a failed strategy, not a final
/// answer, so a later rung can still produce the right object.
pub fn json_object_with_key(text: &str, key: &str) -> Result<Value, RecoveryError> {
    scan(text, |value| value.get(key).is_some()).ok_or_else(|| RecoveryError::MissingKey {
        key: key.to_string(),
    })
}

fn scan(text: &str, accept: impl Fn(&Value) -> bool) -> Option<Value> {
    let candidate = fence::json_block(text).unwrap_or_else(|| text.trim());

    if let Some(value) = attempt(candidate) {
        if accept(&value) {
            return Some(value);
        }
    }

    let span = brace_span(candidate)?;
    debug!(len = span.len(), "json recovery fell back to brace span");
    attempt(span).filter(accept)
}

/// One parse attempt: repair, parse, keep only objects.
fn attempt(candidate: &str) -> Option<Value> {
    let repaired = repair::repair_json(candidate);
    serde_json::from_str::<Value>(&repaired)
        .ok()
        .filter(Value::is_object)
}

/// The span from the first `{` to the last `}`, when it exists.
fn brace_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}
