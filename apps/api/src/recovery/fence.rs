//! Code-fence helpers shared by the recovery ladders.

use std::sync::LazyLock;

use regex::Regex;

static JSON_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```(?:json)?\s*([\s\S]*?)\s*```").expect("valid regex"));

static MARKDOWN_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```(?:markdown)?\s*([\s\S]*?)\s*```").expect("valid regex"));

/// Returns the interior of the first ```json (or untagged) fence.
pub fn json_block(text: &str) -> Option<&str> {
    JSON_FENCE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Returns the interior of the first ```markdown (or untagged) fence.
pub fn markdown_block(text: &str) -> Option<&str> {
    MARKDOWN_FENCE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Strips a surrounding ```json / ```markdown / ``` fence, if present.
///
/// Unlike [`json_block`], this only peels fences that wrap the whole text;
/// it never extracts an embedded block. Used to clean final streamed
/// answers before they are shown to the user.
pub fn strip_fences(text: &str) -> &str {
    let text = text.trim();
    let stripped = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```markdown"))
        .or_else(|| text.strip_prefix("```"));
    match stripped {
        Some(inner) => {
            let inner = inner.trim_start();
            inner
                .strip_suffix("```")
                .map(str::trim)
                .unwrap_or(inner)
                .trim_end()
        }
        None => text,
    }
}
