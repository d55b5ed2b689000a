//! Markdown-table recovery ladder.
//!
//! Guides and answer flows are requested as Markdown tables. Models wrap
//! them in fences, preface them with commentary, or skip the table
//! entirely. Strategies, in order: interior of the first ```markdown / ```
//! fence, taken verbatim; otherwise every line whose trimmed form starts
//! and ends with `|`, joined in order, accepted only when at least
//! [`MIN_TABLE_LINES`] such lines exist (header, separator, one row).

use tracing::debug;

use crate::recovery::RecoveryError;

/// A pipe table needs a header, a separator, and at least one data row.
pub const MIN_TABLE_LINES: usize = 3;

/// Recovers a Markdown table from model output, or fails.
pub fn markdown_table(text: &str) -> Result<String, RecoveryError> {
    if let Some(block) = crate::recovery::fence::markdown_block(text) {
        return Ok(block.to_string());
    }

    let table_lines: Vec<&str> = text
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            trimmed.starts_with('|') && trimmed.ends_with('|')
        })
        .collect();

    if table_lines.len() >= MIN_TABLE_LINES {
        debug!(lines = table_lines.len(), "table recovered by pipe-line scan");
        return Ok(table_lines.join("\n"));
    }

    Err(RecoveryError::NoTable)
}

/// Lenient variant: the raw trimmed text when no table is recoverable.
///
/// Used by call sites that would rather show imperfect guidance than an
/// error.
pub fn markdown_table_or_text(text: &str) -> String {
    markdown_table(text).unwrap_or_else(|_| text.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const FENCED: &str = "설명을 덧붙이자면:\n```markdown\n| 단계 | 내용 |\n| --- | --- |\n| 도입 | 지원 동기 |\n```\n이상입니다.";

    #[test]
    fn test_fenced_table_returns_interior_verbatim() {
        let table = markdown_table(FENCED).unwrap();
        assert_eq!(table, "| 단계 | 내용 |\n| --- | --- |\n| 도입 | 지원 동기 |");
    }

    #[test]
    fn test_unfenced_table_collects_pipe_lines_in_order() {
        let text = "아래 표를 참고하세요.\n| 항목 | 설명 |\n| --- | --- |\n| 경험 | 프로젝트 |\n감사합니다.";
        let table = markdown_table(text).unwrap();
        assert_eq!(table, "| 항목 | 설명 |\n| --- | --- |\n| 경험 | 프로젝트 |");
    }

    #[test]
    fn test_indented_pipe_lines_are_kept_as_written() {
        let text = "  | a |\n  | - |\n  | 1 |";
        let table = markdown_table(text).unwrap();
        assert_eq!(table, "  | a |\n  | - |\n  | 1 |");
    }

    #[test]
    fn test_two_pipe_lines_are_not_a_table() {
        let text = "| 항목 |\n| --- |";
        assert_eq!(markdown_table(text), Err(RecoveryError::NoTable));
    }

    #[test]
    fn test_prose_fails_strict_mode() {
        assert_eq!(
            markdown_table("표를 만들 수 없습니다."),
            Err(RecoveryError::NoTable)
        );
    }

    #[test]
    fn test_lenient_mode_degrades_to_trimmed_text() {
        assert_eq!(
            markdown_table_or_text("  표 없이 설명만 드립니다.  "),
            "표 없이 설명만 드립니다."
        );
    }

    #[test]
    fn test_lenient_mode_still_prefers_table() {
        let table = markdown_table_or_text(FENCED);
        assert!(table.starts_with("| 단계 |"));
    }
}
