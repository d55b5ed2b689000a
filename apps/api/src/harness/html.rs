//! Static HTML rendering for harness reports.
//!
//! Everything interpolated from model output goes through [`escape`];
//! drafts and errors are untrusted text.

use super::runner::{CaseOutcome, HarnessReport};

const DRAFT_EXCERPT_CHARS: usize = 80;

pub fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn excerpt(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{cut}…")
}

fn check_mark(ok: bool) -> &'static str {
    if ok {
        "✅"
    } else {
        "❌"
    }
}

pub fn render_report(report: &HarnessReport) -> String {
    let mut page = String::with_capacity(4096);
    page.push_str(
        "<!DOCTYPE html>\n<html lang=\"ko\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>자기소개서 파이프라인 테스트 리포트</title>\n<style>\n\
         body { font-family: 'Apple SD Gothic Neo', 'Malgun Gothic', sans-serif; margin: 2rem; color: #222; }\n\
         h1 { font-size: 1.4rem; }\n\
         ul.summary { list-style: none; padding: 0; }\n\
         ul.summary li { margin: 0.2rem 0; }\n\
         table { border-collapse: collapse; width: 100%; margin-top: 1rem; }\n\
         th, td { border: 1px solid #ccc; padding: 0.4rem 0.6rem; font-size: 0.85rem; text-align: left; vertical-align: top; }\n\
         th { background: #f5f5f5; }\n\
         td.error { color: #b00020; }\n\
         </style>\n</head>\n<body>\n",
    );

    page.push_str("<h1>자기소개서 파이프라인 테스트 리포트</h1>\n");
    page.push_str(&format!(
        "<p>생성 시각: {}</p>\n",
        report.generated_at.format("%Y-%m-%d %H:%M:%S")
    ));

    page.push_str("<ul class=\"summary\">\n");
    page.push_str(&format!("<li>총 테스트 케이스: {}</li>\n", report.total));
    page.push_str(&format!("<li>성공한 케이스: {}</li>\n", report.succeeded));
    page.push_str(&format!("<li>실패한 케이스: {}</li>\n", report.failed));
    page.push_str(&format!(
        "<li>평균 처리 시간: {}ms</li>\n",
        report.average_duration_ms
    ));
    page.push_str(&format!(
        "<li>예상 비용: ${:.4}</li>\n",
        report.estimated_cost
    ));
    page.push_str("</ul>\n");

    page.push_str(
        "<table>\n<thead>\n<tr>\
         <th>#</th><th>회사</th><th>직무</th><th>문항</th>\
         <th>가이드</th><th>면접 턴</th><th>면접 완료</th><th>답변 흐름</th>\
         <th>자기소개서</th><th>오류</th><th>처리 시간</th><th>비용</th>\
         </tr>\n</thead>\n<tbody>\n",
    );
    for outcome in &report.outcomes {
        page.push_str(&render_row(outcome));
    }
    page.push_str("</tbody>\n</table>\n</body>\n</html>\n");

    page
}

fn render_row(outcome: &CaseOutcome) -> String {
    format!(
        "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td>\
         <td>{}</td><td>{}</td><td>{}</td><td>{}</td>\
         <td>{}</td><td class=\"error\">{}</td><td>{}ms</td><td>${:.4}</td></tr>\n",
        outcome.case_id + 1,
        escape(&outcome.company_name),
        escape(&outcome.job_position),
        escape(&outcome.question),
        check_mark(outcome.guide_ok),
        outcome.interview_turns,
        check_mark(outcome.interview_complete),
        check_mark(outcome.flow_ok),
        escape(&excerpt(&outcome.draft, DRAFT_EXCERPT_CHARS)),
        escape(outcome.error.as_deref().unwrap_or("-")),
        outcome.duration_ms,
        outcome.estimated_cost,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harness::default_cases;

    #[test]
    fn test_escape_neutralizes_markup() {
        assert_eq!(
            escape(r#"<script>alert("x")</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt;"
        );
        assert_eq!(escape("A & B"), "A &amp; B");
    }

    #[test]
    fn test_excerpt_truncates_on_char_boundary() {
        let long = "가".repeat(100);
        let cut = excerpt(&long, 80);
        assert_eq!(cut.chars().count(), 81);
        assert!(cut.ends_with('…'));

        assert_eq!(excerpt("짧은 초안", 80), "짧은 초안");
    }

    #[test]
    fn test_render_empty_report() {
        let page = render_report(&HarnessReport::from_outcomes(vec![]));
        assert!(page.contains("총 테스트 케이스: 0"));
        assert!(page.contains("평균 처리 시간: 0ms"));
    }

    #[test]
    fn test_render_report_escapes_model_text() {
        let cases = default_cases();
        let bad = CaseOutcome {
            case_id: 0,
            company_name: cases[0].company_name.clone(),
            job_position: cases[0].job_position.clone(),
            question: "지원 동기".to_string(),
            guide_ok: true,
            interview_turns: 3,
            interview_complete: true,
            flow_ok: true,
            draft: "<b>굵게</b> & 추가".to_string(),
            error: None,
            duration_ms: 1200,
            estimated_cost: 0.0123,
        };
        let page = render_report(&HarnessReport::from_outcomes(vec![bad]));
        assert!(!page.contains("<b>굵게</b>"));
        assert!(page.contains("&lt;b&gt;굵게&lt;/b&gt; &amp; 추가"));
        assert!(page.contains("삼성전자"));
        assert!(page.contains("$0.0123"));
    }
}
