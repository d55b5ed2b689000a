//! Typed recovery of the company context report.
//!
//! The report is the one payload other prompts consume as structured
//! input, so it is typed strictly: if any section fails to deserialize,
//! the whole report is replaced with the sentinel placeholder instead of
//! letting half-filled sections leak downstream.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::recovery;

/// Sentinel for narrative fields.
pub const UNAVAILABLE: &str = "정보를 가져올 수 없습니다.";

/// Sentinel entry for list fields.
pub const NO_DATA: &str = "정보 없음";

/// Company name in the placeholder report.
pub const PARSE_FAILED_NAME: &str = "파싱 실패";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub name: String,
    pub vision_mission: String,
    pub core_values: Vec<String>,
    pub talent_philosophy: String,
    pub recent_news_summary: String,
    pub main_products_services: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequiredSkills {
    pub hard: Vec<String>,
    pub soft: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionAnalysis {
    pub role_summary: String,
    pub required_skills: RequiredSkills,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndustryContext {
    pub trends: Vec<String>,
    pub competitors: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextReport {
    pub company_profile: CompanyProfile,
    pub position_analysis: PositionAnalysis,
    pub industry_context: IndustryContext,
}

impl ContextReport {
    /// Sentinel report substituted when recovery or typing fails.
    pub fn placeholder() -> Self {
        Self {
            company_profile: CompanyProfile {
                name: PARSE_FAILED_NAME.to_string(),
                vision_mission: UNAVAILABLE.to_string(),
                core_values: vec![NO_DATA.to_string()],
                talent_philosophy: UNAVAILABLE.to_string(),
                recent_news_summary: UNAVAILABLE.to_string(),
                main_products_services: vec![NO_DATA.to_string()],
            },
            position_analysis: PositionAnalysis {
                role_summary: UNAVAILABLE.to_string(),
                required_skills: RequiredSkills {
                    hard: vec![NO_DATA.to_string()],
                    soft: vec![NO_DATA.to_string()],
                },
                keywords: vec![NO_DATA.to_string()],
            },
            industry_context: IndustryContext {
                trends: vec![NO_DATA.to_string()],
                competitors: vec![NO_DATA.to_string()],
            },
        }
    }
}

/// A report plus the knowledge of where it came from.
#[derive(Debug, Clone)]
pub enum RecoveredReport {
    Parsed(ContextReport),
    Placeholder(ContextReport),
}

impl RecoveredReport {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, RecoveredReport::Placeholder(_))
    }

    pub fn into_inner(self) -> ContextReport {
        match self {
            RecoveredReport::Parsed(report) | RecoveredReport::Placeholder(report) => report,
        }
    }
}

/// Object ladder anchored on `company_profile`, then strict typing.
pub fn parse_report(text: &str) -> RecoveredReport {
    let value = match recovery::json_object_with_key(text, "company_profile") {
        Ok(value) => value,
        Err(e) => {
            warn!("Report recovery failed ({e}); substituting placeholder");
            return RecoveredReport::Placeholder(ContextReport::placeholder());
        }
    };
    match serde_json::from_value::<ContextReport>(value) {
        Ok(report) => RecoveredReport::Parsed(report),
        Err(e) => {
            warn!("Report typing failed ({e}); substituting placeholder");
            RecoveredReport::Placeholder(ContextReport::placeholder())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_report_json() -> String {
        serde_json::json!({
            "company_profile": {
                "name": "네이버",
                "vision_mission": "기술로 모두의 가능성을 연결한다",
                "core_values": ["도전", "신뢰"],
                "talent_philosophy": "스스로 문제를 정의하는 사람",
                "recent_news_summary": "하이퍼클로바X 라인업 확장",
                "main_products_services": ["검색", "커머스"]
            },
            "position_analysis": {
                "role_summary": "검색 품질 개선",
                "required_skills": {
                    "hard": ["Python", "대규모 데이터 처리"],
                    "soft": ["협업"]
                },
                "keywords": ["검색", "랭킹"]
            },
            "industry_context": {
                "trends": ["생성형 AI 검색"],
                "competitors": ["구글", "카카오"]
            }
        })
        .to_string()
    }

    #[test]
    fn test_parse_report_happy_path() {
        let recovered = parse_report(&full_report_json());
        assert!(!recovered.is_placeholder());
        let report = recovered.into_inner();
        assert_eq!(report.company_profile.name, "네이버");
        assert_eq!(report.position_analysis.required_skills.hard.len(), 2);
        assert_eq!(report.industry_context.competitors, vec!["구글", "카카오"]);
    }

    #[test]
    fn test_parse_report_fenced_payload() {
        let text = format!("분석 결과입니다.\n```json\n{}\n```", full_report_json());
        let recovered = parse_report(&text);
        assert!(!recovered.is_placeholder());
    }

    #[test]
    fn test_parse_report_missing_section_becomes_placeholder() {
        let text = r#"{"company_profile": {"name": "네이버"}}"#;
        let recovered = parse_report(text);
        assert!(recovered.is_placeholder());
        let report = recovered.into_inner();
        assert_eq!(report.company_profile.name, PARSE_FAILED_NAME);
        assert_eq!(report.industry_context.trends, vec![NO_DATA]);
    }

    #[test]
    fn test_parse_report_prose_becomes_placeholder() {
        let recovered = parse_report("검색 결과를 찾지 못했습니다.");
        assert!(recovered.is_placeholder());
        let report = recovered.into_inner();
        assert_eq!(report.company_profile.vision_mission, UNAVAILABLE);
    }

    #[test]
    fn test_placeholder_round_trips_through_serde() {
        let report = ContextReport::placeholder();
        let value = serde_json::to_value(&report).unwrap();
        let back: ContextReport = serde_json::from_value(value).unwrap();
        assert_eq!(back.company_profile.name, PARSE_FAILED_NAME);
    }
}
