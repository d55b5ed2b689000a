// Prompt constants for the company context report.

/// Prefixed to the rendered report template before the search call.
pub const ANALYST_PREAMBLE: &str = "당신은 기업 분석 전문가입니다. \
    최신 공시, 뉴스, 채용 공고를 검색해 근거를 확보한 뒤 보고서를 작성하세요. \
    You must generate the response in json format.";

/// Full report schema. Field names here must match the `ContextReport`
/// deserialization exactly; a renamed field silently downgrades every
/// report to the placeholder.
pub const CONTEXT_REPORT_TEMPLATE: &str = r#"{company_name}의 {job_position} 직무({experience_level}) 지원자를 위한 기업 분석 보고서를 작성해 주세요.

반드시 아래 JSON 형식으로만 응답하세요. 모든 필드를 채워야 합니다.
{
  "company_profile": {
    "name": "회사명",
    "vision_mission": "비전과 미션 요약",
    "core_values": ["핵심 가치 1", "핵심 가치 2"],
    "talent_philosophy": "인재상 요약",
    "recent_news_summary": "최근 1년 내 주요 뉴스 요약",
    "main_products_services": ["주력 제품/서비스 1", "주력 제품/서비스 2"]
  },
  "position_analysis": {
    "role_summary": "직무 요약",
    "required_skills": {
      "hard": ["하드 스킬 1", "하드 스킬 2"],
      "soft": ["소프트 스킬 1", "소프트 스킬 2"]
    },
    "keywords": ["자기소개서에 쓸 키워드 1", "키워드 2"]
  },
  "industry_context": {
    "trends": ["산업 트렌드 1", "트렌드 2"],
    "competitors": ["주요 경쟁사 1", "경쟁사 2"]
  }
}"#;
