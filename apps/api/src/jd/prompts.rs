// Prompt constants for JD recommendation.

/// System message for the JD writer persona.
pub const JD_SYSTEM: &str = "당신은 채용 공고 작성 전문가입니다. \
    회사와 직무가 주어지면 그 회사가 실제로 냈을 법한 채용 공고를 작성합니다. \
    You must generate the response in json format.";

/// Synthesizes a plausible JD when the applicant has none to paste in.
pub const RECOMMEND_JD_TEMPLATE: &str = r#"{company_name}의 {job_position} 직무 채용 공고를 작성해 주세요.

다음 항목을 포함합니다.
- 주요 업무
- 자격 요건
- 우대 사항

반드시 아래 JSON 형식으로만 응답하세요.
{"recommended_jd": "채용 공고 본문"}"#;
