// Prompt constants for the question tools. These ride on the web-search
// endpoint, which has no system slot, so the JSON instruction lives in
// the preamble and templates themselves.

/// Prefixed to the rendered common-questions template before the search
/// call.
pub const SEARCH_EXPERT_PREAMBLE: &str = "당신은 대한민국 채용 시장의 자기소개서 문항을 연구하는 전문가입니다. \
    최신 채용 공고와 합격 후기를 검색해 근거를 확보한 뒤 답하세요. \
    You must generate the response in json format.";

/// Commonly-asked questions for one company and position.
pub const COMMON_QUESTIONS_TEMPLATE: &str = r#"{company_name}의 {job_position} 직무 자기소개서에서 실제로 자주 출제되는 문항을 {num_questions}개 찾아 주세요.

- 해당 회사의 최근 공고에서 출제된 문항을 우선합니다.
- 최근 공고를 찾지 못하면 같은 업계에서 자주 나오는 문항으로 대체합니다.
- 각 문항은 완전한 문장으로 씁니다.

반드시 아래 JSON 형식으로만 응답하세요.
{"sample_questions": ["문항 1", "문항 2"]}"#;

/// One recommended question, tailored to the company and JD.
pub const RECOMMEND_QUESTION_TEMPLATE: &str = r#"당신은 대한민국 채용 시장의 자기소개서 문항을 연구하는 전문가입니다.
{company_name}의 {job_position} 직무 지원자가 미리 준비해 두면 좋을 자기소개서 문항을 하나만 추천해 주세요.

[채용 공고]
{jd}

- 회사의 최근 이슈나 공고 내용과 맞닿은 문항을 고릅니다.
- 문항은 완전한 문장 하나로 씁니다.

반드시 아래 JSON 형식으로만 응답하세요.
{"recommended_question": "추천 문항"}"#;
