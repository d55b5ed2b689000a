// Prompt constants for company classification.

/// Industry tags. Tags are machine keys for the frontend filter, so the
/// prompt pins the exact format: lowercase, hyphenated, English.
pub const INDUSTRY_TEMPLATE: &str = r#"{company_name}의 {job_position} 직무를 기준으로 이 회사가 속한 산업 분야를 분류해 주세요.

- 태그는 소문자 영어 단어를 하이픈으로 이은 형태로 씁니다. 예: "it-software", "e-commerce"
- 가장 관련 있는 순서로 최대 5개까지만 고릅니다.
- 최신 사업 내용을 검색해 확인한 뒤 분류합니다.

반드시 아래 JSON 형식으로만 응답하세요.
{"industry_tags": ["it-software", "e-commerce"]}"#;

/// Company size. The answer rides inside a ```<category>``` marker so it
/// survives whatever analysis prose the search model wraps around it.
pub const COMPANY_SIZE_TEMPLATE: &str = r#"{company_name}의 기업 규모를 조사해 아래 분류 중 정확히 하나로 판정해 주세요.

[분류]
- 대기업
- 중견기업
- 중소기업
- 스타트업
- 외국계기업
- 공공기관 및 공기업
- 비영리단체 및 협회재단
- 금융업

판정 근거를 간단히 설명한 뒤, 마지막 줄에 판정 결과를 반드시 아래 형식으로 표시하세요.
```<분류명>```"#;
