// Prompt constants for the writing guidance module. Both templates ask
// for a markdown table so the recovery layer can cut it out of whatever
// prose the model wraps around it.

/// Per-question writing guide, produced before the interview starts.
pub const GUIDE_TEMPLATE: &str = r#"당신은 자기소개서 첨삭 전문가입니다.
아래 자기소개서 문항에 대한 작성 가이드를 만들어 주세요.

[문항]
{question}

[지원 정보]
- 회사명: {company_name}
- 직무: {job_position}
- 경력 수준: {experience_level}

다음 열을 가진 마크다운 표로 작성하세요.
| 단계 | 작성 포인트 | 예시 문장 |

- 단계는 도입, 전개, 마무리 순서로 구성합니다.
- 작성 포인트에는 이 문항에서 평가자가 확인하려는 것을 적습니다.
- 예시 문장은 해당 회사와 직무에 맞춘 한 문장으로 씁니다.
- 표 외의 설명은 붙이지 않습니다."#;

/// Answer flow: the skeleton of one answer, distilled from the interview
/// transcript after it ends.
pub const ANSWER_FLOW_TEMPLATE: &str = r#"당신은 자기소개서 첨삭 전문가입니다.
아래 모의 면접 대화에서 확보된 소재로, 문항에 대한 답변의 흐름을 설계해 주세요.

[문항]
{question}

[지원 정보]
- 회사명: {company_name}
- 직무: {job_position}

[모의 면접 대화]
{conversation}

다음 열을 가진 마크다운 표로 작성하세요.
| 순서 | 내용 | 사용할 경험 |

- 순서는 답변에 등장할 문단 순서입니다.
- 내용에는 해당 문단이 전달할 메시지를 적습니다.
- 사용할 경험에는 대화에서 언급된 실제 경험만 적습니다.
- 표 외의 설명은 붙이지 않습니다."#;
