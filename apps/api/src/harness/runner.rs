//! Case execution for the batch harness.
//!
//! A case failure is data, not an error: `run_case` always returns an
//! outcome, and the report renders whatever happened. Only transport
//! setup (prompt rendering, request validation) short-circuits a stage.

use std::time::Instant;

use chrono::{DateTime, Local};
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::cost::{self, CostRecord};
use crate::guidance::{self, FlowRequest, GuideRequest, GUIDANCE_MODEL};
use crate::interview::{self, session, InterviewContext, Speaker, Turn};
use crate::letter::{self, DraftRequest};
use crate::state::AppState;

use super::MAX_INTERVIEW_TURNS;

/// Question used when a case supplies none.
const DEFAULT_QUESTION: &str = "지원 동기와 입사 후 포부를 기술하시오.";

/// Interviewer turn substituted when the payload cannot be parsed.
const QUESTION_FAILURE_TURN: &str = "면접관 질문 생성 실패";

/// Experience summary given to the simulated applicant in default cases.
const DEFAULT_EXPERIENCE: &str = "학부 연구실에서 1년간 데이터 분석 프로젝트 수행, \
    교내 창업 동아리에서 서비스 기획과 출시 경험, 물류 스타트업에서 3개월 인턴";

#[derive(Debug, Clone, Deserialize)]
pub struct HarnessCase {
    pub company_name: String,
    pub job_position: String,
    #[serde(default)]
    pub jd: String,
    #[serde(default)]
    pub questions: Vec<String>,
    pub word_limit: Option<u32>,
    #[serde(default)]
    pub experience_summary: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CaseOutcome {
    pub case_id: usize,
    pub company_name: String,
    pub job_position: String,
    pub question: String,
    pub guide_ok: bool,
    pub interview_turns: usize,
    pub interview_complete: bool,
    pub flow_ok: bool,
    pub draft: String,
    pub error: Option<String>,
    pub duration_ms: u64,
    pub estimated_cost: f64,
}

impl CaseOutcome {
    fn new(case_id: usize, case: &HarnessCase) -> Self {
        Self {
            case_id,
            company_name: case.company_name.clone(),
            job_position: case.job_position.clone(),
            question: String::new(),
            guide_ok: false,
            interview_turns: 0,
            interview_complete: false,
            flow_ok: false,
            draft: String::new(),
            error: None,
            duration_ms: 0,
            estimated_cost: 0.0,
        }
    }

    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HarnessReport {
    pub generated_at: DateTime<Local>,
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub average_duration_ms: u64,
    pub estimated_cost: f64,
    pub outcomes: Vec<CaseOutcome>,
}

impl HarnessReport {
    pub fn from_outcomes(outcomes: Vec<CaseOutcome>) -> Self {
        let total = outcomes.len();
        let succeeded = outcomes.iter().filter(|o| o.succeeded()).count();
        let average_duration_ms = if total == 0 {
            0
        } else {
            outcomes.iter().map(|o| o.duration_ms).sum::<u64>() / total as u64
        };
        Self {
            generated_at: Local::now(),
            total,
            succeeded,
            failed: total - succeeded,
            average_duration_ms,
            estimated_cost: outcomes.iter().map(|o| o.estimated_cost).sum(),
            outcomes,
        }
    }
}

/// Built-in smoke cases covering a spread of industries.
pub fn default_cases() -> Vec<HarnessCase> {
    [
        ("삼성전자", "반도체 공정 엔지니어", "지원 동기와 입사 후 포부를 기술하시오."),
        ("카카오", "백엔드 개발자", "공동체와 함께 성장한 경험을 기술하시오."),
        ("네이버", "검색 엔지니어", "기술적으로 가장 어려웠던 문제와 해결 과정을 기술하시오."),
        ("현대자동차", "생산관리", "협업 과정에서 갈등을 해결한 경험을 기술하시오."),
        ("LG전자", "품질 엔지니어", "실패를 통해 배운 경험을 기술하시오."),
    ]
    .into_iter()
    .map(|(company, position, question)| HarnessCase {
        company_name: company.to_string(),
        job_position: position.to_string(),
        jd: String::new(),
        questions: vec![question.to_string()],
        word_limit: None,
        experience_summary: DEFAULT_EXPERIENCE.to_string(),
    })
    .collect()
}

/// Runs every case with bounded concurrency, then restores input order.
pub async fn run_cases(
    state: &AppState,
    cases: Vec<HarnessCase>,
    concurrency: usize,
) -> HarnessReport {
    let mut outcomes: Vec<CaseOutcome> = stream::iter(cases.into_iter().enumerate())
        .map(|(case_id, case)| {
            let state = state.clone();
            async move { run_case(&state, case_id, case).await }
        })
        .buffer_unordered(concurrency.max(1))
        .collect()
        .await;
    outcomes.sort_by_key(|outcome| outcome.case_id);
    HarnessReport::from_outcomes(outcomes)
}

async fn run_case(state: &AppState, case_id: usize, case: HarnessCase) -> CaseOutcome {
    let started = Instant::now();
    let mut records = Vec::new();
    let mut outcome = CaseOutcome::new(case_id, &case);

    info!(case_id, company = %case.company_name, "Harness case started");
    if let Err(message) = run_pipeline(state, &case, &mut outcome, &mut records).await {
        warn!(case_id, "Harness case failed: {message}");
        outcome.error = Some(message);
    }

    outcome.duration_ms = started.elapsed().as_millis() as u64;
    outcome.estimated_cost = records.iter().map(cost::estimate).sum();
    outcome
}

async fn run_pipeline(
    state: &AppState,
    case: &HarnessCase,
    outcome: &mut CaseOutcome,
    records: &mut Vec<CostRecord>,
) -> Result<(), String> {
    let question = case
        .questions
        .first()
        .cloned()
        .unwrap_or_else(|| DEFAULT_QUESTION.to_string());
    outcome.question = question.clone();

    // Stage 1: writing guide.
    let guide_request = GuideRequest {
        question: question.clone(),
        company_name: case.company_name.clone(),
        job_position: case.job_position.clone(),
        experience_level: "신입".to_string(),
    };
    let (_, usage) = guidance::generate_guide(state, &guide_request)
        .await
        .map_err(|e| format!("가이드 생성 실패: {e}"))?;
    records.push(CostRecord::from_usage(GUIDANCE_MODEL, None, &usage));
    outcome.guide_ok = true;

    // Stage 2: bounded interview simulation.
    let mut transcript: Vec<Turn> = Vec::new();
    let mut progress: u8 = 0;
    let mut rounds = 0;
    while rounds < MAX_INTERVIEW_TURNS && progress < 100 {
        let context = interview_context(case, transcript.clone());
        let (update, usage) = session::next_question(state, &context, progress)
            .await
            .map_err(|e| format!("면접관 턴 실패: {e}"))?;
        records.push(CostRecord::from_usage(
            interview::INTERVIEWER_MODEL,
            None,
            &usage,
        ));

        if update.parsed {
            progress = update.progress;
            transcript.push(Turn::interviewer(update.answer));
        } else {
            // Unparseable interviewer turn: substitute a marker and force
            // progress forward so the loop cannot stall at zero.
            progress = (20 * (rounds + 1)).min(100) as u8;
            transcript.push(Turn::interviewer(QUESTION_FAILURE_TURN));
        }
        if progress >= 100 {
            break;
        }

        let context = interview_context(case, transcript.clone());
        let (answer, usage) = session::simulated_reply(state, &context)
            .await
            .map_err(|e| format!("학생 턴 실패: {e}"))?;
        records.push(CostRecord::from_usage(interview::STUDENT_MODEL, None, &usage));
        transcript.push(Turn::student(answer));

        rounds += 1;
    }
    outcome.interview_turns = transcript
        .iter()
        .filter(|turn| turn.speaker == Speaker::Interviewer)
        .count();
    outcome.interview_complete = progress >= 100;

    // Stage 3: answer flow.
    let flow_request = FlowRequest {
        question: question.clone(),
        company_name: case.company_name.clone(),
        job_position: case.job_position.clone(),
        transcript: transcript.clone(),
    };
    let (_, usage) = guidance::generate_answer_flow(state, &flow_request)
        .await
        .map_err(|e| format!("답변 흐름 생성 실패: {e}"))?;
    records.push(CostRecord::from_usage(GUIDANCE_MODEL, None, &usage));
    outcome.flow_ok = true;

    // Stage 4: cover letter draft.
    let draft_request = DraftRequest {
        question,
        guideline: String::new(),
        company_name: case.company_name.clone(),
        job_position: case.job_position.clone(),
        experience_level: "신입".to_string(),
        word_limit: case.word_limit,
        transcript,
    };
    let (draft, usage) = letter::compose_draft(state, &draft_request)
        .await
        .map_err(|e| format!("자기소개서 생성 실패: {e}"))?;
    records.push(CostRecord::from_usage(letter::DRAFT_MODEL, None, &usage));
    outcome.draft = draft;

    Ok(())
}

fn interview_context(case: &HarnessCase, transcript: Vec<Turn>) -> InterviewContext {
    InterviewContext {
        company_name: case.company_name.clone(),
        position_title: case.job_position.clone(),
        industry: String::new(),
        core_values: String::new(),
        company_size: String::new(),
        context_report: String::new(),
        jd: case.jd.clone(),
        recent_issue: String::new(),
        student_name: "테스트 지원자".to_string(),
        student_major: "산업공학과".to_string(),
        student_status: "졸업 예정".to_string(),
        experience_summary: case.experience_summary.clone(),
        transcript,
    }
}
