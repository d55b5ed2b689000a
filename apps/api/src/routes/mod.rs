pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;
use crate::{company, guidance, harness, interview, jd, letter, questions, report};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Interview simulation
        .route(
            "/api/v1/interview/question",
            post(interview::handlers::handle_question),
        )
        .route(
            "/api/v1/interview/reply",
            post(interview::handlers::handle_reply),
        )
        .route(
            "/api/v1/interview/memory",
            post(interview::handlers::handle_memory),
        )
        // Cover letter drafting
        .route("/api/v1/cover-letter", post(letter::handlers::handle_draft))
        // Writing guidance
        .route("/api/v1/guide", post(guidance::handlers::handle_guide))
        .route(
            "/api/v1/answer-flow",
            post(guidance::handlers::handle_answer_flow),
        )
        // Question tools
        .route(
            "/api/v1/questions/common",
            post(questions::handlers::handle_common),
        )
        .route(
            "/api/v1/questions/recommend",
            post(questions::handlers::handle_recommend),
        )
        // JD and company utilities
        .route("/api/v1/jd/recommend", post(jd::handlers::handle_recommend))
        .route(
            "/api/v1/company/industry",
            post(company::handlers::handle_industry),
        )
        .route("/api/v1/company/size", post(company::handlers::handle_size))
        // Company context report
        .route(
            "/api/v1/report/context",
            post(report::handlers::handle_context_report),
        )
        // Batch harness
        .route("/api/v1/harness/run", post(harness::handlers::handle_run))
        .with_state(state)
}
