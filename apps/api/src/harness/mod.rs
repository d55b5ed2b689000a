// Batch harness: runs whole drafting pipelines (guide → interview →
// answer flow → cover letter) over a case list and renders an HTML
// report with per-case outcomes and cost estimates.

pub mod handlers;
pub mod html;
pub mod runner;

pub use runner::{default_cases, run_cases, CaseOutcome, HarnessCase, HarnessReport};

pub const DEFAULT_CONCURRENCY: usize = 10;

/// Hard cap on interviewer/applicant rounds per case, in case progress
/// never reaches 100.
pub const MAX_INTERVIEW_TURNS: usize = 20;
