// Interview simulation: streamed interviewer turns, simulated applicant
// replies, and the rolling memory summary.
// All LLM calls go through llm_client — no direct vendor calls here.

pub mod handlers;
pub mod prompts;
pub mod session;

pub use session::{render_transcript, InterviewContext, InterviewUpdate, Speaker, Turn};

/// Interviewer turns ride on the strongest chat model; the simulated
/// applicant and the memory summary do fine on the default one.
pub const INTERVIEWER_MODEL: &str = "gpt-4.1";
pub const STUDENT_MODEL: &str = "gpt-4o";
pub const MEMORY_MODEL: &str = "gpt-4o";
