// Cover letter drafting from interview transcripts.
// All LLM calls go through llm_client — no direct vendor calls here.

pub mod compose;
pub mod handlers;
pub mod prompts;

pub use compose::{compose_draft, DraftRequest, DEFAULT_WORD_LIMIT};

pub const DRAFT_MODEL: &str = "gpt-4o";
