// Writing guidance: per-question guides and post-interview answer flows.
// Both are table-shaped and go through markdown table recovery.

pub mod generator;
pub mod handlers;
pub mod prompts;

pub use generator::{generate_answer_flow, generate_guide, FlowRequest, GuideRequest};

/// Guidance is short and table-shaped; the mini model is plenty.
pub const GUIDANCE_MODEL: &str = "gpt-4o-mini";
