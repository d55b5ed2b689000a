// JD recommendation for applicants without a posting in hand.

pub mod handlers;
pub mod prompts;

pub const JD_MODEL: &str = "gpt-4o";
