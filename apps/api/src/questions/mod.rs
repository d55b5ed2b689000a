// Question tools: commonly-asked question lists and single
// recommendations, both backed by web search.

pub mod generator;
pub mod handlers;
pub mod prompts;

pub use generator::{CommonRequest, RecommendRequest};

pub const COMMON_MODEL: &str = "gpt-4o";
pub const RECOMMEND_MODEL: &str = "gpt-4o-mini";
