// Company classification: industry tags and size category, both backed
// by web search.

pub mod classify;
pub mod handlers;
pub mod prompts;

pub use classify::{extract_industry_tags, extract_size_category, SIZE_CATEGORIES, SIZE_UNKNOWN};

pub const INDUSTRY_MODEL: &str = "gpt-4o";
pub const SIZE_MODEL: &str = "gpt-4o";
