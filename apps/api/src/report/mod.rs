// Company context report: the nested analysis other prompts consume as
// structured input.

pub mod handlers;
pub mod parser;
pub mod prompts;

pub use parser::{parse_report, ContextReport, RecoveredReport};

pub const REPORT_MODEL: &str = "gpt-4o";
