//! Structured Response Recovery — best-effort extraction of structured data
//! from free-form LLM output.
//!
//! Korean-language models rarely return the bare JSON or Markdown they were
//! asked for: fences, prose preambles, trailing commas, and half-followed
//! formats are the norm. Each public entry point here is a ladder of pure
//! strategies tried in order; the first success wins. Failures are typed
//! values (or empty collections), never panics — callers pick their own
//! fallback policy: a user-facing placeholder, the raw text, or nothing.

pub mod fence;
pub mod json;
pub mod list;
pub mod repair;
pub mod table;

pub use json::{json_object, json_object_with_key};
pub use list::{string_list, DEFAULT_LIST_CAP};
pub use table::{markdown_table, markdown_table_or_text};

use thiserror::Error;

/// Typed failure for the strict recovery modes.
///
/// Only the modes with a meaningful "nothing extractable" outcome produce
/// these; list recovery degrades to an empty `Vec` instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecoveryError {
    #[error("no parseable JSON object in model response")]
    NoJsonObject,

    #[error("no JSON object with required key `{key}` in model response")]
    MissingKey { key: String },

    #[error("no markdown table in model response")]
    NoTable,
}
