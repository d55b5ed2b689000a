//! Streaming accumulator — fragment streams in, growing snapshots out.
//!
//! Model streams arrive as small text fragments. UI surfaces want to
//! re-render the whole answer on every tick, so [`Accumulate`] appends each
//! fragment to a session-local buffer and yields the full buffer after
//! every fragment. Snapshot lengths never decrease, and the final snapshot
//! equals the concatenation of every fragment received.
//!
//! A source error ends the stream; the buffer survives it and stays
//! readable through [`Accumulate::buffer`] so the caller can make one last
//! recovery attempt over whatever arrived.

use std::collections::HashMap;
use std::pin::Pin;
use std::sync::{LazyLock, Mutex};
use std::task::{Context, Poll};

use futures::Stream;
use regex::Regex;
use serde_json::Value;

use crate::recovery;

/// Stream adapter producing full-buffer snapshots.
///
/// The buffer is owned by exactly one session and is never shared;
/// dropping the adapter mid-stream abandons the source with no cleanup to
/// run.
pub struct Accumulate<S> {
    inner: S,
    buffer: String,
    done: bool,
}

/// Wraps a fragment stream in an [`Accumulate`] adapter.
pub fn accumulate<S>(inner: S) -> Accumulate<S> {
    Accumulate {
        inner,
        buffer: String::new(),
        done: false,
    }
}

impl<S> Accumulate<S> {
    /// Everything received so far, including after an error or normal end.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Consumes the adapter, keeping the accumulated text.
    pub fn into_buffer(self) -> String {
        self.buffer
    }
}

impl<S, E> Stream for Accumulate<S>
where
    S: Stream<Item = Result<String, E>> + Unpin,
{
    type Item = Result<String, E>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        if this.done {
            return Poll::Ready(None);
        }
        match Pin::new(&mut this.inner).poll_next(cx) {
            Poll::Ready(Some(Ok(fragment))) => {
                this.buffer.push_str(&fragment);
                Poll::Ready(Some(Ok(this.buffer.clone())))
            }
            Poll::Ready(Some(Err(error))) => {
                // Terminal: no more snapshots after a source failure.
                this.done = true;
                Poll::Ready(Some(Err(error)))
            }
            Poll::Ready(None) => {
                this.done = true;
                Poll::Ready(None)
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

/// What a snapshot looks like once projection has had a go at it.
#[derive(Debug, Clone, PartialEq)]
pub enum Snapshot {
    /// No structure recognized yet; the raw buffer.
    Text(String),
    /// A growing string field scraped out of a not-yet-closed object.
    Partial(String),
    /// The buffer parsed as a complete JSON object.
    Structured(Value),
}

/// Projects a snapshot through JSON recovery.
///
/// Complete objects win. While the object is still open, the value of
/// `key` is extracted with a key-specific pattern so callers can render
/// the field as it grows instead of showing half-written JSON.
pub fn project(buffer: &str, key: &str) -> Snapshot {
    if let Ok(value) = recovery::json_object(buffer) {
        return Snapshot::Structured(value);
    }
    if let Some(partial) = partial_string_field(buffer, key) {
        return Snapshot::Partial(partial);
    }
    Snapshot::Text(buffer.to_string())
}

/// Compiled field patterns, one per key ever projected. Projection runs
/// once per stream fragment, so the pattern must not be rebuilt per call.
static FIELD_PATTERNS: LazyLock<Mutex<HashMap<String, Regex>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

fn field_pattern(key: &str) -> Regex {
    let mut cache = FIELD_PATTERNS
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    if let Some(re) = cache.get(key) {
        return re.clone();
    }
    let pattern = format!(r#""{}"\s*:\s*"((?:[^"\\]|\\.)*)"#, regex::escape(key));
    let re = Regex::new(&pattern).expect("valid regex");
    cache.insert(key.to_string(), re.clone());
    re
}

/// Captures the (possibly unterminated) string value of `key`.
fn partial_string_field(buffer: &str, key: &str) -> Option<String> {
    let captured = field_pattern(key).captures(buffer)?.get(1)?;
    Some(unescape_fragment(captured.as_str()))
}

/// Minimal JSON string unescaping for display purposes.
fn unescape_fragment(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
