//! SSE plumbing shared by the streaming endpoints.
//!
//! Every streaming endpoint speaks the same frame protocol: one JSON
//! object per event with a `type` tag (`delta`, `partial`, `structured`,
//! `final`, `error`), closed by a literal `[DONE]` event. Send failures
//! mean the client hung up; the producing task just stops.

use std::convert::Infallible;

use axum::response::sse::{Event, KeepAlive, Sse};
use serde_json::{json, Value};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::warn;

use crate::streaming::Snapshot;

const CHANNEL_CAPACITY: usize = 32;

pub type EventStream = ReceiverStream<Result<Event, Infallible>>;
pub type EventSender = mpsc::Sender<Result<Event, Infallible>>;

/// Opens the event channel for one streaming response.
pub fn stream_channel() -> (EventSender, Sse<EventStream>) {
    let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
    let sse = Sse::new(ReceiverStream::new(rx)).keep_alive(KeepAlive::default());
    (tx, sse)
}

/// Sends one JSON frame. Returns false when the client went away.
pub async fn send_frame(tx: &EventSender, frame: &Value) -> bool {
    match Event::default().json_data(frame) {
        Ok(event) => tx.send(Ok(event)).await.is_ok(),
        Err(error) => {
            warn!(%error, "failed to encode SSE frame");
            true
        }
    }
}

/// Stream terminator, mirroring the upstream protocol.
pub async fn send_done(tx: &EventSender) {
    let _ = tx.send(Ok(Event::default().data("[DONE]"))).await;
}

/// Frame for one projected snapshot.
pub fn snapshot_frame(snapshot: &Snapshot) -> Value {
    match snapshot {
        Snapshot::Text(text) => json!({"type": "delta", "text": text}),
        Snapshot::Partial(text) => json!({"type": "partial", "text": text}),
        Snapshot::Structured(value) => json!({"type": "structured", "data": value}),
    }
}

pub fn error_frame(message: &str) -> Value {
    json!({"type": "error", "message": message})
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_frames_carry_the_type_tag() {
        let delta = snapshot_frame(&Snapshot::Text("버퍼".to_string()));
        assert_eq!(delta["type"], "delta");
        assert_eq!(delta["text"], "버퍼");

        let partial = snapshot_frame(&Snapshot::Partial("답변 일".to_string()));
        assert_eq!(partial["type"], "partial");

        let structured =
            snapshot_frame(&Snapshot::Structured(json!({"answer": "전체", "progress": 10})));
        assert_eq!(structured["type"], "structured");
        assert_eq!(structured["data"]["progress"], 10);
    }

    #[test]
    fn test_error_frame_shape() {
        let frame = error_frame("연결이 끊어졌습니다");
        assert_eq!(frame["type"], "error");
        assert_eq!(frame["message"], "연결이 끊어졌습니다");
    }
}
