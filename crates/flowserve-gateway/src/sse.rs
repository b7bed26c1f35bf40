//! Server-sent event framing for streamed completions
//!
//! Every frame is a single `data:` line terminated by a blank line. No event
//! names, ids or keep-alive comments are written. [`event`] feeds axum's
//! `Sse` response; the string helpers give the same bytes for one frame.

use axum::response::sse::Event;
use serde_json::json;

use crate::protocol::openai::ChatCompletionStreamResponse;
use crate::stream::StreamFrame;

/// Payload of the end-of-stream sentinel
pub const DONE_DATA: &str = "[DONE]";

/// Sentinel that ends every stream
pub const DONE: &str = "data: [DONE]\n\n";

/// Encode one chunk as `data: <compact json>\n\n`
pub fn frame(chunk: &ChatCompletionStreamResponse) -> String {
    format!("data: {}\n\n", chunk_data(chunk))
}

/// The terminating `[DONE]` frame
pub fn terminate() -> String {
    DONE.to_owned()
}

/// In-band failure frame, sent when a stream fails after headers went out
pub fn error_frame(message: &str) -> String {
    format!("data: {}\n\n", error_data(message))
}

/// SSE event for any frame the streaming orchestrator yields
pub fn event(frame: &StreamFrame) -> Event {
    let data = match frame {
        StreamFrame::Chunk(chunk) => chunk_data(chunk),
        StreamFrame::Error(message) => error_data(message),
        StreamFrame::Done => DONE_DATA.to_owned(),
    };

    Event::default().data(data)
}

fn chunk_data(chunk: &ChatCompletionStreamResponse) -> String {
    serde_json::to_string(chunk).unwrap_or_else(|e| {
        tracing::error!(error = %e, id = %chunk.id, "failed to serialize stream chunk");
        error_data("failed to serialize stream chunk")
    })
}

fn error_data(message: &str) -> String {
    json!({
        "error": {
            "message": message,
            "type": "server_error"
        }
    })
    .to_string()
}
