//! Helpers for reading raw SSE bodies

use serde_json::Value;

/// Split a raw SSE body into the payloads of its `data:` frames
pub fn data_frames(text: &str) -> Vec<String> {
    text.split_terminator("\n\n")
        .map(|frame| frame.strip_prefix("data: ").unwrap_or(frame).to_owned())
        .collect()
}

/// Parse every frame except the final `[DONE]` as JSON
pub fn json_frames(text: &str) -> Vec<Value> {
    data_frames(text)
        .iter()
        .filter(|data| data.as_str() != "[DONE]")
        .map(|data| serde_json::from_str(data).expect("frame is JSON"))
        .collect()
}

/// Content deltas in stream order
pub fn contents(frames: &[Value]) -> Vec<String> {
    frames
        .iter()
        .filter_map(|frame| frame["choices"][0]["delta"]["content"].as_str().map(str::to_owned))
        .collect()
}
