// Copyright 2026 The Velora Project
// SPDX-License-Identifier: Apache-2.0

// SSE delta decoding.
//
// Turns the upstream chat-completions byte stream into GenerationEvents.
// Chunk boundaries are arbitrary, so bytes are accumulated in a line
// buffer and complete `data:` lines are drained as they form. Only the
// text delta is extracted; control chunks (role-only deltas, usage,
// finish_reason) are skipped.

use super::types::GenerationEvent;
use bytes::Bytes;
use futures_util::stream::{Stream, StreamExt};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

enum SseLine {
    Delta(String),
    Done,
    Skip,
}

/// Parse one SSE line into a delta, the terminator, or nothing.
fn parse_delta_line(line: &str) -> SseLine {
    let trimmed = line.trim();
    let data = match trimmed
        .strip_prefix("data: ")
        .or_else(|| trimmed.strip_prefix("data:"))
    {
        Some(d) => d.trim(),
        None => return SseLine::Skip,
    };

    if data == "[DONE]" {
        return SseLine::Done;
    }

    let json: serde_json::Value = match serde_json::from_str(data) {
        Ok(v) => v,
        Err(_) => return SseLine::Skip,
    };

    let content = json
        .get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("delta"))
        .and_then(|d| d.get("content"))
        .and_then(|t| t.as_str());

    match content {
        Some(text) if !text.is_empty() => SseLine::Delta(text.to_string()),
        _ => SseLine::Skip,
    }
}

/// Decode an SSE byte stream into delta events.
///
/// The translation runs in a spawned task feeding a bounded channel;
/// when the consumer goes away the sends fail and the task stops
/// pulling bytes from the source. A transport error becomes one
/// in-band `Error` event; end of input without `[DONE]` still yields
/// `Done`, matching how permissive SSE consumers treat truncation.
pub fn delta_events<S, E>(bytes: S) -> ReceiverStream<GenerationEvent>
where
    S: Stream<Item = Result<Bytes, E>> + Send + 'static,
    E: std::fmt::Display + Send + 'static,
{
    let (tx, rx) = mpsc::channel::<GenerationEvent>(64);

    tokio::spawn(async move {
        tokio::pin!(bytes);
        let mut line_buffer = String::new();

        while let Some(chunk) = bytes.next().await {
            let chunk = match chunk {
                Ok(c) => c,
                Err(e) => {
                    let _ = tx
                        .send(GenerationEvent::Error(format!(
                            "upstream stream failed: {e}"
                        )))
                        .await;
                    return;
                }
            };

            line_buffer.push_str(&String::from_utf8_lossy(&chunk));

            while let Some(newline_pos) = line_buffer.find('\n') {
                let line: String = line_buffer.drain(..=newline_pos).collect();
                match parse_delta_line(&line) {
                    SseLine::Delta(text) => {
                        if tx.send(GenerationEvent::Delta(text)).await.is_err() {
                            return; // Consumer gone
                        }
                    }
                    SseLine::Done => {
                        let _ = tx.send(GenerationEvent::Done).await;
                        return;
                    }
                    SseLine::Skip => {}
                }
            }
        }

        // Source closed without [DONE]; treat as completion, not error.
        if let SseLine::Delta(text) = parse_delta_line(&line_buffer) {
            let _ = tx.send(GenerationEvent::Delta(text)).await;
        }
        let _ = tx.send(GenerationEvent::Done).await;
    });

    ReceiverStream::new(rx)
}
