// Copyright 2026 The Velora Project
// SPDX-License-Identifier: Apache-2.0

// Wake streaming endpoint.
//
// One session per request: a spawned task pulls deltas from the
// generation source, drives the segmentation engine, and writes
// NDJSON event lines into a bounded channel that backs the response
// body. A failed send means the client went away, and the task stops
// pulling deltas immediately.
//
// Input problems are reported in-band as a single error event on the
// stream, not as an HTTP status: the transport contract is "zero or
// more sentences, then exactly one terminal event".

use crate::generation::GenerationEvent;
use crate::routes::AppState;
use crate::segment::{Segmenter, WakeEvent};
use axum::body::Body;
use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use bytes::Bytes;
use futures_util::StreamExt;
use serde::Deserialize;
use std::convert::Infallible;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WakeRequest {
    /// Required; kept as a raw value so a wrong type is reported
    /// in-band instead of bouncing off the extractor.
    #[serde(default)]
    pub goal: Option<serde_json::Value>,
    /// Free-form; relayed into the prompt verbatim.
    #[serde(default)]
    pub time_left: Option<serde_json::Value>,
}

pub async fn wake_handler(
    State(state): State<AppState>,
    Json(request): Json<WakeRequest>,
) -> Response {
    let (tx, rx) = mpsc::channel::<Bytes>(64);
    tokio::spawn(run_session(state, request, tx));

    let body = Body::from_stream(ReceiverStream::new(rx).map(Ok::<_, Infallible>));
    (
        [
            (header::CONTENT_TYPE, "application/x-ndjson"),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        body,
    )
        .into_response()
}

/// Drive one wake session to its terminal event.
///
/// The transport closes when this task returns and drops `tx`; every
/// return path has already written exactly one terminal event (or
/// observed the client disconnect, at which point nothing can be
/// delivered anyway).
async fn run_session(state: AppState, request: WakeRequest, tx: mpsc::Sender<Bytes>) {
    let request_id = Uuid::new_v4().to_string();

    let goal = match goal_text(&request) {
        Some(goal) => goal,
        None => {
            let _ = send(
                &tx,
                &WakeEvent::Error {
                    message: "Provide 'goal' as a non-empty string".to_string(),
                },
            )
            .await;
            return;
        }
    };

    let chat = crate::generation::ChatRequest {
        model: state.config.text_model.clone(),
        messages: crate::prompt::wake_messages(&goal, request.time_left.as_ref()),
        temperature: Some(0.9),
        max_tokens: Some(300),
        response_format: None,
    };

    let mut deltas = match state.generation.stream(chat).await {
        Ok(stream) => stream,
        Err(e) => {
            tracing::warn!(%request_id, error = %e, "wake generation failed to start");
            let _ = send(
                &tx,
                &WakeEvent::Error {
                    message: e.to_string(),
                },
            )
            .await;
            return;
        }
    };

    tracing::info!(%request_id, "wake session started");
    let mut segmenter = Segmenter::new();

    while let Some(event) = deltas.next().await {
        match event {
            GenerationEvent::Delta(text) => {
                for sentence in segmenter.push_delta(&text) {
                    if send(&tx, &WakeEvent::from(sentence)).await.is_err() {
                        // Client disconnected: dropping `deltas` stops
                        // the pull from the generation source.
                        tracing::debug!(%request_id, "client disconnected, aborting wake session");
                        return;
                    }
                }
            }
            GenerationEvent::Done => break,
            GenerationEvent::Error(message) => {
                tracing::warn!(%request_id, error = %message, "wake generation failed mid-stream");
                let _ = send(&tx, &WakeEvent::Error { message }).await;
                return;
            }
        }
    }

    if let Some(tail) = segmenter.finish() {
        if send(&tx, &WakeEvent::from(tail)).await.is_err() {
            return;
        }
    }
    let _ = send(&tx, &WakeEvent::Done).await;
    tracing::info!(%request_id, "wake session complete");
}

fn goal_text(request: &WakeRequest) -> Option<String> {
    match &request.goal {
        Some(serde_json::Value::String(s)) if !s.trim().is_empty() => {
            Some(s.trim().to_string())
        }
        _ => None,
    }
}

async fn send(tx: &mpsc::Sender<Bytes>, event: &WakeEvent) -> Result<(), ()> {
    tx.send(Bytes::from(event.to_line())).await.map_err(|_| ())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
