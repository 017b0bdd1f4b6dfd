// Copyright 2026 The Velora Project
// SPDX-License-Identifier: Apache-2.0

// Wire types for the wake stream.

use serde::Serialize;

/// One emitted sentence: 1-based ordinal plus normalized text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    pub ordinal: u64,
    pub text: String,
}

/// Events written to the client, one JSON object per line.
///
/// A session is zero or more `sentence` events with strictly increasing
/// `i` starting at 1, closed by exactly one terminal event: `done` on
/// success, `error` on failure. Never both.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WakeEvent {
    Sentence { i: u64, text: String },
    Done,
    Error { message: String },
}

impl From<Sentence> for WakeEvent {
    fn from(sentence: Sentence) -> Self {
        WakeEvent::Sentence {
            i: sentence.ordinal,
            text: sentence.text,
        }
    }
}

impl WakeEvent {
    /// Serialize as a self-delimited NDJSON record.
    pub fn to_line(&self) -> String {
        let mut line = serde_json::to_string(self).unwrap();
        line.push('\n');
        line
    }
}
