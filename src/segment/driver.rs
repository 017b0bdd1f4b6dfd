// Copyright 2026 The Velora Project
// SPDX-License-Identifier: Apache-2.0

// Segmentation driver.
//
// Owns the accumulation buffer and the ordinal counter for one
// streaming session. Characters enter by appended delta, leave exactly
// once as part of an emitted sentence, and are never reordered.

use super::normalizer::normalize;
use super::scanner::find_boundary;
use super::types::Sentence;

/// Per-session segmentation state machine.
///
/// `push_delta` drains every complete sentence the new delta unlocks;
/// `finish` flushes the tail when the source signals completion. After
/// `finish` the session is done -- the driver is consumed.
#[derive(Debug, Default)]
pub struct Segmenter {
    buffer: String,
    emitted: u64,
}

impl Segmenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one delta and return the sentences it completed, in order.
    ///
    /// The scan-cut-normalize cycle repeats until no boundary remains,
    /// so a single large delta may yield several sentences. Fragments
    /// that normalize to nothing are dropped without taking an ordinal.
    pub fn push_delta(&mut self, delta: &str) -> Vec<Sentence> {
        self.buffer.push_str(delta);

        let mut out = Vec::new();
        while let Some(end) = find_boundary(&self.buffer) {
            let rest = self.buffer.split_off(end);
            let raw = std::mem::replace(&mut self.buffer, rest);
            if let Some(sentence) = self.emit(&raw) {
                out.push(sentence);
            }
        }
        out
    }

    /// Flush the tail at stream completion.
    ///
    /// Whatever remains in the buffer becomes one final sentence,
    /// terminator or not, so every character the source produced is
    /// emitted exactly once. An unmatched highlight delimiter lands
    /// here too: the span never closed, so the text was never cut.
    pub fn finish(mut self) -> Option<Sentence> {
        let raw = std::mem::take(&mut self.buffer);
        self.emit(&raw)
    }

    fn emit(&mut self, raw: &str) -> Option<Sentence> {
        let text = normalize(raw);
        if text.is_empty() {
            return None;
        }
        self.emitted += 1;
        Some(Sentence {
            ordinal: self.emitted,
            text,
        })
    }
}
