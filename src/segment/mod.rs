// Copyright 2026 The Velora Project
// SPDX-License-Identifier: Apache-2.0

// Incremental sentence segmentation for the wake stream.
//
// Responsibilities:
// - Accumulate text deltas from the generation source as they arrive
// - Find safe sentence boundaries: a terminator followed by whitespace,
//   or a run of line breaks
// - Never cut inside a $...$ highlight span
// - Normalize each cut fragment to a single trimmed line
// - Emit sentences with gapless 1-based ordinals, tail included
//
// The engine is purely reactive: one delta is processed fully before
// the next is accepted, and emitted text is never revisited.

mod driver;
mod normalizer;
mod scanner;
mod types;

pub use driver::Segmenter;
pub use normalizer::normalize;
pub use scanner::{find_boundary, inside_highlight_span, HIGHLIGHT_MARKER};
pub use types::{Sentence, WakeEvent};

#[cfg(test)]
mod tests;
