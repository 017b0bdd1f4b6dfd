// Copyright 2026 The Velora Project
// SPDX-License-Identifier: Apache-2.0

// Boundary scanner.
//
// A single linear pass over the accumulation buffer, tracking highlight
// delimiter parity as it goes. No regex: the cut semantics are simple
// enough that an explicit scan is both faster and easier to audit.

/// Delimiter bounding a highlight span. Text between a matched pair is
/// atomic with respect to boundary detection.
pub const HIGHLIGHT_MARKER: char = '$';

/// Sentence-terminator characters. A terminator only ends a sentence
/// when the next character is whitespace.
const TERMINATORS: [char; 3] = ['.', '!', '?'];

fn is_line_break(c: char) -> bool {
    matches!(c, '\n' | '\r')
}

/// Whether the end of the buffer sits inside an open highlight span.
///
/// Recomputed from the buffer itself (odd marker count = inside) so the
/// answer can never desynchronize from the data.
pub fn inside_highlight_span(buffer: &str) -> bool {
    buffer.chars().filter(|&c| c == HIGHLIGHT_MARKER).count() % 2 == 1
}

/// Find the next safe cut point in the buffer.
///
/// Returns the byte index one past the boundary, such that
/// `buffer[..end]` is a complete raw sentence fragment and
/// `buffer[end..]` is retained. Candidates are, in scan order:
///
/// - a terminator (`.` `!` `?`) immediately followed by whitespace:
///   the cut lands after the terminator;
/// - a run of one or more line breaks: the cut lands after the run.
///
/// Candidates that fall inside a highlight span are skipped, so a
/// highlighted phrase containing punctuation is never severed. `None`
/// means no boundary is available yet; that is the normal steady state
/// while output is still arriving, not an error.
pub fn find_boundary(buffer: &str) -> Option<usize> {
    let mut inside_span = false;
    let mut chars = buffer.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        if c == HIGHLIGHT_MARKER {
            inside_span = !inside_span;
            continue;
        }
        if inside_span {
            continue;
        }
        if is_line_break(c) {
            let mut end = idx + c.len_utf8();
            while let Some(&(next_idx, next)) = chars.peek() {
                if !is_line_break(next) {
                    break;
                }
                end = next_idx + next.len_utf8();
                chars.next();
            }
            return Some(end);
        }
        if TERMINATORS.contains(&c) {
            if let Some(&(_, next)) = chars.peek() {
                if next.is_whitespace() {
                    return Some(idx + c.len_utf8());
                }
            }
        }
    }

    None
}
