// Copyright 2026 The Velora Project
// SPDX-License-Identifier: Apache-2.0

/// Normalize a raw sentence fragment into a canonical single line.
///
/// Every whitespace run (spaces, tabs, line breaks) collapses to one
/// space and leading/trailing whitespace is dropped. An empty result
/// means the fragment carried no content (e.g. a lone newline run) and
/// the caller discards it without consuming an ordinal. Normalization
/// is idempotent.
pub fn normalize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_space = false;

    for c in raw.chars() {
        if c.is_whitespace() {
            if !out.is_empty() {
                pending_space = true;
            }
        } else {
            if pending_space {
                out.push(' ');
                pending_space = false;
            }
            out.push(c);
        }
    }

    out
}
