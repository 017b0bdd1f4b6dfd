// Copyright 2026 The Velora Project
// SPDX-License-Identifier: Apache-2.0

// Tests for the sentence segmentation engine.
//
// Tests cover:
//  1. Boundary scanning: terminator+whitespace, line-break runs, none
//  2. Highlight spans are never split, even across terminators
//  3. Normalization: collapse, trim, idempotence, empty results
//  4. Driver: ordinals gapless from 1, tail flush, no loss/duplication
//  5. Wire encoding of sentence/done/error events

use super::*;

// ---------------------------------------------------------------------------
// Boundary scanner
// ---------------------------------------------------------------------------

#[test]
fn terminator_followed_by_space_is_a_boundary() {
    assert_eq!(find_boundary("Hello world. Bye"), Some(12));
    assert_eq!(&"Hello world. Bye"[..12], "Hello world.");
}

#[test]
fn all_three_terminators_count() {
    assert_eq!(find_boundary("Go! now"), Some(3));
    assert_eq!(find_boundary("Go? now"), Some(3));
    assert_eq!(find_boundary("Go. now"), Some(3));
}

#[test]
fn terminator_at_end_of_buffer_is_not_a_boundary() {
    // The next character has not arrived yet; the tail flush handles it.
    assert_eq!(find_boundary("Hello world."), None);
}

#[test]
fn terminator_without_following_whitespace_is_not_a_boundary() {
    assert_eq!(find_boundary("3.14 is pi"), None);
    assert_eq!(find_boundary("e.g.example"), None);
}

#[test]
fn line_break_run_is_a_boundary() {
    let buffer = "First line\n\nSecond";
    let end = find_boundary(buffer).unwrap();
    assert_eq!(&buffer[..end], "First line\n\n");
    assert_eq!(&buffer[end..], "Second");
}

#[test]
fn carriage_returns_join_the_line_break_run() {
    let buffer = "a\r\nb";
    let end = find_boundary(buffer).unwrap();
    assert_eq!(&buffer[..end], "a\r\n");
}

#[test]
fn no_boundary_in_plain_text() {
    assert_eq!(find_boundary("still streaming"), None);
    assert_eq!(find_boundary(""), None);
}

#[test]
fn terminator_inside_highlight_span_is_skipped() {
    // "today!" sits inside $...$; the only safe cut is after "Done."
    let buffer = "$Do it today!$ Done. Next";
    let end = find_boundary(buffer).unwrap();
    assert_eq!(&buffer[..end], "$Do it today!$ Done.");
}

#[test]
fn line_break_inside_highlight_span_is_skipped() {
    assert_eq!(find_boundary("$one\ntwo$ more"), None);
}

#[test]
fn boundary_before_an_open_span_can_still_cut() {
    // The open span only protects text after its marker.
    let buffer = "Go now. $Do it";
    assert_eq!(find_boundary(buffer), Some(7));
    assert_eq!(&buffer[..7], "Go now.");
}

#[test]
fn parity_tracking_matches_marker_count() {
    assert!(!inside_highlight_span(""));
    assert!(inside_highlight_span("a $b"));
    assert!(!inside_highlight_span("a $b$ c"));
    assert!(inside_highlight_span("$a$ then $more"));
}

// ---------------------------------------------------------------------------
// Normalizer
// ---------------------------------------------------------------------------

#[test]
fn whitespace_runs_collapse_to_one_space() {
    assert_eq!(normalize("a  b\tc\n\nd"), "a b c d");
}

#[test]
fn leading_and_trailing_whitespace_trimmed() {
    assert_eq!(normalize("  hello world. \n"), "hello world.");
}

#[test]
fn whitespace_only_input_normalizes_to_empty() {
    assert_eq!(normalize("\n\n"), "");
    assert_eq!(normalize("   "), "");
    assert_eq!(normalize(""), "");
}

#[test]
fn normalization_is_idempotent() {
    let once = normalize("  Go   now.\nDo it ");
    assert_eq!(normalize(&once), once);
}

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

#[test]
fn deltas_reassemble_into_sentences() {
    let mut segmenter = Segmenter::new();
    let mut sentences = Vec::new();
    for delta in ["Hel", "lo world. ", "Bye now!"] {
        sentences.extend(segmenter.push_delta(delta));
    }
    if let Some(tail) = segmenter.finish() {
        sentences.push(tail);
    }

    assert_eq!(sentences.len(), 2);
    assert_eq!(sentences[0].ordinal, 1);
    assert_eq!(sentences[0].text, "Hello world.");
    assert_eq!(sentences[1].ordinal, 2);
    assert_eq!(sentences[1].text, "Bye now!");
}

#[test]
fn one_delta_can_complete_several_sentences() {
    let mut segmenter = Segmenter::new();
    let sentences = segmenter.push_delta("One. Two! Three? tail");
    let texts: Vec<_> = sentences.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(texts, ["One.", "Two!", "Three?"]);
}

#[test]
fn tail_without_terminator_is_flushed() {
    let mut segmenter = Segmenter::new();
    assert!(segmenter.push_delta("no terminator at end").is_empty());
    let tail = segmenter.finish().unwrap();
    assert_eq!(tail.ordinal, 1);
    assert_eq!(tail.text, "no terminator at end");
}

#[test]
fn empty_session_flushes_nothing() {
    assert_eq!(Segmenter::new().finish(), None);
}

#[test]
fn highlight_span_crossing_a_terminator_stays_whole() {
    let mut segmenter = Segmenter::new();
    let mut sentences = Vec::new();
    // Delivered in awkward pieces: the span opens in one delta and
    // closes two deltas later.
    for delta in ["Go now. $Do it", " today!$", " Done.", " "] {
        sentences.extend(segmenter.push_delta(delta));
    }
    if let Some(tail) = segmenter.finish() {
        sentences.push(tail);
    }

    let texts: Vec<_> = sentences.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(texts, ["Go now.", "$Do it today!$ Done."]);
}

#[test]
fn newline_only_fragment_consumes_no_ordinal() {
    let mut segmenter = Segmenter::new();
    assert!(segmenter.push_delta("\n\n").is_empty());
    let sentences = segmenter.push_delta("Real content. x");
    assert_eq!(sentences.len(), 1);
    assert_eq!(sentences[0].ordinal, 1);
    assert_eq!(sentences[0].text, "Real content.");
}

#[test]
fn unmatched_highlight_marker_flushed_as_tail() {
    let mut segmenter = Segmenter::new();
    // The span never closes, so no cut is ever safe past the marker.
    // "Wait." cuts before the marker opens; everything after rides the tail.
    let sentences = segmenter.push_delta("Wait. $never closed");
    assert_eq!(sentences.len(), 1);
    assert_eq!(sentences[0].text, "Wait.");
    let tail = segmenter.finish().unwrap();
    assert_eq!(tail.ordinal, 2);
    assert_eq!(tail.text, "$never closed");
}

#[test]
fn ordinals_are_gapless_across_many_deltas() {
    let mut segmenter = Segmenter::new();
    let mut sentences = Vec::new();
    for delta in ["A. ", "B. ", "\n", "C. ", "D"] {
        sentences.extend(segmenter.push_delta(delta));
    }
    if let Some(tail) = segmenter.finish() {
        sentences.push(tail);
    }
    let ordinals: Vec<_> = sentences.iter().map(|s| s.ordinal).collect();
    assert_eq!(ordinals, (1..=sentences.len() as u64).collect::<Vec<_>>());
}

#[test]
fn no_character_lost_or_duplicated() {
    // Concatenating emitted sentences must cover every non-whitespace
    // character of the input exactly once, in order.
    let input = "First thing.  Second\nthing!   And $a span. with dots$ inside? last bit";
    let mut segmenter = Segmenter::new();
    let mut sentences = Vec::new();
    // Deliver one character at a time, the worst case for the scanner.
    for c in input.chars() {
        sentences.extend(segmenter.push_delta(&c.to_string()));
    }
    if let Some(tail) = segmenter.finish() {
        sentences.push(tail);
    }

    let emitted: String = sentences
        .iter()
        .map(|s| s.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    let original: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    assert_eq!(emitted, original);
}

// ---------------------------------------------------------------------------
// Wire encoding
// ---------------------------------------------------------------------------

#[test]
fn sentence_event_encodes_with_type_tag() {
    let event = WakeEvent::Sentence {
        i: 1,
        text: "Hello world.".to_string(),
    };
    assert_eq!(
        event.to_line(),
        "{\"type\":\"sentence\",\"i\":1,\"text\":\"Hello world.\"}\n"
    );
}

#[test]
fn done_event_encodes_bare() {
    assert_eq!(WakeEvent::Done.to_line(), "{\"type\":\"done\"}\n");
}

#[test]
fn error_event_carries_message() {
    let event = WakeEvent::Error {
        message: "upstream failed".to_string(),
    };
    assert_eq!(
        event.to_line(),
        "{\"type\":\"error\",\"message\":\"upstream failed\"}\n"
    );
}

#[test]
fn sentence_converts_to_event() {
    let event: WakeEvent = Sentence {
        ordinal: 3,
        text: "x".to_string(),
    }
    .into();
    assert_eq!(
        event,
        WakeEvent::Sentence {
            i: 3,
            text: "x".to_string()
        }
    );
}
