//! Transcript assembler — order-restoring reassembly of segment results.
//!
//! Worker completion order is a race; the assembler is where determinism is
//! re-established. Everything is keyed by segment index: text concatenation,
//! span order, and the detected-language pick all follow index order, never
//! arrival order.

use crate::types::{SegmentResult, Transcript};

/// Assemble segment results into one transcript.
///
/// Results are sorted by index; non-empty texts are joined with single
/// spaces; spans are concatenated in the same order (their timestamps are
/// already absolute); the detected language is taken from the first segment
/// *by index* that reports one.
pub fn assemble(mut results: Vec<SegmentResult>) -> Transcript {
    results.sort_by_key(|r| r.index);

    let mut texts: Vec<&str> = Vec::with_capacity(results.len());
    let mut spans = Vec::new();
    let mut language: Option<String> = None;

    for result in &results {
        let trimmed = result.text.trim();
        if !trimmed.is_empty() {
            texts.push(trimmed);
        }
        spans.extend(result.spans.iter().cloned());
        if language.is_none() {
            language.clone_from(&result.language);
        }
    }

    Transcript {
        text: texts.join(" "),
        language,
        spans,
        speakers: None,
        speaker_text: None,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TimedSpan;
    use proptest::prelude::*;

    fn seg(index: usize, text: &str, language: Option<&str>) -> SegmentResult {
        SegmentResult {
            index,
            text: text.to_string(),
            language: language.map(String::from),
            spans: vec![TimedSpan {
                start: index as f64 * 30.0,
                end: index as f64 * 30.0 + 1.0,
                text: text.to_string(),
            }],
        }
    }

    #[test]
    fn out_of_order_arrival_is_reordered_by_index() {
        let t = assemble(vec![
            seg(2, "three", None),
            seg(0, "one", None),
            seg(1, "two", None),
        ]);
        assert_eq!(t.text, "one two three");
        assert_eq!(t.spans[0].start, 0.0);
        assert_eq!(t.spans[1].start, 30.0);
        assert_eq!(t.spans[2].start, 60.0);
    }

    #[test]
    fn empty_segments_are_skipped_in_text() {
        let t = assemble(vec![
            seg(0, "hello", None),
            SegmentResult::empty(1),
            seg(2, "world", None),
        ]);
        assert_eq!(t.text, "hello world");
        assert_eq!(t.spans.len(), 2);
    }

    #[test]
    fn language_is_first_by_index_not_by_arrival() {
        let t = assemble(vec![
            seg(3, "d", Some("de")),
            seg(1, "b", Some("ru")),
            seg(0, "a", None),
            seg(2, "c", Some("en")),
        ]);
        // Segment 0 has no guess; segment 1 is the first by index that does.
        assert_eq!(t.language.as_deref(), Some("ru"));
    }

    #[test]
    fn no_language_reported_gives_none() {
        let t = assemble(vec![seg(0, "a", None), seg(1, "b", None)]);
        assert!(t.language.is_none());
    }

    #[test]
    fn whitespace_only_text_is_treated_as_empty() {
        let t = assemble(vec![seg(0, "   ", None), seg(1, "word", None)]);
        assert_eq!(t.text, "word");
    }

    #[test]
    fn all_segments_empty_gives_empty_text() {
        let t = assemble(vec![SegmentResult::empty(0), SegmentResult::empty(1)]);
        assert!(t.text.is_empty());
        assert!(t.spans.is_empty());
    }

    #[test]
    fn missing_index_gap_is_tolerated() {
        // Segment 1 lost to a panicked task: order still holds.
        let t = assemble(vec![seg(2, "c", None), seg(0, "a", None)]);
        assert_eq!(t.text, "a c");
    }

    #[test]
    fn spans_non_decreasing_after_assembly() {
        let t = assemble(vec![seg(4, "e", None), seg(1, "b", None), seg(3, "d", None)]);
        for pair in t.spans.windows(2) {
            assert!(pair[0].start <= pair[1].start);
        }
    }

    proptest! {
        /// The central invariant: output is identical under every
        /// completion-order permutation.
        #[test]
        fn deterministic_under_completion_order(
            order in Just((0..8usize).collect::<Vec<_>>()).prop_shuffle(),
        ) {
            let canonical: Vec<SegmentResult> = (0..8)
                .map(|i| seg(i, &format!("seg{i}"), if i >= 2 { Some("en") } else { None }))
                .collect();
            let shuffled: Vec<SegmentResult> =
                order.iter().map(|&i| canonical[i].clone()).collect();

            let expected = assemble(canonical);
            let got = assemble(shuffled);

            prop_assert_eq!(got.text, expected.text);
            prop_assert_eq!(got.language, expected.language);
            prop_assert_eq!(got.spans, expected.spans);
        }
    }
}
