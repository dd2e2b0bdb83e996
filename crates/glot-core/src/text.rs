//! Word-budget truncation for translation input.
//!
//! Translation backends degrade badly on very long input, so the translation
//! orchestrator only sends a bounded prefix. Splitting is on whitespace
//! words, and the cut is documented to the caller via the returned flag —
//! silent in the output, observable in the result.

use std::borrow::Cow;

/// Truncate `text` to at most `max_words` whitespace-separated words.
///
/// Returns the (possibly borrowed) prefix and whether anything was cut.
/// A `max_words` of zero yields an empty prefix (marked truncated unless
/// the input was already empty of words).
pub fn word_budget(text: &str, max_words: usize) -> (Cow<'_, str>, bool) {
    let count = text.split_whitespace().count();
    if count <= max_words {
        return (Cow::Borrowed(text), false);
    }
    let prefix = text
        .split_whitespace()
        .take(max_words)
        .collect::<Vec<_>>()
        .join(" ");
    (Cow::Owned(prefix), true)
}

/// Count whitespace-separated words in `text`.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn within_budget_borrows() {
        let (out, truncated) = word_budget("one two three", 5);
        assert_eq!(out, "one two three");
        assert!(!truncated);
        assert!(matches!(out, Cow::Borrowed(_)));
    }

    #[test]
    fn exact_budget_is_not_truncated() {
        let (out, truncated) = word_budget("one two three", 3);
        assert_eq!(out, "one two three");
        assert!(!truncated);
    }

    #[test]
    fn over_budget_truncates() {
        let (out, truncated) = word_budget("one two three four", 2);
        assert_eq!(out, "one two");
        assert!(truncated);
    }

    #[test]
    fn truncation_normalizes_interior_whitespace() {
        let (out, truncated) = word_budget("a   b\tc\nd", 3);
        assert_eq!(out, "a b c");
        assert!(truncated);
    }

    #[test]
    fn zero_budget() {
        let (out, truncated) = word_budget("hello", 0);
        assert_eq!(out, "");
        assert!(truncated);

        let (out, truncated) = word_budget("", 0);
        assert_eq!(out, "");
        assert!(!truncated);
    }

    #[test]
    fn hundred_word_default_case() {
        let long = "word ".repeat(150);
        let (out, truncated) = word_budget(&long, 100);
        assert!(truncated);
        assert_eq!(word_count(&out), 100);
    }

    #[test]
    fn multibyte_words_survive() {
        let (out, truncated) = word_budget("привет мир және тағы", 2);
        assert_eq!(out, "привет мир");
        assert!(truncated);
    }

    #[test]
    fn word_count_basics() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   "), 0);
        assert_eq!(word_count("a b  c"), 3);
    }
}
