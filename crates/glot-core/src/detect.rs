//! Script-based language detection heuristic.
//!
//! Used when a translation request arrives without a source language and no
//! recognizer language guess is available. This is intentionally a cheap,
//! pure character-counting heuristic, not a model: it only needs to pick the
//! right side of the Cyrillic/Latin split and tell Kazakh from Russian.

/// Lightweight language detector. Pure and synchronous — no I/O, no model.
pub trait LanguageDetector: Send + Sync {
    /// Detect the language of `text`, returning a supported short code.
    fn detect(&self, text: &str) -> &'static str;
}

/// Letters that occur in Kazakh Cyrillic but not in Russian.
const KAZAKH_LETTERS: &[char] = &['ә', 'ғ', 'қ', 'ң', 'ө', 'ұ', 'ү', 'һ', 'і'];

/// Detector that counts Cyrillic vs Latin alphabetic characters.
///
/// If Cyrillic characters outnumber ASCII Latin letters, the text is Kazakh
/// when any Kazakh-specific letter occurs and Russian otherwise. Everything
/// else is English.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptDetector;

impl LanguageDetector for ScriptDetector {
    fn detect(&self, text: &str) -> &'static str {
        let cyrillic = text
            .chars()
            .filter(|c| ('\u{0400}'..='\u{04FF}').contains(c))
            .count();
        let latin = text
            .chars()
            .filter(|c| c.is_ascii_alphabetic())
            .count();

        if cyrillic > latin {
            let lowered = text.to_lowercase();
            if lowered.chars().any(|c| KAZAKH_LETTERS.contains(&c)) {
                return "kk";
            }
            return "ru";
        }
        "en"
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
