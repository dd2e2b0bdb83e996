//! Language code tables and normalization.
//!
//! All language-code knowledge lives here: the supported set, the mapping
//! from recognizer full names (`"russian"`) to short codes (`"ru"`), and the
//! bidirectional short↔model code table. The rest of the pipeline never
//! hard-codes a language string.
//!
//! [`validate_tables`] checks the tables for consistency and is called when
//! the pipeline is constructed — a typo in a table is a startup error, not a
//! silent wrong translation at 2am.

/// Supported languages as `(short code, native display name)` pairs.
///
/// Order is presentation order, not priority.
pub const SUPPORTED: &[(&str, &str)] = &[
    ("ru", "Русский"),
    ("kk", "Қазақша"),
    ("en", "English"),
    ("de", "Deutsch"),
    ("fr", "Français"),
    ("es", "Español"),
    ("zh", "中文"),
];

/// Recognizer full-language names → short codes.
///
/// Speech recognizers commonly report `"russian"` rather than `"ru"`.
const RECOGNIZER_NAMES: &[(&str, &str)] = &[
    ("russian", "ru"),
    ("kazakh", "kk"),
    ("english", "en"),
    ("german", "de"),
    ("french", "fr"),
    ("spanish", "es"),
    ("chinese", "zh"),
];

/// Bidirectional short code ↔ NLLB-style model code table.
pub const MODEL_CODES: &[(&str, &str)] = &[
    ("ru", "rus_Cyrl"),
    ("kk", "kaz_Cyrl"),
    ("en", "eng_Latn"),
    ("de", "deu_Latn"),
    ("fr", "fra_Latn"),
    ("es", "spa_Latn"),
    ("zh", "zho_Hans"),
];

/// Errors from table validation.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LangError {
    /// A supported short code has no entry in [`MODEL_CODES`].
    #[error("supported language {0:?} has no model code")]
    MissingModelCode(String),

    /// A normalization target is not in the supported set.
    #[error("recognizer name {name:?} maps to unsupported code {code:?}")]
    UnsupportedTarget {
        /// The recognizer-side full name.
        name: String,
        /// The short code it maps to.
        code: String,
    },

    /// A short code appears more than once in [`MODEL_CODES`].
    #[error("duplicate model-code entry for {0:?}")]
    DuplicateEntry(String),
}

/// Whether `code` is one of the supported short codes.
pub fn is_supported(code: &str) -> bool {
    SUPPORTED.iter().any(|(c, _)| *c == code)
}

/// Native display name for a supported short code.
pub fn display_name(code: &str) -> Option<&'static str> {
    SUPPORTED
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
}

/// Normalize recognizer output (short code or full name) to a supported
/// short code.
///
/// Input is trimmed and lowercased first. Already-short supported codes pass
/// through; full recognizer names go through [`RECOGNIZER_NAMES`]; anything
/// else yields `None`.
pub fn normalize(input: &str) -> Option<&'static str> {
    let lowered = input.trim().to_ascii_lowercase();
    if let Some((code, _)) = SUPPORTED.iter().find(|(c, _)| *c == lowered) {
        return Some(code);
    }
    RECOGNIZER_NAMES
        .iter()
        .find(|(name, _)| *name == lowered)
        .map(|(_, code)| *code)
}

/// Model code for a supported short code.
pub fn model_code(code: &str) -> Option<&'static str> {
    MODEL_CODES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, m)| *m)
}

/// Short code for a model code (reverse direction of [`model_code`]).
pub fn short_code(model: &str) -> Option<&'static str> {
    MODEL_CODES
        .iter()
        .find(|(_, m)| *m == model)
        .map(|(c, _)| *c)
}

/// Validate the tables against each other.
///
/// Checks that every supported code has exactly one model code and that
/// every recognizer-name target is supported. Called at pipeline
/// construction time.
pub fn validate_tables() -> Result<(), LangError> {
    for (code, _) in SUPPORTED {
        let hits = MODEL_CODES.iter().filter(|(c, _)| c == code).count();
        match hits {
            0 => return Err(LangError::MissingModelCode((*code).to_string())),
            1 => {}
            _ => return Err(LangError::DuplicateEntry((*code).to_string())),
        }
    }
    for (name, code) in RECOGNIZER_NAMES {
        if !is_supported(code) {
            return Err(LangError::UnsupportedTarget {
                name: (*name).to_string(),
                code: (*code).to_string(),
            });
        }
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
