//! Request/outcome types for the translation half.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One translation job as the caller states it.
///
/// `targets` may contain duplicates and unsupported codes; the orchestrator
/// dedups and normalizes before any work is dispatched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationRequest {
    /// Text to translate.
    pub text: String,
    /// Source language; detected from script when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Requested target languages, in caller order.
    pub targets: Vec<String>,
}

/// What one job produced.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationOutcome {
    /// Source language used, detected or caller-supplied.
    pub source_language: String,
    /// One entry per unique target; identity targets and exhausted chains
    /// carry the source text.
    pub translations: HashMap<String, String>,
    /// Whether the input was cut to the word budget before dispatch.
    pub truncated: bool,
}

/// Errors surfaced by the orchestrator.
///
/// Per-target and per-provider failures are absorbed by the fallback chain
/// and never appear here; only capability-missing conditions do.
#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    /// Work to do but no providers configured.
    #[error("no translation providers configured")]
    NoProviders,
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_deserializes_camel_case() {
        let req: TranslationRequest =
            serde_json::from_str(r#"{"text":"hi","targets":["ru","kk"]}"#).unwrap();
        assert_eq!(req.text, "hi");
        assert!(req.source.is_none());
        assert_eq!(req.targets, vec!["ru", "kk"]);
    }

    #[test]
    fn outcome_serializes_camel_case() {
        let outcome = TranslationOutcome {
            source_language: "en".to_string(),
            translations: HashMap::from([("ru".to_string(), "привет".to_string())]),
            truncated: true,
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["sourceLanguage"], "en");
        assert_eq!(json["truncated"], true);
        assert_eq!(json["translations"]["ru"], "привет");
    }
}
