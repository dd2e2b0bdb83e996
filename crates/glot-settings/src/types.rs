//! Settings type definitions.
//!
//! All types use `#[serde(rename_all = "camelCase")]` for the JSON wire
//! format. Each type implements [`Default`] with production default values.
//! `#[serde(default)]` allows partial JSON — missing fields fall back to
//! their defaults during deserialization.

use serde::{Deserialize, Serialize};

/// Root settings type for the glot pipeline.
///
/// Loaded from `~/.glot/settings.json` with defaults applied for missing
/// fields. `GLOT_*` environment variables override specific values.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GlotSettings {
    /// Settings schema version.
    pub version: String,
    /// Application name.
    pub name: String,
    /// Transcription (segmentation + worker pool) settings.
    pub transcription: TranscriptionSettings,
    /// Translation orchestration settings.
    pub translation: TranslationSettings,
    /// Logging configuration.
    pub logging: LoggingSettings,
}

impl Default for GlotSettings {
    fn default() -> Self {
        Self {
            version: "0.1.0".to_string(),
            name: "glot".to_string(),
            transcription: TranscriptionSettings::default(),
            translation: TranslationSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl GlotSettings {
    /// Clamp nonsense values and warn, rather than rejecting the file.
    ///
    /// Called automatically during loading. Users get corrected behavior
    /// instead of a confusing startup error.
    pub fn validate(&mut self) {
        let t = &mut self.transcription;
        if t.segment_seconds <= 0.0 {
            tracing::warn!(
                value = t.segment_seconds,
                "segmentSeconds must be positive, using 30.0"
            );
            t.segment_seconds = 30.0;
        }
        if t.short_audio_threshold_seconds <= 0.0 {
            tracing::warn!(
                value = t.short_audio_threshold_seconds,
                "shortAudioThresholdSeconds must be positive, using 30.0"
            );
            t.short_audio_threshold_seconds = 30.0;
        }
        if t.max_workers == 0 {
            tracing::warn!("maxWorkers must be at least 1, clamping");
            t.max_workers = 1;
        }

        let tr = &mut self.translation;
        if tr.http_concurrency == 0 {
            tracing::warn!("httpConcurrency must be at least 1, clamping");
            tr.http_concurrency = 1;
        }
        if tr.model_concurrency == 0 {
            tracing::warn!("modelConcurrency must be at least 1, clamping");
            tr.model_concurrency = 1;
        }
    }
}

/// Segmentation and worker-pool settings for the recognition half.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TranscriptionSettings {
    /// Fixed window length for long-audio segmentation, in seconds.
    pub segment_seconds: f64,
    /// Audio at or below this duration bypasses segmentation entirely.
    pub short_audio_threshold_seconds: f64,
    /// Upper bound on concurrent segment transcriptions.
    pub max_workers: usize,
    /// Whether to collect per-span timestamps in transcripts.
    pub timestamps: bool,
}

impl Default for TranscriptionSettings {
    fn default() -> Self {
        Self {
            segment_seconds: 30.0,
            short_audio_threshold_seconds: 30.0,
            max_workers: 6,
            timestamps: true,
        }
    }
}

/// One translation backend in the fallback chain.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProviderEndpoint {
    /// Provider name used in logs and chain ordering.
    pub name: String,
    /// Base URL of a LibreTranslate-compatible endpoint.
    pub base_url: String,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for ProviderEndpoint {
    fn default() -> Self {
        Self {
            name: "local".to_string(),
            base_url: "http://127.0.0.1:5000".to_string(),
            timeout_ms: 10_000,
        }
    }
}

/// Translation orchestration settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TranslationSettings {
    /// Fallback chain, tried in list order.
    pub providers: Vec<ProviderEndpoint>,
    /// Concurrency cap for HTTP-backed provider chains.
    pub http_concurrency: usize,
    /// Concurrency cap when the chain contains a local-model provider.
    pub model_concurrency: usize,
    /// Maximum words sent to translation; the rest is truncated.
    pub word_budget: usize,
    /// Recognized text above this many characters skips translation
    /// entirely and is echoed into every target.
    pub skip_above_chars: usize,
}

impl Default for TranslationSettings {
    fn default() -> Self {
        Self {
            providers: vec![ProviderEndpoint::default()],
            http_concurrency: 5,
            model_concurrency: 3,
            word_budget: 100,
            skip_above_chars: 3000,
        }
    }
}

/// Logging configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingSettings {
    /// Default tracing filter when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
