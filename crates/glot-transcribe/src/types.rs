//! Core types for the recognition half of the pipeline.
//!
//! Everything here is a transient, per-request value object: created for one
//! `recognize` call, owned by exactly one stage at a time, and never shared
//! mutably between requests.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Decoded audio shared read-only across transcription workers.
///
/// The sample vector sits behind an `Arc` so worker tasks can hold cheap
/// clones while slicing their own windows out of it.
#[derive(Debug, Clone)]
pub struct AudioBuffer {
    samples: Arc<Vec<f32>>,
    sample_rate: u32,
}

impl AudioBuffer {
    /// Wrap decoded mono samples at the given sample rate.
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples: Arc::new(samples),
            sample_rate,
        }
    }

    /// All samples.
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Total duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / f64::from(self.sample_rate)
    }

    /// Samples between `start` and `end` seconds, clamped to the buffer.
    pub fn slice_seconds(&self, start: f64, end: f64) -> &[f32] {
        let rate = f64::from(self.sample_rate);
        let lo = ((start.max(0.0) * rate) as usize).min(self.samples.len());
        let hi = ((end.max(0.0) * rate) as usize).min(self.samples.len());
        &self.samples[lo..hi.max(lo)]
    }
}

/// One fixed-length window of the audio timeline, produced by the segmenter.
///
/// Immutable once created; consumed by exactly one worker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioWindow {
    /// Ordinal position, starting at 0.
    pub index: usize,
    /// Window start in seconds.
    pub start: f64,
    /// Window end in seconds (exclusive).
    pub end: f64,
}

/// A piece of recognized text with absolute timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimedSpan {
    /// Start time in seconds.
    pub start: f64,
    /// End time in seconds.
    pub end: f64,
    /// Recognized text for this span.
    pub text: String,
}

/// What a recognizer returns for one audio slice.
///
/// Span timestamps are relative to the slice; the worker pool offsets them
/// to absolute times.
#[derive(Debug, Clone, Default)]
pub struct RecognizedSpeech {
    /// Recognized text.
    pub text: String,
    /// Language the recognizer detected, if any (short code or full name).
    pub language: Option<String>,
    /// Timed spans within the slice.
    pub spans: Vec<TimedSpan>,
}

/// Per-window transcription result, keyed by the window's index.
///
/// Arrival order is a race; ordering is always re-derived from `index`.
#[derive(Debug, Clone)]
pub struct SegmentResult {
    /// Index of the window this result belongs to.
    pub index: usize,
    /// Recognized text (may be empty on per-segment failure).
    pub text: String,
    /// Language guess from this segment, if any.
    pub language: Option<String>,
    /// Timed spans with absolute timestamps.
    pub spans: Vec<TimedSpan>,
}

impl SegmentResult {
    /// Empty result for a failed segment — recognition is best-effort per
    /// segment and an empty result never aborts the batch.
    pub fn empty(index: usize) -> Self {
        Self {
            index,
            text: String::new(),
            language: None,
            spans: Vec::new(),
        }
    }
}

/// A speech interval attributed to one speaker by the diarizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeakerInterval {
    /// Interval start in seconds.
    pub start: f64,
    /// Interval end in seconds.
    pub end: f64,
    /// Speaker identity label.
    pub speaker: String,
}

/// Canonical output of the recognition half.
///
/// Invariant: `spans` is globally non-decreasing in start time once
/// assembled, regardless of worker completion order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transcript {
    /// Full concatenated text.
    pub text: String,
    /// Detected language, if any segment reported one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Timed spans in start-time order.
    pub spans: Vec<TimedSpan>,
    /// Raw diarizer intervals, when diarization ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speakers: Option<Vec<SpeakerInterval>>,
    /// Grouped `[speaker]: text` rendering, when diarization ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speaker_text: Option<String>,
}

/// Options for one `recognize` call.
#[derive(Debug, Clone)]
pub struct RecognizeOptions {
    /// Force this source language instead of letting the recognizer detect.
    pub language: Option<String>,
    /// Keep per-span timestamps in the returned transcript.
    pub timestamps: bool,
    /// Attribute spans to speakers (requires a configured diarizer).
    pub diarize: bool,
}

impl Default for RecognizeOptions {
    fn default() -> Self {
        Self {
            language: None,
            timestamps: true,
            diarize: false,
        }
    }
}

/// Errors surfaced by the recognition half.
///
/// Per-segment failures are absorbed into empty [`SegmentResult`]s and never
/// appear here; only whole-call conditions do.
#[derive(Debug, thiserror::Error)]
pub enum TranscribeError {
    /// The recognizer collaborator is not available (capability missing).
    #[error("recognizer not available: {0}")]
    RecognizerUnavailable(String),

    /// A recognizer call failed (recoverable per call).
    #[error("inference error: {0}")]
    Inference(String),

    /// The diarizer collaborator failed (recoverable; callers degrade).
    #[error("diarization error: {0}")]
    Diarization(String),

    /// Every segment failed or was silent — nothing was recognized.
    #[error("recognition produced no text")]
    NoSpeech,

    /// I/O error (scratch files, file-input recognizers).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
