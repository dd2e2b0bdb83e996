//! Collaborator traits for the recognition half, plus deterministic test
//! doubles.
//!
//! The engine never talks to a concrete model: speech recognition and
//! speaker diarization come in as injected trait objects. Concurrency safety
//! of a recognizer handle is an explicit capability ([`SpeechRecognizer::concurrent_safe`]),
//! not an assumption — the worker pool caps itself at one task for handles
//! that cannot take concurrent calls.

use async_trait::async_trait;

use crate::types::{AudioBuffer, RecognizedSpeech, SpeakerInterval, TranscribeError};

/// Speech-to-text collaborator.
///
/// May be invoked many times concurrently when [`concurrent_safe`] is true.
/// Each call can fail independently; the caller decides whether that failure
/// is recoverable.
///
/// [`concurrent_safe`]: SpeechRecognizer::concurrent_safe
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    /// Transcribe mono samples at `sample_rate` Hz.
    ///
    /// `language` forces the source language; `None` lets the recognizer
    /// detect it. Returned span timestamps are relative to the given slice.
    async fn transcribe(
        &self,
        samples: &[f32],
        sample_rate: u32,
        language: Option<&str>,
    ) -> Result<RecognizedSpeech, TranscribeError>;

    /// Whether this handle is safe for concurrent inference calls.
    ///
    /// When false, the worker pool runs segments one at a time.
    fn concurrent_safe(&self) -> bool {
        true
    }

    /// Whether the underlying model is installed and loadable.
    fn available(&self) -> bool {
        true
    }
}

/// Speaker-diarization collaborator.
///
/// Optional: absence degrades to "no diarization" rather than failing the
/// pipeline, and so does a failed call.
#[async_trait]
pub trait SpeakerDiarizer: Send + Sync {
    /// Attribute speech intervals in `audio` to speaker identities.
    async fn diarize(&self, audio: &AudioBuffer) -> Result<Vec<SpeakerInterval>, TranscribeError>;
}

/// Recognizer test double returning a fixed response for every call.
///
/// Deterministic stand-in for engine and pipeline tests, in the spirit of a
/// mock model service: no audio is inspected, the configured
/// [`RecognizedSpeech`] comes back verbatim.
#[derive(Debug, Clone, Default)]
pub struct StaticRecognizer {
    response: RecognizedSpeech,
    available: bool,
}

impl StaticRecognizer {
    /// Always respond with `response`.
    pub fn new(response: RecognizedSpeech) -> Self {
        Self {
            response,
            available: true,
        }
    }

    /// Shorthand for a recognizer that returns plain text with one span
    /// covering the whole slice.
    pub fn with_text(text: &str, language: Option<&str>) -> Self {
        Self::new(RecognizedSpeech {
            text: text.to_string(),
            language: language.map(String::from),
            spans: vec![crate::types::TimedSpan {
                start: 0.0,
                end: 1.0,
                text: text.to_string(),
            }],
        })
    }

    /// A recognizer that reports itself unavailable.
    pub fn unavailable() -> Self {
        Self {
            response: RecognizedSpeech::default(),
            available: false,
        }
    }
}

#[async_trait]
impl SpeechRecognizer for StaticRecognizer {
    async fn transcribe(
        &self,
        _samples: &[f32],
        _sample_rate: u32,
        _language: Option<&str>,
    ) -> Result<RecognizedSpeech, TranscribeError> {
        Ok(self.response.clone())
    }

    fn available(&self) -> bool {
        self.available
    }
}

/// Diarizer test double returning fixed intervals.
#[derive(Debug, Clone, Default)]
pub struct StaticDiarizer {
    intervals: Vec<SpeakerInterval>,
    fail: bool,
}

impl StaticDiarizer {
    /// Always respond with `intervals`.
    pub fn new(intervals: Vec<SpeakerInterval>) -> Self {
        Self {
            intervals,
            fail: false,
        }
    }

    /// A diarizer whose every call fails.
    pub fn failing() -> Self {
        Self {
            intervals: Vec::new(),
            fail: true,
        }
    }
}

#[async_trait]
impl SpeakerDiarizer for StaticDiarizer {
    async fn diarize(
        &self,
        _audio: &AudioBuffer,
    ) -> Result<Vec<SpeakerInterval>, TranscribeError> {
        if self.fail {
            return Err(TranscribeError::Diarization("diarizer exploded".into()));
        }
        Ok(self.intervals.clone())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
