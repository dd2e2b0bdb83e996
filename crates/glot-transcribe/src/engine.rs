//! Transcription engine — the crate's entry point.
//!
//! Wires segmenter, worker pool, assembler, and diarization merger behind a
//! single `recognize` call. Collaborators are injected as trait objects; the
//! engine owns no models and no global state.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::assemble::assemble;
use crate::diarize::merge_speakers;
use crate::pool::transcribe_windows;
use crate::recognizer::{SpeakerDiarizer, SpeechRecognizer};
use crate::segment::plan_windows;
use crate::types::{AudioBuffer, RecognizeOptions, Transcript, TranscribeError};

/// Tuning knobs for one engine instance.
///
/// Values come from `glot-settings` at the pipeline boundary; the defaults
/// here match the settings defaults so the engine is usable standalone.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Window length for long recordings, in seconds.
    pub segment_seconds: f64,
    /// Recordings at or below this duration skip segmentation entirely.
    pub short_audio_threshold_seconds: f64,
    /// Upper bound on concurrent recognizer calls.
    pub max_workers: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            segment_seconds: 30.0,
            short_audio_threshold_seconds: 30.0,
            max_workers: 6,
        }
    }
}

/// Speech-to-text front door.
pub struct TranscriptionEngine {
    recognizer: Arc<dyn SpeechRecognizer>,
    diarizer: Option<Arc<dyn SpeakerDiarizer>>,
    config: EngineConfig,
}

impl TranscriptionEngine {
    /// Create an engine with no diarizer.
    pub fn new(recognizer: Arc<dyn SpeechRecognizer>, config: EngineConfig) -> Self {
        Self {
            recognizer,
            diarizer: None,
            config,
        }
    }

    /// Attach a diarizer collaborator.
    #[must_use]
    pub fn with_diarizer(mut self, diarizer: Arc<dyn SpeakerDiarizer>) -> Self {
        self.diarizer = Some(diarizer);
        self
    }

    /// Transcribe a decoded recording.
    ///
    /// Long recordings are windowed and fanned out over the worker pool;
    /// short ones take a single recognizer call shaped identically. Returns
    /// [`TranscribeError::RecognizerUnavailable`] when the recognizer reports
    /// itself missing and [`TranscribeError::NoSpeech`] when nothing usable
    /// was recognized anywhere in the recording.
    #[instrument(skip(self, audio), fields(duration = audio.duration_seconds()))]
    pub async fn recognize(
        &self,
        audio: &AudioBuffer,
        options: &RecognizeOptions,
    ) -> Result<Transcript, TranscribeError> {
        if !self.recognizer.available() {
            return Err(TranscribeError::RecognizerUnavailable(
                "speech recognizer is not loaded".to_string(),
            ));
        }

        let duration = audio.duration_seconds();
        let language = options.language.as_deref();

        let mut transcript = if duration > self.config.short_audio_threshold_seconds {
            let windows = plan_windows(duration, self.config.segment_seconds);
            info!(
                windows = windows.len(),
                max_workers = self.config.max_workers,
                "transcribing in segments"
            );
            let results = transcribe_windows(
                Arc::clone(&self.recognizer),
                audio,
                &windows,
                language,
                self.config.max_workers,
            )
            .await;
            assemble(results)
        } else {
            debug!("transcribing in one pass");
            let speech = self
                .recognizer
                .transcribe(audio.samples(), audio.sample_rate(), language)
                .await?;
            Transcript {
                text: speech.text.trim().to_string(),
                language: speech.language,
                spans: speech.spans,
                speakers: None,
                speaker_text: None,
            }
        };

        if transcript.text.is_empty() {
            return Err(TranscribeError::NoSpeech);
        }
        if let Some(forced) = &options.language {
            transcript.language = Some(forced.clone());
        }

        if options.diarize {
            self.diarize_into(&mut transcript, audio).await;
        }
        if !options.timestamps {
            transcript.spans.clear();
        }

        Ok(transcript)
    }

    /// Best-effort diarization: absence or failure never fails the call.
    async fn diarize_into(&self, transcript: &mut Transcript, audio: &AudioBuffer) {
        let Some(diarizer) = &self.diarizer else {
            warn!("diarization requested but no diarizer is configured");
            return;
        };
        match diarizer.diarize(audio).await {
            Ok(intervals) => merge_speakers(transcript, &intervals),
            Err(err) => warn!(error = %err, "diarization failed, continuing without speakers"),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recognizer::{StaticDiarizer, StaticRecognizer};
    use crate::types::SpeakerInterval;
    use assert_matches::assert_matches;

    fn short_audio() -> AudioBuffer {
        AudioBuffer::new(vec![0.1; 16_000], 16_000) // 1 s
    }

    fn long_audio(seconds: usize) -> AudioBuffer {
        AudioBuffer::new(vec![0.1; seconds * 16_000], 16_000)
    }

    fn engine(recognizer: StaticRecognizer) -> TranscriptionEngine {
        TranscriptionEngine::new(Arc::new(recognizer), EngineConfig::default())
    }

    #[tokio::test]
    async fn unavailable_recognizer_is_a_capability_error() {
        let e = engine(StaticRecognizer::unavailable());
        let err = e
            .recognize(&short_audio(), &RecognizeOptions::default())
            .await
            .unwrap_err();
        assert_matches!(err, TranscribeError::RecognizerUnavailable(_));
    }

    #[tokio::test]
    async fn short_audio_takes_the_single_call_path() {
        let e = engine(StaticRecognizer::with_text("hello", None));
        let t = e
            .recognize(&short_audio(), &RecognizeOptions::default())
            .await
            .unwrap();
        assert_eq!(t.text, "hello");
    }

    #[tokio::test]
    async fn long_audio_is_segmented_and_reassembled() {
        // 65 s with 30 s windows: three segments, each recognized as "seg".
        let e = engine(StaticRecognizer::with_text("seg", None));
        let t = e
            .recognize(&long_audio(65), &RecognizeOptions::default())
            .await
            .unwrap();
        assert_eq!(t.text, "seg seg seg");
    }

    #[tokio::test]
    async fn silence_everywhere_is_no_speech() {
        let e = engine(StaticRecognizer::with_text("", None));
        let err = e
            .recognize(&short_audio(), &RecognizeOptions::default())
            .await
            .unwrap_err();
        assert_matches!(err, TranscribeError::NoSpeech);
    }

    #[tokio::test]
    async fn forced_language_overrides_detection() {
        let e = engine(StaticRecognizer::with_text("hallo", Some("en")));
        let options = RecognizeOptions {
            language: Some("de".to_string()),
            ..RecognizeOptions::default()
        };
        let t = e.recognize(&short_audio(), &options).await.unwrap();
        assert_eq!(t.language.as_deref(), Some("de"));
    }

    #[tokio::test]
    async fn timestamps_off_strips_spans() {
        let e = engine(StaticRecognizer::with_text("hello", None));
        let options = RecognizeOptions {
            timestamps: false,
            ..RecognizeOptions::default()
        };
        let t = e.recognize(&short_audio(), &options).await.unwrap();
        assert!(t.spans.is_empty());
    }

    #[tokio::test]
    async fn diarize_attaches_speaker_text() {
        let intervals = vec![SpeakerInterval {
            start: 0.0,
            end: 10.0,
            speaker: "S1".to_string(),
        }];
        let e = engine(StaticRecognizer::with_text("hello", None))
            .with_diarizer(Arc::new(StaticDiarizer::new(intervals)));
        let options = RecognizeOptions {
            diarize: true,
            ..RecognizeOptions::default()
        };
        let t = e.recognize(&short_audio(), &options).await.unwrap();
        assert_eq!(t.speaker_text.as_deref(), Some("[S1]: hello"));
    }

    #[tokio::test]
    async fn failing_diarizer_degrades_gracefully() {
        let e = engine(StaticRecognizer::with_text("hello", None))
            .with_diarizer(Arc::new(StaticDiarizer::failing()));
        let options = RecognizeOptions {
            diarize: true,
            ..RecognizeOptions::default()
        };
        let t = e.recognize(&short_audio(), &options).await.unwrap();
        assert_eq!(t.text, "hello");
        assert!(t.speaker_text.is_none());
    }

    #[tokio::test]
    async fn diarize_without_diarizer_degrades_gracefully() {
        let e = engine(StaticRecognizer::with_text("hello", None));
        let options = RecognizeOptions {
            diarize: true,
            ..RecognizeOptions::default()
        };
        let t = e.recognize(&short_audio(), &options).await.unwrap();
        assert!(t.speaker_text.is_none());
    }
}
