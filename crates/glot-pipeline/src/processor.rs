//! `MediaProcessor` — the two entry points callers consume.
//!
//! Wires settings, the transcription engine, and the translation
//! orchestrator into `recognize`, `translate`, and the combined `process`.
//! Collaborators are injected; the processor itself holds no models.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, instrument, warn};

use glot_core::detect::{LanguageDetector, ScriptDetector};
use glot_core::lang;
use glot_settings::types::GlotSettings;
use glot_transcribe::{
    EngineConfig, RecognizeOptions, SpeakerDiarizer, SpeechRecognizer, TranscriptionEngine,
    Transcript,
};
use glot_translate::{
    FallbackChain, Orchestrator, OrchestratorConfig, RestTranslator, TranslationOutcome,
    TranslationProvider, TranslationRequest,
};

use crate::PipelineError;
use crate::audio::read_wav;

/// Output of the combined recognize-then-translate flow.
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    /// Recognition result, with the language normalized to a short code
    /// where the recognizer's label is known.
    pub transcript: Transcript,
    /// Translation of the recognized text into every requested target.
    pub translation: TranslationOutcome,
}

/// Media front door: decode, recognize, translate.
pub struct MediaProcessor {
    engine: TranscriptionEngine,
    orchestrator: Orchestrator,
    skip_above_chars: usize,
    timestamps_default: bool,
}

impl MediaProcessor {
    /// Build a processor from settings and an injected recognizer.
    ///
    /// Validates the language tables up front so a broken build fails at
    /// construction, not mid-request. The provider chain is built from the
    /// ordered settings list.
    pub fn new(
        recognizer: Arc<dyn SpeechRecognizer>,
        settings: &GlotSettings,
    ) -> Result<Self, PipelineError> {
        lang::validate_tables()?;

        let engine = TranscriptionEngine::new(
            recognizer,
            EngineConfig {
                segment_seconds: settings.transcription.segment_seconds,
                short_audio_threshold_seconds: settings
                    .transcription
                    .short_audio_threshold_seconds,
                max_workers: settings.transcription.max_workers,
            },
        );

        let providers: Vec<Arc<dyn TranslationProvider>> = settings
            .translation
            .providers
            .iter()
            .map(|endpoint| {
                Arc::new(RestTranslator::new(
                    &endpoint.name,
                    &endpoint.base_url,
                    Duration::from_millis(endpoint.timeout_ms),
                )) as Arc<dyn TranslationProvider>
            })
            .collect();
        let orchestrator = Orchestrator::new(
            FallbackChain::new(providers),
            OrchestratorConfig {
                http_concurrency: settings.translation.http_concurrency,
                model_concurrency: settings.translation.model_concurrency,
                word_budget: settings.translation.word_budget,
            },
        );

        Ok(Self {
            engine,
            orchestrator,
            skip_above_chars: settings.translation.skip_above_chars,
            timestamps_default: settings.transcription.timestamps,
        })
    }

    /// Attach a diarizer collaborator.
    #[must_use]
    pub fn with_diarizer(mut self, diarizer: Arc<dyn SpeakerDiarizer>) -> Self {
        self.engine = self.engine.with_diarizer(diarizer);
        self
    }

    /// Default recognize options from settings.
    #[must_use]
    pub fn default_options(&self) -> RecognizeOptions {
        RecognizeOptions {
            timestamps: self.timestamps_default,
            ..RecognizeOptions::default()
        }
    }

    /// Decode `path` and transcribe it.
    ///
    /// The recognizer's language label is normalized to a short code when
    /// the table knows it ("russian" becomes "ru"); unknown labels pass
    /// through untouched.
    #[instrument(skip(self, options), fields(path = %path.display()))]
    pub async fn recognize(
        &self,
        path: &Path,
        options: &RecognizeOptions,
    ) -> Result<Transcript, PipelineError> {
        let audio = read_wav(path)?;
        let mut transcript = self.engine.recognize(&audio, options).await?;
        if let Some(label) = &transcript.language {
            if let Some(code) = lang::normalize(label) {
                transcript.language = Some(code.to_string());
            }
        }
        Ok(transcript)
    }

    /// Translate free text into every requested target.
    #[instrument(skip(self, text), fields(targets = targets.len()))]
    pub async fn translate(
        &self,
        text: &str,
        source: Option<&str>,
        targets: &[String],
    ) -> Result<TranslationOutcome, PipelineError> {
        let request = TranslationRequest {
            text: text.to_string(),
            source: source.map(String::from),
            targets: targets.to_vec(),
        };
        Ok(self.orchestrator.translate(&request).await?)
    }

    /// Recognize `path`, then translate the transcript into `targets`.
    ///
    /// Transcripts above the size guard skip translation and echo the
    /// recognized text into every requested target.
    #[instrument(skip(self), fields(path = %path.display(), targets = targets.len()))]
    pub async fn process(
        &self,
        path: &Path,
        targets: &[String],
        options: &RecognizeOptions,
    ) -> Result<ProcessOutput, PipelineError> {
        let transcript = self.recognize(path, options).await?;

        let translation = if transcript.text.chars().count() > self.skip_above_chars {
            warn!(
                chars = transcript.text.chars().count(),
                limit = self.skip_above_chars,
                "transcript over size guard, echoing source into targets"
            );
            echo_into_targets(&transcript, targets)
        } else {
            self.translate(&transcript.text, transcript.language.as_deref(), targets)
                .await?
        };

        info!(
            language = translation.source_language,
            targets = translation.translations.len(),
            "media processed"
        );
        Ok(ProcessOutput {
            transcript,
            translation,
        })
    }
}

/// Size-guard degradation: every requested target gets the source text.
fn echo_into_targets(transcript: &Transcript, targets: &[String]) -> TranslationOutcome {
    let source = transcript
        .language
        .as_deref()
        .and_then(lang::normalize)
        .unwrap_or_else(|| ScriptDetector.detect(&transcript.text));

    let mut outcome = TranslationOutcome {
        source_language: source.to_string(),
        ..TranslationOutcome::default()
    };
    for target in targets {
        if let Some(code) = lang::normalize(target) {
            let _ = outcome
                .translations
                .entry(code.to_string())
                .or_insert_with(|| transcript.text.clone());
        }
    }
    outcome
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
