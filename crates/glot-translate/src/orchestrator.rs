//! Multi-target translation orchestrator.
//!
//! One request fans out into at most one task per unique target:
//! dedup → detect → identity partition → bounded parallel dispatch →
//! aggregate. The output map is keyed by target language, so completion
//! order can never reorder results. Per-target failures degrade to echoing
//! the source text; the only hard error is having work but no providers.

use std::collections::HashMap;
use std::sync::Arc;

use metrics::counter;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, info, instrument, warn};

use glot_core::detect::{LanguageDetector, ScriptDetector};
use glot_core::lang;
use glot_core::text::word_budget;

use crate::chain::{ChainOutcome, FallbackChain};
use crate::provider::ProviderKind;
use crate::types::{TranslateError, TranslationOutcome, TranslationRequest};

/// Fan-out and size-guard knobs.
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Concurrent targets when every provider is HTTP-backed.
    pub http_concurrency: usize,
    /// Concurrent targets when any provider is a local model.
    pub model_concurrency: usize,
    /// Maximum words dispatched to providers; longer input is cut.
    pub word_budget: usize,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            http_concurrency: 5,
            model_concurrency: 3,
            word_budget: 100,
        }
    }
}

/// Translation front door.
pub struct Orchestrator {
    chain: FallbackChain,
    detector: Box<dyn LanguageDetector>,
    config: OrchestratorConfig,
}

impl Orchestrator {
    /// Create an orchestrator with script-based language detection.
    #[must_use]
    pub fn new(chain: FallbackChain, config: OrchestratorConfig) -> Self {
        Self {
            chain,
            detector: Box::new(ScriptDetector),
            config,
        }
    }

    /// Swap in a different detector.
    #[must_use]
    pub fn with_detector(mut self, detector: Box<dyn LanguageDetector>) -> Self {
        self.detector = detector;
        self
    }

    /// Translate one text into every requested target.
    ///
    /// Duplicated targets collapse to one task; unsupported targets are
    /// skipped with a warning; a target equal to the source copies the text
    /// with zero provider calls; an exhausted provider chain echoes the
    /// source text into that target. Returns
    /// [`TranslateError::NoProviders`] only when providers are needed and
    /// none are configured.
    #[instrument(skip(self, request), fields(targets = request.targets.len()))]
    pub async fn translate(
        &self,
        request: &TranslationRequest,
    ) -> Result<TranslationOutcome, TranslateError> {
        let source = self.resolve_source(request);

        let mut seen: Vec<&'static str> = Vec::new();
        for raw in &request.targets {
            match lang::normalize(raw) {
                Some(code) if !seen.contains(&code) => seen.push(code),
                Some(_) => {}
                None => warn!(target = %raw, "unsupported target language, skipping"),
            }
        }

        let mut translations: HashMap<String, String> = HashMap::new();
        let mut remaining: Vec<&'static str> = Vec::new();
        for code in seen {
            if code == source {
                // Identity target: no provider involved.
                let _ = translations.insert(code.to_string(), request.text.clone());
            } else {
                remaining.push(code);
            }
        }

        if remaining.is_empty() {
            return Ok(TranslationOutcome {
                source_language: source,
                translations,
                truncated: false,
            });
        }
        if self.chain.is_empty() {
            return Err(TranslateError::NoProviders);
        }

        let (dispatch_text, truncated) = word_budget(&request.text, self.config.word_budget);
        if truncated {
            warn!(
                budget = self.config.word_budget,
                "input over word budget, dispatching truncated prefix"
            );
            counter!("glot_translations_truncated_total").increment(1);
        }
        let dispatch_text: Arc<str> = Arc::from(dispatch_text.as_ref());

        let cap = match self.chain.heaviest_kind() {
            Some(ProviderKind::LocalModel) => self.config.model_concurrency,
            _ => self.config.http_concurrency,
        };
        let permits = cap.max(1).min(remaining.len());
        info!(
            targets = remaining.len(),
            concurrency = permits,
            source = %source,
            "dispatching translation fan-out"
        );

        let semaphore = Arc::new(Semaphore::new(permits));
        let mut tasks: JoinSet<(&'static str, String)> = JoinSet::new();
        let source_arc: Arc<str> = Arc::from(source.as_str());

        for target in remaining {
            let chain = self.chain.clone();
            let text = Arc::clone(&dispatch_text);
            let source = Arc::clone(&source_arc);
            let semaphore = Arc::clone(&semaphore);
            let _ = tasks.spawn(async move {
                // Closed only when the JoinSet is dropped, which cannot
                // happen while this task runs.
                let Ok(_permit) = semaphore.acquire_owned().await else {
                    return (target, text.to_string());
                };
                match chain.translate(&text, &source, target).await {
                    ChainOutcome::Translated { text, provider } => {
                        debug!(target, provider = %provider, "target translated");
                        (target, text)
                    }
                    ChainOutcome::Exhausted => {
                        warn!(target, "all providers exhausted, echoing source text");
                        counter!("glot_targets_echoed_total").increment(1);
                        (target, text.to_string())
                    }
                }
            });
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((target, text)) => {
                    let _ = translations.insert(target.to_string(), text);
                }
                Err(err) => error!(error = %err, "translation task failed to join"),
            }
        }

        Ok(TranslationOutcome {
            source_language: source,
            translations,
            truncated,
        })
    }

    fn resolve_source(&self, request: &TranslationRequest) -> String {
        if let Some(code) = request.source.as_deref().and_then(lang::normalize) {
            return code.to_string();
        }
        let detected = self.detector.detect(&request.text);
        debug!(language = detected, "source language detected from script");
        detected.to_string()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
