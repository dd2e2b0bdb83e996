//! Provider fallback chain.
//!
//! Providers are tried in fixed priority order. A provider error, an empty
//! result, or a result identical to the input all fall through to the next
//! provider; only a non-empty, changed result wins. Exhaustion is a typed
//! outcome, not an error — the caller decides how to degrade.

use std::sync::Arc;

use metrics::counter;
use tracing::{debug, warn};

use crate::provider::{ProviderKind, TranslationProvider};

/// What running the chain for one `(text, target)` produced.
#[derive(Debug, Clone, PartialEq)]
pub enum ChainOutcome {
    /// Some provider produced a usable translation.
    Translated {
        /// The translated text.
        text: String,
        /// Name of the provider that produced it.
        provider: String,
    },
    /// Every provider failed or echoed the input back.
    Exhausted,
}

/// Ordered list of providers sharing one fallback policy.
#[derive(Clone)]
pub struct FallbackChain {
    providers: Vec<Arc<dyn TranslationProvider>>,
}

impl FallbackChain {
    /// Build a chain; order is priority order.
    #[must_use]
    pub fn new(providers: Vec<Arc<dyn TranslationProvider>>) -> Self {
        Self { providers }
    }

    /// Whether the chain has any providers at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// The heaviest provider kind present, for fan-out sizing.
    #[must_use]
    pub fn heaviest_kind(&self) -> Option<ProviderKind> {
        if self
            .providers
            .iter()
            .any(|p| p.kind() == ProviderKind::LocalModel)
        {
            Some(ProviderKind::LocalModel)
        } else {
            self.providers.first().map(|p| p.kind())
        }
    }

    /// Run the chain for one target.
    pub async fn translate(&self, text: &str, source: &str, target: &str) -> ChainOutcome {
        for provider in &self.providers {
            match provider.translate_once(text, source, target).await {
                Ok(translated) => {
                    let trimmed = translated.trim();
                    if trimmed.is_empty() || trimmed == text.trim() {
                        debug!(
                            provider = provider.name(),
                            target, "provider echoed or returned nothing, trying next"
                        );
                        counter!("glot_provider_fallbacks_total").increment(1);
                        continue;
                    }
                    return ChainOutcome::Translated {
                        text: translated,
                        provider: provider.name().to_string(),
                    };
                }
                Err(err) => {
                    warn!(
                        provider = provider.name(),
                        target,
                        error = %err,
                        "provider failed, trying next"
                    );
                    counter!("glot_provider_fallbacks_total").increment(1);
                }
            }
        }
        ChainOutcome::Exhausted
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
