//! `TranslationProvider` trait and provider-side error taxonomy.
//!
//! Providers translate one `(text, source, target)` triple at a time and
//! know nothing about fan-out, fallback order, or dedup; that all lives in
//! the orchestrator.

use async_trait::async_trait;

/// How heavy a provider's backing engine is.
///
/// Drives the fan-out cap: chains containing a local model are throttled
/// harder than pure HTTP chains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    /// Remote HTTP service; concurrency is cheap.
    Http,
    /// In-process model; each call holds significant memory.
    LocalModel,
}

/// Errors one provider call can produce.
///
/// All variants are recoverable from the chain's point of view; the next
/// provider in priority order is tried.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// Request never completed (connect, timeout, TLS).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Provider answered with a non-success status.
    #[error("HTTP {status}: {message}")]
    Status {
        /// Response status code.
        status: u16,
        /// Response body, truncated.
        message: String,
    },

    /// Response arrived but did not have the expected shape.
    #[error("malformed response: {message}")]
    Malformed {
        /// What was wrong with the body.
        message: String,
    },
}

/// One translation backend.
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    /// Stable name for logs and fallback diagnostics.
    fn name(&self) -> &str;

    /// Engine weight class, see [`ProviderKind`].
    fn kind(&self) -> ProviderKind;

    /// Translate `text` from `source` to `target`, one shot, no retries.
    async fn translate_once(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, ProviderError>;
}
