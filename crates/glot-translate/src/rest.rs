//! REST provider for LibreTranslate-shaped endpoints.
//!
//! `POST {base_url}/translate` with `{q, source, target}`, expecting
//! `{translatedText}` back. Both self-hosted LibreTranslate and the various
//! gateway services in front of google/bing/yandex engines speak this shape.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, instrument};

use crate::provider::{ProviderError, ProviderKind, TranslationProvider};

/// How much of an error body to keep in diagnostics.
const ERROR_BODY_LIMIT: usize = 200;

/// A LibreTranslate-shaped HTTP translation backend.
pub struct RestTranslator {
    name: String,
    base_url: String,
    client: reqwest::Client,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslateResponse {
    translated_text: String,
}

impl RestTranslator {
    /// Create a translator for `base_url` with a fresh HTTP client.
    #[must_use]
    pub fn new(name: &str, base_url: &str, timeout: Duration) -> Self {
        Self::with_client(name, base_url, timeout, reqwest::Client::new())
    }

    /// Create a translator sharing an existing HTTP client.
    #[must_use]
    pub fn with_client(
        name: &str,
        base_url: &str,
        timeout: Duration,
        client: reqwest::Client,
    ) -> Self {
        Self {
            name: name.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            timeout,
        }
    }
}

#[async_trait]
impl TranslationProvider for RestTranslator {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Http
    }

    #[instrument(skip(self, text), fields(provider = %self.name))]
    async fn translate_once(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, ProviderError> {
        let url = format!("{}/translate", self.base_url);
        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .json(&json!({ "q": text, "source": source, "target": target }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message: String = body.chars().take(ERROR_BODY_LIMIT).collect();
            return Err(ProviderError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body: TranslateResponse =
            response
                .json()
                .await
                .map_err(|e| ProviderError::Malformed {
                    message: e.to_string(),
                })?;
        debug!(chars = body.translated_text.len(), "translation received");
        Ok(body.translated_text)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
