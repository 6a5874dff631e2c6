//! Error-contained translation client.
//!
//! Wraps a [`Translator`] provider and guarantees the callers two things:
//! `translate_batch` returns exactly one string per input string, and it
//! never errors. Failures degrade to the original text, counted so the
//! driver can report them.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use log::{debug, warn};

use crate::app_config::TranslationConfig;
use crate::errors::ProviderError;
use crate::providers::{self, Translator};

/// Translation client with batching, bounded retry and per-string fallback
pub struct TranslationClient {
    /// Provider implementation
    provider: Arc<dyn Translator>,

    /// Retries per failed call; bounds worst-case latency per string
    retry_count: u32,

    /// Delay before a retry
    retry_delay: Duration,

    /// Count of strings that fell back to their original text
    fallback_count: AtomicUsize,
}

impl TranslationClient {
    /// Create a client around an existing provider
    pub fn new(provider: Arc<dyn Translator>, retry_count: u32, retry_delay: Duration) -> Self {
        Self {
            provider,
            retry_count,
            retry_delay,
            fallback_count: AtomicUsize::new(0),
        }
    }

    /// Create a client with the provider described by configuration
    pub fn from_config(config: &TranslationConfig) -> Result<Self, ProviderError> {
        let provider = providers::create_provider(config)?;
        Ok(Self::new(
            provider,
            config.retry_count,
            Duration::from_millis(config.retry_delay_ms),
        ))
    }

    /// Number of strings that degraded to their original text so far
    pub fn fallback_count(&self) -> usize {
        self.fallback_count.load(Ordering::Relaxed)
    }

    /// Translate a batch of strings, one output per input.
    ///
    /// Empty and whitespace-only inputs short-circuit to `""` without
    /// touching the provider. When the provider supports batching, all
    /// remaining strings go out in a single call; a failed or wrong-length
    /// batch response falls back to per-string calls, and a per-string
    /// failure falls back to the original input after the configured retry.
    /// This method never returns an error and never shortens the batch.
    pub async fn translate_batch(
        &self,
        texts: &[String],
        source_lang: &str,
        target_lang: &str,
    ) -> Vec<String> {
        if texts.is_empty() {
            return Vec::new();
        }

        // Degenerate inputs resolve immediately; only real content is sent out.
        let mut out: Vec<Option<String>> = texts
            .iter()
            .map(|t| t.trim().is_empty().then(String::new))
            .collect();
        let pending: Vec<usize> = out
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.is_none().then_some(i))
            .collect();

        if !pending.is_empty() && self.provider.supports_batch() {
            let batch: Vec<String> = pending.iter().map(|&i| texts[i].clone()).collect();
            match self
                .provider
                .translate_batch(&batch, source_lang, target_lang)
                .await
            {
                Ok(translated) if translated.len() == batch.len() => {
                    for (&i, text) in pending.iter().zip(translated) {
                        out[i] = Some(self.accept_or_fallback(text, &texts[i]));
                    }
                }
                Ok(translated) => {
                    warn!(
                        "Batched translation returned {} results for {} inputs, retrying per string",
                        translated.len(),
                        batch.len()
                    );
                }
                Err(e) => {
                    warn!("Batched translation failed, retrying per string: {}", e);
                }
            }
        }

        for &i in &pending {
            if out[i].is_none() {
                out[i] = Some(
                    self.translate_with_retry(&texts[i], source_lang, target_lang)
                        .await,
                );
            }
        }

        out.into_iter().map(Option::unwrap_or_default).collect()
    }

    /// Translate a single string with the same short-circuit and fallback
    /// rules as [`TranslationClient::translate_batch`]
    pub async fn translate_single(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> String {
        if text.trim().is_empty() {
            return String::new();
        }
        self.translate_with_retry(text, source_lang, target_lang)
            .await
    }

    // An empty translation of real content is content loss; treat it as a
    // failed call and keep the original.
    fn accept_or_fallback(&self, translated: String, original: &str) -> String {
        if translated.trim().is_empty() {
            self.fallback_count.fetch_add(1, Ordering::Relaxed);
            original.to_string()
        } else {
            translated
        }
    }

    async fn translate_with_retry(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> String {
        let mut attempt = 0;
        loop {
            match self.provider.translate(text, source_lang, target_lang).await {
                Ok(translated) if !translated.trim().is_empty() => return translated,
                Ok(_) => {
                    debug!("Provider returned an empty translation (attempt {})", attempt + 1);
                }
                Err(e) => {
                    debug!("Translation call failed (attempt {}): {}", attempt + 1, e);
                }
            }

            if attempt >= self.retry_count {
                break;
            }
            attempt += 1;
            tokio::time::sleep(self.retry_delay).await;
        }

        self.fallback_count.fetch_add(1, Ordering::Relaxed);
        warn!(
            "Translation failed after {} attempt(s), keeping original text",
            self.retry_count + 1
        );
        text.to_string()
    }
}
