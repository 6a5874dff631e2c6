/*!
 * Provider implementations for different translation services.
 *
 * This module contains client implementations for translation backends:
 * - DeepLX: self-hosted DeepL-compatible translate endpoint
 * - Ollama: local LLM server, prompt-based translation
 */

use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::app_config::{TranslationConfig, TranslationProvider};
use crate::errors::ProviderError;

/// Common trait for all translation providers
///
/// The trait is object-safe so the pipeline can hold an `Arc<dyn Translator>`
/// chosen at runtime from configuration, and tests can inject scripted
/// implementations.
#[async_trait]
pub trait Translator: Send + Sync + Debug {
    /// Translate a single string
    ///
    /// # Arguments
    /// * `text` - The text to translate, guaranteed non-empty by the caller
    /// * `source_lang` - ISO 639-1 source code, or "auto"
    /// * `target_lang` - ISO 639-1 target code
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, ProviderError>;

    /// Translate a batch of strings in one round-trip
    ///
    /// The default implementation maps over [`Translator::translate`];
    /// providers that support true batching override it. Implementations
    /// must return exactly one result per input string.
    async fn translate_batch(
        &self,
        texts: &[String],
        source_lang: &str,
        target_lang: &str,
    ) -> Result<Vec<String>, ProviderError> {
        let mut out = Vec::with_capacity(texts.len());
        for text in texts {
            out.push(self.translate(text, source_lang, target_lang).await?);
        }
        Ok(out)
    }

    /// Whether a single batched call per page is worth attempting
    fn supports_batch(&self) -> bool {
        false
    }

    /// Test the connection to the provider with a trivial request
    async fn test_connection(
        &self,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<(), ProviderError> {
        self.translate("hello", source_lang, target_lang)
            .await
            .map(|_| ())
    }
}

/// Build the configured provider
pub fn create_provider(config: &TranslationConfig) -> Result<Arc<dyn Translator>, ProviderError> {
    let timeout = Duration::from_secs(config.timeout_secs);
    match config.provider {
        TranslationProvider::DeepLx => Ok(Arc::new(deeplx::DeepLx::new(
            &config.get_endpoint(),
            &config.api_key,
            timeout,
        )?)),
        TranslationProvider::Ollama => Ok(Arc::new(ollama::Ollama::new(
            &config.get_endpoint(),
            &config.model,
            timeout,
        )?)),
    }
}

pub mod deeplx;
pub mod ollama;
