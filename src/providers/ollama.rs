use std::time::Duration;

use async_trait::async_trait;
use log::error;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::errors::ProviderError;
use crate::language_utils;
use crate::providers::Translator;

/// Ollama client translating via a local LLM
#[derive(Debug)]
pub struct Ollama {
    /// HTTP client for API requests
    client: Client,
    /// Base URL of the Ollama server
    base_url: String,
    /// Model to generate with
    model: String,
}

/// Ollama generation request
#[derive(Debug, Serialize)]
pub struct GenerationRequest {
    /// The model to use
    pub model: String,
    /// The prompt to complete
    pub prompt: String,
    /// Whether to stream the response
    pub stream: bool,
}

/// Ollama generation response
#[derive(Debug, Deserialize)]
pub struct GenerationResponse {
    /// Generated text
    #[serde(default)]
    pub response: String,
}

impl Ollama {
    /// Create a new Ollama client
    pub fn new(endpoint: &str, model: &str, timeout: Duration) -> Result<Self, ProviderError> {
        let url = Url::parse(endpoint)
            .map_err(|e| ProviderError::InvalidEndpoint(format!("{}: {}", endpoint, e)))?;

        Ok(Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            base_url: url.as_str().trim_end_matches('/').to_string(),
            model: model.to_string(),
        })
    }

    // Builds a translation prompt. Display names make the instruction less
    // ambiguous to small models than bare ISO codes.
    fn build_prompt(&self, text: &str, source_lang: &str, target_lang: &str) -> String {
        let target = language_utils::get_language_name(target_lang)
            .unwrap_or_else(|_| target_lang.to_string());
        let source_part = if source_lang.eq_ignore_ascii_case(language_utils::AUTO_LANGUAGE) {
            String::new()
        } else {
            let source = language_utils::get_language_name(source_lang)
                .unwrap_or_else(|_| source_lang.to_string());
            format!(" from {}", source)
        };
        format!(
            "Translate the following text{} to {}. \
             Preserve line breaks. Reply with only the translation, nothing else.\n\n{}",
            source_part, target, text
        )
    }

    /// Complete a generation request
    pub async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, ProviderError> {
        let api_url = format!("{}/api/generate", self.base_url);

        let response = self
            .client
            .post(&api_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() || e.is_connect() {
                    ProviderError::ConnectionError(e.to_string())
                } else {
                    ProviderError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Ollama API error ({}): {}", status, message);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        response
            .json::<GenerationResponse>()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))
    }
}

#[async_trait]
impl Translator for Ollama {
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, ProviderError> {
        let request = GenerationRequest {
            model: self.model.clone(),
            prompt: self.build_prompt(text, source_lang, target_lang),
            stream: false,
        };

        let response = self.generate(request).await?;
        Ok(response.response.trim().to_string())
    }
}
