use std::time::Duration;

use async_trait::async_trait;
use log::error;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::errors::ProviderError;
use crate::providers::Translator;

/// DeepLX client for a self-hosted DeepL-compatible translate endpoint
#[derive(Debug)]
pub struct DeepLx {
    /// HTTP client for API requests
    client: Client,
    /// Full translate endpoint URL
    endpoint: String,
    /// Optional bearer token
    api_key: String,
}

/// DeepLX translate request
#[derive(Debug, Serialize)]
pub struct TranslateRequest {
    /// Text to translate
    pub text: String,
    /// Source language code, uppercased, or "auto"
    pub source_lang: String,
    /// Target language code, uppercased
    pub target_lang: String,
}

/// DeepLX translate response
#[derive(Debug, Deserialize)]
pub struct TranslateResponse {
    /// Service status code, 200 on success
    pub code: i32,
    /// Translated text
    #[serde(default)]
    pub data: String,
}

// DeepLX expects uppercase ISO codes; "auto" stays lowercase.
fn wire_lang(code: &str) -> String {
    if code.eq_ignore_ascii_case("auto") {
        "auto".to_string()
    } else {
        code.to_uppercase()
    }
}

impl DeepLx {
    /// Create a new DeepLX client
    pub fn new(endpoint: &str, api_key: &str, timeout: Duration) -> Result<Self, ProviderError> {
        Url::parse(endpoint)
            .map_err(|e| ProviderError::InvalidEndpoint(format!("{}: {}", endpoint, e)))?;

        Ok(Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            endpoint: endpoint.to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Issue one translate request
    async fn request(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<TranslateResponse, ProviderError> {
        let request = TranslateRequest {
            text: text.to_string(),
            source_lang: wire_lang(source_lang),
            target_lang: wire_lang(target_lang),
        };

        let mut builder = self.client.post(&self.endpoint).json(&request);
        if !self.api_key.is_empty() {
            builder = builder.bearer_auth(&self.api_key);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() || e.is_connect() {
                ProviderError::ConnectionError(e.to_string())
            } else {
                ProviderError::RequestFailed(e.to_string())
            }
        })?;

        let status = response.status();
        if status.as_u16() == 429 {
            return Err(ProviderError::RateLimitExceeded(format!(
                "DeepLX endpoint rate limited: {}",
                status
            )));
        }
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("DeepLX API error ({}): {}", status, message);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        let translated = response
            .json::<TranslateResponse>()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        if translated.code != 200 {
            return Err(ProviderError::ApiError {
                status_code: translated.code.clamp(0, u16::MAX as i32) as u16,
                message: format!("DeepLX returned service code {}", translated.code),
            });
        }

        Ok(translated)
    }
}

#[async_trait]
impl Translator for DeepLx {
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, ProviderError> {
        let response = self.request(text, source_lang, target_lang).await?;
        Ok(response.data)
    }
}
