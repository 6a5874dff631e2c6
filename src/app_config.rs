use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::language_utils;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Source language code (ISO 639-1, or "auto" for provider detection)
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Target language code (ISO 639-1)
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Maximum number of pages translated concurrently
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    /// Translation config
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_language: default_source_language(),
            target_language: default_target_language(),
            max_concurrency: default_max_concurrency(),
            translation: TranslationConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Validate the configuration, returning the first problem found
    pub fn validate(&self) -> Result<()> {
        language_utils::validate_language_code(&self.source_language)?;
        language_utils::validate_language_code(&self.target_language)?;
        if self.target_language.eq_ignore_ascii_case(language_utils::AUTO_LANGUAGE) {
            return Err(anyhow!("Target language cannot be \"auto\""));
        }
        if self.max_concurrency == 0 {
            return Err(anyhow!("max_concurrency must be a positive integer"));
        }
        self.translation.validate()
    }
}

/// Translation provider type
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslationProvider {
    // @provider: DeepLX-compatible translate endpoint
    #[default]
    DeepLx,
    // @provider: Ollama (local LLM, prompt-based translation)
    Ollama,
}

impl TranslationProvider {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::DeepLx => "DeepLX",
            Self::Ollama => "Ollama",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::DeepLx => "deeplx".to_string(),
            Self::Ollama => "ollama".to_string(),
        }
    }

    // @returns: Default endpoint for the provider
    pub fn default_endpoint(&self) -> &str {
        match self {
            Self::DeepLx => "http://localhost:1188/translate",
            Self::Ollama => "http://localhost:11434",
        }
    }
}

// Implement Display trait for TranslationProvider
impl std::fmt::Display for TranslationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

// Implement FromStr trait for TranslationProvider
impl std::str::FromStr for TranslationProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "deeplx" => Ok(Self::DeepLx),
            "ollama" => Ok(Self::Ollama),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Provider to use
    #[serde(default)]
    pub provider: TranslationProvider,

    /// Service endpoint URL; empty means the provider default
    #[serde(default = "String::new")]
    pub endpoint: String,

    /// Model name, only meaningful for LLM providers
    #[serde(default = "default_model")]
    pub model: String,

    /// API key, only meaningful for authenticated endpoints
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Retries per failed call before falling back to the original text
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,

    /// Delay between a failed call and its retry, in milliseconds
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            provider: TranslationProvider::default(),
            endpoint: String::new(),
            model: default_model(),
            api_key: String::new(),
            timeout_secs: default_timeout_secs(),
            retry_count: default_retry_count(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

impl TranslationConfig {
    /// Endpoint to use, falling back to the provider default when unset
    pub fn get_endpoint(&self) -> String {
        if self.endpoint.is_empty() {
            self.provider.default_endpoint().to_string()
        } else {
            self.endpoint.clone()
        }
    }

    /// Validate the translation settings
    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            return Err(anyhow!("timeout_secs must be positive"));
        }
        if self.provider == TranslationProvider::Ollama && self.model.is_empty() {
            return Err(anyhow!("Ollama provider requires a model name"));
        }
        Ok(())
    }
}

/// Log level configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Error level
    Error,
    /// Warning level
    Warn,
    /// Info level
    #[default]
    Info,
    /// Debug level
    Debug,
    /// Trace level
    Trace,
}

impl LogLevel {
    /// Convert to the log crate's level filter
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_source_language() -> String {
    "auto".to_string()
}

fn default_target_language() -> String {
    "es".to_string()
}

fn default_max_concurrency() -> usize {
    5
}

fn default_model() -> String {
    "llama3.2:3b".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_retry_count() -> u32 {
    1
}

fn default_retry_delay_ms() -> u64 {
    500
}
