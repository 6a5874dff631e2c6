// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, warn};

use crate::app_config::{Config, TranslationProvider};
use app_controller::Controller;

mod app_config;
mod app_controller;
mod document;
mod errors;
mod extraction;
mod file_utils;
mod language_utils;
mod providers;
mod reconstruct;
mod translation;

/// CLI Wrapper for TranslationProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTranslationProvider {
    DeepLx,
    Ollama,
}

impl From<CliTranslationProvider> for TranslationProvider {
    fn from(cli_provider: CliTranslationProvider) -> Self {
        match cli_provider {
            CliTranslationProvider::DeepLx => TranslationProvider::DeepLx,
            CliTranslationProvider::Ollama => TranslationProvider::Ollama,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

/// doctran - layout-preserving document translation
///
/// Translates the text content of a paginated document while keeping every
/// block at its original position and size. Embedded images are carried over
/// unchanged.
#[derive(Parser, Debug)]
#[command(name = "doctran")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Layout-preserving document translation")]
#[command(long_about = "doctran extracts positioned text and image blocks from a document,
translates the text and rebuilds the document with the original layout.

EXAMPLES:
    doctran report.json                    # Translate using default config (to Spanish)
    doctran -t fr report.json              # Translate to French
    doctran -s en -t de report.json        # Translate from English to German
    doctran -p ollama -m mistral doc.json  # Use a local LLM as the translator
    doctran -j 1 doc.json                  # Disable concurrent page translation

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default
    one will be created automatically.

SUPPORTED PROVIDERS:
    deeplx - DeepLX-compatible translate endpoint (default: http://localhost:1188/translate)
    ollama - Local Ollama server (default model: llama3.2:3b)")]
struct CommandLineOptions {
    /// Input document to translate
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Source language code (e.g., 'en'), or 'auto'
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language code (e.g., 'es', 'fr')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Translation provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliTranslationProvider>,

    /// Model name to use for LLM providers
    #[arg(short, long)]
    model: Option<String>,

    /// Provider endpoint URL
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Maximum number of pages translated concurrently
    #[arg(short = 'j', long)]
    max_concurrency: Option<usize>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color code for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {}\x1B[0m", color, now, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let options = CommandLineOptions::parse();

    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(config_log_level.to_level_filter());
    }

    // Load or create configuration
    let config_path = &options.config_path;
    let mut config = if Path::new(config_path).exists() {
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?
    } else {
        // Create default configuration if not exists
        warn!(
            "Config file not found at '{}', creating default config.",
            config_path
        );

        let config = Config::default();

        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    // Override config with CLI options if provided
    if let Some(source_lang) = &options.source_language {
        config.source_language = source_lang.clone();
    }
    if let Some(target_lang) = &options.target_language {
        config.target_language = target_lang.clone();
    }
    if let Some(provider) = &options.provider {
        config.translation.provider = provider.clone().into();
    }
    if let Some(model) = &options.model {
        config.translation.model = model.clone();
    }
    if let Some(endpoint) = &options.endpoint {
        config.translation.endpoint = endpoint.clone();
    }
    if let Some(max_concurrency) = options.max_concurrency {
        config.max_concurrency = max_concurrency;
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    // Validate the configuration after loading and overriding
    config
        .validate()
        .context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        log::set_max_level(config.log_level.to_level_filter());
    }

    // Create the controller and run the pipeline
    let controller = Controller::with_config(config)?;
    controller.run(&options.input_path).await?;

    Ok(())
}
