use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use tokio::sync::Semaphore;

use crate::app_config::Config;
use crate::document::json_doc::{JsonSink, JsonSource};
use crate::document::model::TranslatedPage;
use crate::document::{DocumentSink, DocumentSource};
use crate::errors::{PipelineError, ProviderError};
use crate::file_utils::FileManager;
use crate::language_utils;
use crate::providers::Translator;
use crate::reconstruct::Reconstructor;
use crate::translation::{PageTranslator, TranslationClient};

// @module: Pipeline driver for document translation

/// Outcome of one successful pipeline run
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Path of the generated document
    pub output_path: PathBuf,
    /// Pages rendered
    pub pages: usize,
    /// Text blocks drawn
    pub text_blocks: usize,
    /// Strings that fell back to their original text
    pub fallbacks: usize,
    /// Image blocks drawn
    pub images_drawn: usize,
    /// Image blocks skipped by the writer
    pub images_skipped: usize,
}

/// Main pipeline driver for document translation
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Injected provider; config-built when absent
    provider: Option<Arc<dyn Translator>>,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> anyhow::Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            provider: None,
        })
    }

    /// Create a controller with an explicit provider, bypassing the
    /// configured one. Used by tests and embedders.
    pub fn with_provider(config: Config, provider: Arc<dyn Translator>) -> anyhow::Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            provider: Some(provider),
        })
    }

    fn build_client(&self) -> Result<TranslationClient, ProviderError> {
        let translation = &self.config.translation;
        match &self.provider {
            Some(provider) => Ok(TranslationClient::new(
                Arc::clone(provider),
                translation.retry_count,
                Duration::from_millis(translation.retry_delay_ms),
            )),
            None => TranslationClient::from_config(translation),
        }
    }

    /// Run the whole pipeline on a JSON document file.
    ///
    /// The output path is derived as `<stem>_<lang>.<ext>` next to the
    /// input; the file appears only on full success.
    pub async fn run(&self, input_path: &Path) -> Result<RunSummary, PipelineError> {
        if !FileManager::file_exists(input_path) {
            return Err(PipelineError::InputNotFound(input_path.to_path_buf()));
        }

        let output_path =
            FileManager::derive_output_path(input_path, &self.config.target_language);

        let source = Arc::new(JsonSource::open(input_path).map_err(PipelineError::Open)?);
        let title = source
            .title()
            .unwrap_or_else(|| FileManager::title_from_path(input_path));
        let mut sink = JsonSink::new();

        self.run_with_backend(&output_path, Some(&title), source, &mut sink)
            .await
    }

    /// Run the pipeline against explicit backend implementations.
    ///
    /// Pages are translated by a bounded worker pool; completion order is
    /// not page order, so finished pages are merged back by index before
    /// reconstruction. If any page fails extraction the remaining workers
    /// stand down and the run aborts without touching `output_path`.
    pub async fn run_with_backend(
        &self,
        output_path: &Path,
        title: Option<&str>,
        source: Arc<dyn DocumentSource>,
        sink: &mut dyn DocumentSink,
    ) -> Result<RunSummary, PipelineError> {
        let start_time = std::time::Instant::now();

        let client = Arc::new(self.build_client()?);
        let translator = Arc::new(PageTranslator::new(
            Arc::clone(&client),
            self.config.source_language.clone(),
            self.config.target_language.clone(),
        ));

        let page_count = source.page_count();
        let target_name = language_utils::get_language_name(&self.config.target_language)
            .unwrap_or_else(|_| self.config.target_language.clone());
        info!(
            "🚀 doctran: {} page(s) to {} via {}",
            page_count,
            target_name,
            self.config.translation.provider.display_name()
        );

        let progress_bar = ProgressBar::new(page_count as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} pages ({percent}%) {msg} {eta}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("█▓▒░"));
        progress_bar.set_message("Translating");

        let concurrency = self.config.max_concurrency.max(1);
        let semaphore = Arc::new(Semaphore::new(concurrency));
        let completed = Arc::new(AtomicUsize::new(0));
        let cancelled = Arc::new(AtomicBool::new(false));

        let results = stream::iter(0..page_count)
            .map(|page| {
                let source = Arc::clone(&source);
                let translator = Arc::clone(&translator);
                let semaphore = Arc::clone(&semaphore);
                let completed = Arc::clone(&completed);
                let cancelled = Arc::clone(&cancelled);
                let progress_bar = progress_bar.clone();

                async move {
                    let _permit = semaphore.acquire().await.unwrap();

                    // Another page already failed; the run is doomed, don't
                    // spend provider quota on work that will be discarded.
                    if cancelled.load(Ordering::SeqCst) {
                        return (page, Err(PipelineError::Cancelled));
                    }

                    let result = translator.translate_page(source.as_ref(), page).await;
                    if result.is_err() {
                        cancelled.store(true, Ordering::SeqCst);
                    }

                    let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
                    progress_bar.set_position(done as u64);

                    (page, result)
                }
            })
            .buffer_unordered(concurrency)
            .collect::<Vec<_>>()
            .await;

        progress_bar.finish_and_clear();

        // Merge completed pages back into ascending page order.
        let mut sorted = results;
        sorted.sort_by_key(|(index, _)| *index);

        let mut pages: Vec<TranslatedPage> = Vec::with_capacity(page_count);
        let mut first_error: Option<PipelineError> = None;
        for (_, result) in sorted {
            match result {
                Ok(page) => pages.push(page),
                // Superseded by the error that triggered cancellation
                Err(PipelineError::Cancelled) => {}
                Err(e) => {
                    if first_error.is_none() {
                        first_error = Some(e);
                    }
                }
            }
        }
        if let Some(e) = first_error {
            return Err(e);
        }

        if let Some(title) = title {
            let translated = client
                .translate_single(
                    title,
                    &self.config.source_language,
                    &self.config.target_language,
                )
                .await;
            if !translated.is_empty() {
                sink.set_title(&translated);
            }
        }

        let stats = Reconstructor::build(&pages, sink, output_path)?;
        let fallbacks = client.fallback_count();

        if fallbacks > 0 {
            warn!(
                "{} text block(s) kept their original text after translation failures",
                fallbacks
            );
        }
        info!(
            "Translation complete in {}: {} page(s), {} text block(s) ({} fallback(s)), {} image(s) drawn, {} skipped",
            Self::format_duration(start_time.elapsed()),
            stats.pages,
            stats.text_blocks,
            fallbacks,
            stats.images_drawn,
            stats.images_skipped
        );
        info!("Success: {}", output_path.display());

        Ok(RunSummary {
            output_path: output_path.to_path_buf(),
            pages: stats.pages,
            text_blocks: stats.text_blocks,
            fallbacks,
            images_drawn: stats.images_drawn,
            images_skipped: stats.images_skipped,
        })
    }

    // Format duration in a human-readable format (HH:MM:SS)
    fn format_duration(duration: std::time::Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
