/*!
 * # doctran - layout-preserving document translation
 *
 * A Rust library for translating paginated documents while preserving the
 * position and size of every content block.
 *
 * ## Features
 *
 * - Extract positioned text and image blocks from a paginated document
 * - Translate text blocks via pluggable providers:
 *   - DeepLX (self-hosted DeepL-compatible endpoint)
 *   - Ollama (local LLM)
 * - Per-string error containment: failed translations keep the original text
 * - Bounded concurrent page translation, reassembled in page order
 * - Position-faithful reconstruction through a pluggable document writer
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `document`: Backend contracts (source/sink traits), typed block records
 *   and the reference JSON backend
 * - `extraction`: Page content to ordered block lists
 * - `translation`: Batched translation with retry and fallback:
 *   - `translation::client`: Error-contained translation client
 *   - `translation::page`: Per-page orchestration
 * - `reconstruct`: Ordered pages to positioned draw calls
 * - `app_controller`: Pipeline driver (concurrency, ordering, summary)
 * - `file_utils`: File system operations
 * - `language_utils`: ISO 639-1 language code utilities
 * - `providers`: Client implementations for translation services
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod document;
pub mod errors;
pub mod extraction;
pub mod file_utils;
pub mod language_utils;
pub mod providers;
pub mod reconstruct;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, RunSummary};
pub use document::{BBox, DocumentSink, DocumentSource, ImageBlock, TextBlock, TranslatedPage};
pub use errors::{PipelineError, ProviderError, SinkError, SourceError};
pub use translation::TranslationClient;
