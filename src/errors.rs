/*!
 * Error types for the doctran application.
 *
 * This module contains custom error types for different parts of the pipeline,
 * using the thiserror crate for ergonomic error definitions.
 */

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when talking to a translation provider
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with a malformed or unparseable endpoint URL
    #[error("Invalid endpoint URL: {0}")]
    InvalidEndpoint(String),

    /// A batched call returned a different number of results than it was sent
    #[error("Batch size mismatch: sent {sent}, received {received}")]
    BatchSizeMismatch {
        /// Number of strings sent
        sent: usize,
        /// Number of strings received
        received: usize,
    },
}

/// Errors raised by a document source (the read side of a document backend)
#[derive(Error, Debug)]
pub enum SourceError {
    /// The document file could not be opened or recognized
    #[error("Failed to open document: {0}")]
    Open(String),

    /// A page index beyond the end of the document was requested
    #[error("Page {page} is out of range, document has {pages} pages")]
    PageOutOfRange {
        /// Requested page index
        page: usize,
        /// Number of pages in the document
        pages: usize,
    },

    /// A page exists but its content could not be decoded
    #[error("Failed to decode page content: {0}")]
    Decode(String),

    /// An embedded image could not be decoded to raw bytes
    #[error("Failed to decode embedded image: {0}")]
    Image(String),
}

/// Errors raised by a document sink (the write side of a document backend)
#[derive(Error, Debug)]
pub enum SinkError {
    /// A block could not be placed on the current page
    #[error("Cannot render block: {0}")]
    Render(String),

    /// The finalized output could not be written to disk
    #[error("Failed to write output: {0}")]
    Write(String),
}

/// Top-level pipeline error type returned by the driver
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The input path does not exist or is not a file
    #[error("Input file not found: {0:?}")]
    InputNotFound(PathBuf),

    /// The input file exists but is not a readable document
    #[error("Failed to open input document: {0}")]
    Open(#[source] SourceError),

    /// A page could not be parsed; fatal for the whole run
    #[error("Failed to extract content from page {page}: {source}")]
    ContentExtraction {
        /// Zero-based index of the failing page
        page: usize,
        /// Underlying source error
        source: SourceError,
    },

    /// A text block could not be rendered; fatal, layout integrity would be lost
    #[error("Failed to render page {page}: {source}")]
    Render {
        /// Zero-based index of the failing page
        page: usize,
        /// Underlying sink error
        source: SinkError,
    },

    /// The output file could not be finalized on disk
    #[error("Failed to write output file {path:?}: {source}")]
    OutputWrite {
        /// Destination path
        path: PathBuf,
        /// Underlying sink error
        source: SinkError,
    },

    /// The provider could not be constructed from configuration
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// A page task was abandoned because another page already failed extraction
    #[error("Page processing cancelled after another page failed")]
    Cancelled,
}

impl PipelineError {
    /// Page index the error is attached to, if it concerns a single page
    pub fn page(&self) -> Option<usize> {
        match self {
            Self::ContentExtraction { page, .. } | Self::Render { page, .. } => Some(*page),
            _ => None,
        }
    }
}
