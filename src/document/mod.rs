/*!
 * Document backend contracts and the reference JSON backend.
 *
 * The pipeline itself owns no file format. It reads pages through
 * [`DocumentSource`] and emits positioned draw calls through
 * [`DocumentSink`]; any paginated format can be plugged in behind these two
 * traits. The bundled [`json_doc`] backend implements both over a simple
 * JSON page-geometry format and is what the CLI uses.
 */

use std::path::Path;

use bytes::Bytes;

use crate::errors::{SinkError, SourceError};

pub mod json_doc;
pub mod model;

pub use model::{BBox, ImageBlock, ImageRef, TextBlock, TranslatedPage, TranslatedTextBlock};

/// Read side of a paginated document.
///
/// All methods take `&self` and implementations must tolerate concurrent
/// reads: the driver shares one source across parallel page tasks behind an
/// `Arc`. Block enumeration order must be deterministic and stable across
/// calls for the same page, because it becomes the final draw order.
pub trait DocumentSource: Send + Sync {
    /// Number of pages in the document
    fn page_count(&self) -> usize;

    /// Document title from metadata, if the backend carries one
    fn title(&self) -> Option<String> {
        None
    }

    /// Positioned text blocks of a page, in the backend's native order
    fn text_blocks(&self, page: usize) -> Result<Vec<(BBox, String)>, SourceError>;

    /// References to the embedded images of a page, in the backend's native order
    fn image_refs(&self, page: usize) -> Result<Vec<ImageRef>, SourceError>;

    /// Raw encoded bytes of an embedded image
    fn decode_image(&self, image: &ImageRef) -> Result<Bytes, SourceError>;
}

/// Write side of a document backend.
///
/// A sink is exclusively owned by the reconstructor and driven from a single
/// thread. Implementations buffer everything in memory; `finalize` performs
/// the one atomic write to disk, so a failed run never leaves a truncated
/// file behind.
pub trait DocumentSink: Send {
    /// Record the document title as output metadata
    fn set_title(&mut self, title: &str);

    /// Open a fresh output page; subsequent draw calls land on it
    fn add_page(&mut self) -> Result<(), SinkError>;

    /// Draw a text cell at its original origin with the original box width
    fn draw_text(&mut self, bbox: &BBox, text: &str) -> Result<(), SinkError>;

    /// Place an encoded image into its target rectangle
    fn draw_image(&mut self, bbox: &BBox, bytes: &[u8]) -> Result<(), SinkError>;

    /// Write the buffered document to `path` in a single atomic operation
    fn finalize(&mut self, path: &Path) -> Result<(), SinkError>;
}
