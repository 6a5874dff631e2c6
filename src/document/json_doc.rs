//! Reference document backend over a JSON page-geometry format.
//!
//! A document is a JSON object with an optional `title` and a `pages` array;
//! each page carries ordered `text` cells and `images` entries with base64
//! payloads. The sink writes the same schema it reads, so a translated
//! output is itself a valid input document.

use std::path::Path;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::document::model::{BBox, ImageRef};
use crate::document::{DocumentSink, DocumentSource};
use crate::errors::{SinkError, SourceError};
use crate::file_utils::FileManager;

/// Fixed line height of a rendered text cell, in document units
pub const LINE_HEIGHT: f32 = 12.0;

fn default_line_height() -> f32 {
    LINE_HEIGHT
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct JsonDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(default)]
    pages: Vec<JsonPage>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct JsonPage {
    #[serde(default)]
    text: Vec<JsonTextCell>,
    #[serde(default)]
    images: Vec<JsonImageCell>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct JsonTextCell {
    bbox: BBox,
    text: String,
    #[serde(default = "default_line_height")]
    line_height: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct JsonImageCell {
    bbox: BBox,
    /// Base64-encoded payload in its original encoding
    data: String,
}

// Image ids pack the page index in the high half and the per-page image
// index in the low half.
fn image_id(page: usize, index: usize) -> u64 {
    ((page as u64) << 32) | (index as u64)
}

fn split_image_id(id: u64) -> (usize, usize) {
    ((id >> 32) as usize, (id & 0xffff_ffff) as usize)
}

/// Read side of the JSON backend; fully loaded in memory, safe to share
#[derive(Debug)]
pub struct JsonSource {
    doc: JsonDocument,
}

impl JsonSource {
    /// Load a document from disk
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SourceError> {
        let content = FileManager::read_to_string(&path)
            .map_err(|e| SourceError::Open(e.to_string()))?;
        Self::from_str(&content)
    }

    /// Parse a document from a JSON string
    pub fn from_str(content: &str) -> Result<Self, SourceError> {
        let doc: JsonDocument =
            serde_json::from_str(content).map_err(|e| SourceError::Open(e.to_string()))?;
        Ok(Self { doc })
    }

    fn page(&self, page: usize) -> Result<&JsonPage, SourceError> {
        self.doc.pages.get(page).ok_or(SourceError::PageOutOfRange {
            page,
            pages: self.doc.pages.len(),
        })
    }
}

impl DocumentSource for JsonSource {
    fn page_count(&self) -> usize {
        self.doc.pages.len()
    }

    fn title(&self) -> Option<String> {
        self.doc.title.clone()
    }

    fn text_blocks(&self, page: usize) -> Result<Vec<(BBox, String)>, SourceError> {
        let page = self.page(page)?;
        Ok(page
            .text
            .iter()
            .map(|cell| (cell.bbox, cell.text.clone()))
            .collect())
    }

    fn image_refs(&self, page: usize) -> Result<Vec<ImageRef>, SourceError> {
        let cells = &self.page(page)?.images;
        Ok(cells
            .iter()
            .enumerate()
            .map(|(index, cell)| ImageRef {
                id: image_id(page, index),
                bbox: cell.bbox,
            })
            .collect())
    }

    fn decode_image(&self, image: &ImageRef) -> Result<Bytes, SourceError> {
        let (page_index, cell_index) = split_image_id(image.id);
        let cell = self
            .page(page_index)?
            .images
            .get(cell_index)
            .ok_or_else(|| SourceError::Image(format!("unknown image id {}", image.id)))?;

        let bytes = BASE64
            .decode(&cell.data)
            .map_err(|e| SourceError::Image(format!("invalid base64 payload: {}", e)))?;
        Ok(Bytes::from(bytes))
    }
}

/// Write side of the JSON backend; buffers everything until `finalize`
#[derive(Default)]
pub struct JsonSink {
    doc: JsonDocument,
}

impl JsonSink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    fn current_page(&mut self, op: &str) -> Result<&mut JsonPage, SinkError> {
        self.doc
            .pages
            .last_mut()
            .ok_or_else(|| SinkError::Render(format!("{} called before add_page", op)))
    }
}

impl DocumentSink for JsonSink {
    fn set_title(&mut self, title: &str) {
        self.doc.title = Some(title.to_string());
    }

    fn add_page(&mut self) -> Result<(), SinkError> {
        self.doc.pages.push(JsonPage::default());
        Ok(())
    }

    fn draw_text(&mut self, bbox: &BBox, text: &str) -> Result<(), SinkError> {
        let cell = JsonTextCell {
            bbox: *bbox,
            text: text.to_string(),
            line_height: LINE_HEIGHT,
        };
        self.current_page("draw_text")?.text.push(cell);
        Ok(())
    }

    fn draw_image(&mut self, bbox: &BBox, bytes: &[u8]) -> Result<(), SinkError> {
        if bytes.is_empty() {
            return Err(SinkError::Render("empty image payload".to_string()));
        }
        let cell = JsonImageCell {
            bbox: *bbox,
            data: BASE64.encode(bytes),
        };
        self.current_page("draw_image")?.images.push(cell);
        Ok(())
    }

    fn finalize(&mut self, path: &Path) -> Result<(), SinkError> {
        let content = serde_json::to_vec_pretty(&self.doc)
            .map_err(|e| SinkError::Write(e.to_string()))?;
        FileManager::write_bytes_atomic(path, &content)
            .map_err(|e| SinkError::Write(e.to_string()))
    }
}
