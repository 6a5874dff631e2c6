//! Typed records flowing through the pipeline.
//!
//! Blocks are created fresh per page during extraction, consumed by
//! translation, and discarded once the immutable [`TranslatedPage`] has been
//! rendered. Nothing in here persists across runs.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in document coordinates, y increasing downward
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl BBox {
    /// Create a new bounding box
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Box width, `x1 - x0`
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    /// Box height, `y1 - y0`
    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    /// Whether the box satisfies `x1 >= x0 && y1 >= y0`
    pub fn is_valid(&self) -> bool {
        self.x1 >= self.x0 && self.y1 >= self.y0
    }

    /// Return a copy with inverted edges swapped so the box is valid
    pub fn normalized(self) -> Self {
        let (x0, x1) = if self.x0 <= self.x1 { (self.x0, self.x1) } else { (self.x1, self.x0) };
        let (y0, y1) = if self.y0 <= self.y1 { (self.y0, self.y1) } else { (self.y1, self.y0) };
        Self { x0, y0, x1, y1 }
    }
}

/// A positioned run of source text on a page
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    /// Placement rectangle in document coordinates
    pub bbox: BBox,
    /// Original text, may contain embedded line breaks
    pub raw_text: String,
}

/// A positioned embedded raster image
///
/// The payload stays in its original encoding; it is never mutated, only
/// re-encapsulated for the writer.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBlock {
    /// Placement rectangle, reused unchanged from the source
    pub bbox: BBox,
    /// Opaque encoded payload
    pub encoded_bytes: Bytes,
}

/// Opaque handle to an embedded image, as enumerated by a document source
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRef {
    /// Backend-specific identifier, only meaningful to the source that issued it
    pub id: u64,
    /// Placement rectangle of the image on its page
    pub bbox: BBox,
}

/// A text block whose content has been translated
///
/// Geometry is identical to the [`TextBlock`] it came from. `translated_text`
/// is never empty for a block that had real content: on translation failure
/// it holds the original text unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslatedTextBlock {
    /// Placement rectangle, copied from the source block
    pub bbox: BBox,
    /// Translated text, or the original text if translation fell back
    pub translated_text: String,
}

/// One fully translated page, ready for reconstruction
#[derive(Debug, Clone)]
pub struct TranslatedPage {
    /// Zero-based page ordinal; defines final output order
    pub index: usize,
    /// Text blocks in extraction order
    pub text_blocks: Vec<TranslatedTextBlock>,
    /// Image blocks in extraction order
    pub image_blocks: Vec<ImageBlock>,
}
