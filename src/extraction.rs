//! Block extraction: one source page to ordered text and image blocks.

use crate::document::DocumentSource;
use crate::document::model::{ImageBlock, TextBlock};
use crate::errors::PipelineError;

/// Ordered blocks of one page, in the source's native enumeration order.
///
/// That order is load-bearing: it becomes the final draw order, and the
/// translation step pairs results back onto blocks by position.
#[derive(Debug, Clone, Default)]
pub struct PageBlocks {
    /// Text blocks in enumeration order
    pub text_blocks: Vec<TextBlock>,
    /// Image blocks in enumeration order
    pub image_blocks: Vec<ImageBlock>,
}

/// Pure reader turning a source page into [`PageBlocks`]
pub struct BlockExtractor;

impl BlockExtractor {
    /// Extract all blocks of one page.
    ///
    /// Whitespace-only text blocks are retained; the translation client
    /// short-circuits them, and keeping them makes the index-aligned pairing
    /// with translation results trivial. Any source failure, including a
    /// failed image decode, is fatal for the page and reported as
    /// [`PipelineError::ContentExtraction`].
    pub fn extract(source: &dyn DocumentSource, page: usize) -> Result<PageBlocks, PipelineError> {
        let wrap = |source| PipelineError::ContentExtraction { page, source };

        let text_blocks = source
            .text_blocks(page)
            .map_err(wrap)?
            .into_iter()
            .map(|(bbox, raw_text)| TextBlock {
                bbox: bbox.normalized(),
                raw_text,
            })
            .collect();

        let refs = source.image_refs(page).map_err(wrap)?;
        let mut image_blocks = Vec::with_capacity(refs.len());
        for image_ref in refs {
            let encoded_bytes = source.decode_image(&image_ref).map_err(wrap)?;
            image_blocks.push(ImageBlock {
                bbox: image_ref.bbox.normalized(),
                encoded_bytes,
            });
        }

        Ok(PageBlocks {
            text_blocks,
            image_blocks,
        })
    }
}
