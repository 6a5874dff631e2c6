//! Per-page orchestration: extract, translate, zip back.

use std::sync::Arc;

use crate::document::DocumentSource;
use crate::document::model::{TranslatedPage, TranslatedTextBlock};
use crate::errors::PipelineError;
use crate::extraction::BlockExtractor;
use crate::translation::client::TranslationClient;

/// Translates one page at a time against a shared client
pub struct PageTranslator {
    /// Shared translation client; owns the fallback counter
    client: Arc<TranslationClient>,
    /// Source language code
    source_lang: String,
    /// Target language code
    target_lang: String,
}

impl PageTranslator {
    /// Create a new page translator
    pub fn new(client: Arc<TranslationClient>, source_lang: String, target_lang: String) -> Self {
        Self {
            client,
            source_lang,
            target_lang,
        }
    }

    /// Extract one page and translate its text content.
    ///
    /// The translated string at position `i` is paired with the block
    /// extracted at position `i`; nothing between extraction and the
    /// returned page reorders blocks, otherwise text would silently land on
    /// the wrong geometry. Image blocks pass through with their payload
    /// untouched.
    pub async fn translate_page(
        &self,
        source: &dyn DocumentSource,
        page: usize,
    ) -> Result<TranslatedPage, PipelineError> {
        let blocks = BlockExtractor::extract(source, page)?;

        let texts: Vec<String> = blocks
            .text_blocks
            .iter()
            .map(|block| block.raw_text.clone())
            .collect();
        let translated = self
            .client
            .translate_batch(&texts, &self.source_lang, &self.target_lang)
            .await;
        debug_assert_eq!(translated.len(), blocks.text_blocks.len());

        let text_blocks = blocks
            .text_blocks
            .into_iter()
            .zip(translated)
            .map(|(block, translated_text)| TranslatedTextBlock {
                bbox: block.bbox,
                translated_text,
            })
            .collect();

        Ok(TranslatedPage {
            index: page,
            text_blocks,
            image_blocks: blocks.image_blocks,
        })
    }
}
