//! Document reconstruction: translated pages to positioned draw calls.

use std::path::Path;

use log::warn;

use crate::document::DocumentSink;
use crate::document::model::TranslatedPage;
use crate::errors::PipelineError;

/// Counts accumulated while rendering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Pages rendered
    pub pages: usize,
    /// Text blocks drawn
    pub text_blocks: usize,
    /// Image blocks drawn
    pub images_drawn: usize,
    /// Image blocks skipped because the sink rejected them
    pub images_skipped: usize,
}

/// Consumes ordered translated pages and drives a document sink
pub struct Reconstructor;

impl Reconstructor {
    /// Render all pages into `sink` and finalize at `output_path`.
    ///
    /// Pages must arrive in strictly ascending index order; the driver sorts
    /// completed pages before calling this. Text blocks are drawn at their
    /// original origin with their original box width; overflow past the box
    /// height is accepted as a known fidelity limit. A rejected image block
    /// is skipped and counted, a rejected text block aborts the run; partial
    /// text would produce a misleading document.
    pub fn build(
        pages: &[TranslatedPage],
        sink: &mut dyn DocumentSink,
        output_path: &Path,
    ) -> Result<RenderStats, PipelineError> {
        debug_assert!(
            pages.windows(2).all(|pair| pair[0].index < pair[1].index),
            "pages must be sorted by ascending index"
        );

        let mut stats = RenderStats::default();

        for page in pages {
            let render_err = |source| PipelineError::Render {
                page: page.index,
                source,
            };

            sink.add_page().map_err(render_err)?;
            stats.pages += 1;

            for block in &page.text_blocks {
                sink.draw_text(&block.bbox, &block.translated_text)
                    .map_err(render_err)?;
                stats.text_blocks += 1;
            }

            for image in &page.image_blocks {
                match sink.draw_image(&image.bbox, &image.encoded_bytes) {
                    Ok(()) => stats.images_drawn += 1,
                    Err(e) => {
                        warn!("Skipping image block on page {}: {}", page.index, e);
                        stats.images_skipped += 1;
                    }
                }
            }
        }

        sink.finalize(output_path)
            .map_err(|source| PipelineError::OutputWrite {
                path: output_path.to_path_buf(),
                source,
            })?;

        Ok(stats)
    }
}
