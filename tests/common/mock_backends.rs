/*!
 * Mock backend implementations for testing
 *
 * This module provides scripted implementations of the three collaborator
 * contracts (translator, document source, document sink) so tests never
 * touch the network or a real document file. The translator tracks call
 * counts so tests can assert that degenerate input never reaches it.
 */

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use bytes::Bytes;

use doctran::document::model::{BBox, ImageRef};
use doctran::document::{DocumentSink, DocumentSource};
use doctran::errors::{ProviderError, SinkError, SourceError};
use doctran::providers::Translator;

/// Scripted translator with optional failure injection
#[derive(Debug, Default)]
pub struct MockTranslator {
    /// Exact translations; unmapped text becomes "[<target>] <text>"
    mapping: HashMap<String, String>,
    /// Whether the provider advertises batch support
    batch: bool,
    /// Drop the last result of every batched call
    short_batch: bool,
    /// Fail every call
    fail_always: bool,
    /// Fail this many calls before succeeding again
    fail_remaining: Mutex<u32>,
    /// Number of provider calls made (a batched call counts once)
    calls: AtomicUsize,
}

impl MockTranslator {
    /// Translator that echoes "[<target>] <text>"
    pub fn new() -> Self {
        Self::default()
    }

    /// Translator with a fixed word mapping
    pub fn with_mapping(pairs: &[(&str, &str)]) -> Self {
        Self {
            mapping: pairs
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect(),
            ..Self::default()
        }
    }

    /// Translator where every call fails
    pub fn failing() -> Self {
        Self {
            fail_always: true,
            ..Self::default()
        }
    }

    /// Translator that fails the next `n` calls, then succeeds
    pub fn failing_times(n: u32) -> Self {
        Self {
            fail_remaining: Mutex::new(n),
            ..Self::default()
        }
    }

    /// Enable batch support
    pub fn batching(mut self) -> Self {
        self.batch = true;
        self
    }

    /// Enable batch support that returns one result too few
    pub fn short_batching(mut self) -> Self {
        self.batch = true;
        self.short_batch = true;
        self
    }

    /// Provider calls made so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn should_fail(&self) -> bool {
        if self.fail_always {
            return true;
        }
        let mut remaining = self.fail_remaining.lock().unwrap();
        if *remaining > 0 {
            *remaining -= 1;
            true
        } else {
            false
        }
    }

    fn lookup(&self, text: &str, target_lang: &str) -> String {
        self.mapping
            .get(text)
            .cloned()
            .unwrap_or_else(|| format!("[{}] {}", target_lang, text))
    }
}

#[async_trait]
impl Translator for MockTranslator {
    async fn translate(
        &self,
        text: &str,
        _source_lang: &str,
        target_lang: &str,
    ) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.should_fail() {
            return Err(ProviderError::RequestFailed("mock failure".to_string()));
        }
        Ok(self.lookup(text, target_lang))
    }

    async fn translate_batch(
        &self,
        texts: &[String],
        source_lang: &str,
        target_lang: &str,
    ) -> Result<Vec<String>, ProviderError> {
        if !self.batch {
            let mut out = Vec::with_capacity(texts.len());
            for text in texts {
                out.push(self.translate(text, source_lang, target_lang).await?);
            }
            return Ok(out);
        }

        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.should_fail() {
            return Err(ProviderError::RequestFailed("mock batch failure".to_string()));
        }

        let mut out: Vec<String> = texts
            .iter()
            .map(|text| self.lookup(text, target_lang))
            .collect();
        if self.short_batch {
            out.pop();
        }
        Ok(out)
    }

    fn supports_batch(&self) -> bool {
        self.batch
    }
}

/// One scripted page of a [`MemorySource`]
#[derive(Debug, Clone, Default)]
pub struct MemoryPage {
    /// Positioned text blocks in enumeration order
    pub text: Vec<(BBox, String)>,
    /// Positioned encoded images in enumeration order
    pub images: Vec<(BBox, Vec<u8>)>,
}

/// In-memory document source with optional per-page failure injection
#[derive(Debug, Default)]
pub struct MemorySource {
    pub title: Option<String>,
    pub pages: Vec<MemoryPage>,
    /// Fail `text_blocks` for this page index, simulating a parse failure
    pub fail_on_page: Option<usize>,
}

impl MemorySource {
    pub fn new(pages: Vec<MemoryPage>) -> Self {
        Self {
            title: None,
            pages,
            fail_on_page: None,
        }
    }

    fn page(&self, page: usize) -> Result<&MemoryPage, SourceError> {
        self.pages.get(page).ok_or(SourceError::PageOutOfRange {
            page,
            pages: self.pages.len(),
        })
    }
}

impl DocumentSource for MemorySource {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn title(&self) -> Option<String> {
        self.title.clone()
    }

    fn text_blocks(&self, page: usize) -> Result<Vec<(BBox, String)>, SourceError> {
        if self.fail_on_page == Some(page) {
            return Err(SourceError::Decode("scripted page failure".to_string()));
        }
        Ok(self.page(page)?.text.clone())
    }

    fn image_refs(&self, page: usize) -> Result<Vec<ImageRef>, SourceError> {
        Ok(self
            .page(page)?
            .images
            .iter()
            .enumerate()
            .map(|(index, (bbox, _))| ImageRef {
                id: ((page as u64) << 32) | index as u64,
                bbox: *bbox,
            })
            .collect())
    }

    fn decode_image(&self, image: &ImageRef) -> Result<Bytes, SourceError> {
        let page = (image.id >> 32) as usize;
        let index = (image.id & 0xffff_ffff) as usize;
        let (_, bytes) = self
            .page(page)?
            .images
            .get(index)
            .ok_or_else(|| SourceError::Image(format!("unknown image id {}", image.id)))?;
        Ok(Bytes::from(bytes.clone()))
    }
}

/// A single recorded sink operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Title(String),
    Page,
    Text { bbox: BBox, text: String },
    Image { bbox: BBox, bytes: Vec<u8> },
}

/// Sink that records every draw call for later assertions
#[derive(Debug, Default)]
pub struct RecordingSink {
    /// Operations in the order they were issued
    pub ops: Vec<DrawOp>,
    /// Path passed to `finalize`, if it was reached
    pub finalized: Option<PathBuf>,
    /// Reject every text block
    pub fail_text: bool,
    /// Reject every image block
    pub fail_images: bool,
    /// Reject the finalize call
    pub fail_finalize: bool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentSink for RecordingSink {
    fn set_title(&mut self, title: &str) {
        self.ops.push(DrawOp::Title(title.to_string()));
    }

    fn add_page(&mut self) -> Result<(), SinkError> {
        self.ops.push(DrawOp::Page);
        Ok(())
    }

    fn draw_text(&mut self, bbox: &BBox, text: &str) -> Result<(), SinkError> {
        if self.fail_text {
            return Err(SinkError::Render("scripted text failure".to_string()));
        }
        self.ops.push(DrawOp::Text {
            bbox: *bbox,
            text: text.to_string(),
        });
        Ok(())
    }

    fn draw_image(&mut self, bbox: &BBox, bytes: &[u8]) -> Result<(), SinkError> {
        if self.fail_images {
            return Err(SinkError::Render("scripted image failure".to_string()));
        }
        self.ops.push(DrawOp::Image {
            bbox: *bbox,
            bytes: bytes.to_vec(),
        });
        Ok(())
    }

    fn finalize(&mut self, path: &Path) -> Result<(), SinkError> {
        if self.fail_finalize {
            return Err(SinkError::Write("scripted finalize failure".to_string()));
        }
        self.finalized = Some(path.to_path_buf());
        Ok(())
    }
}
