//! Per-page extraction: native text first, OCR as a fallback.

use tracing::{debug, warn};

use super::{PageExtraction, PageStage, ProgressEvent, ProgressReporter};
use crate::config::ExtractConfig;
use crate::content::{is_text_whitespace, LineReconstructor};
use crate::error::Result;
use crate::ocr::{OcrEngine, OcrProgress};
use crate::pdf::PdfSource;
use crate::raster::enhance_for_ocr;

/// Decides per page whether native text or OCR output is authoritative.
pub struct PageExtractor<'a> {
    ocr: &'a dyn OcrEngine,
    config: &'a ExtractConfig,
    reporter: &'a dyn ProgressReporter,
    lines: LineReconstructor,
}

impl<'a> PageExtractor<'a> {
    pub fn new(
        ocr: &'a dyn OcrEngine,
        config: &'a ExtractConfig,
        reporter: &'a dyn ProgressReporter,
    ) -> Self {
        Self {
            ocr,
            config,
            reporter,
            lines: LineReconstructor::new(config.line_tolerance),
        }
    }

    /// Extract one page.
    ///
    /// Native text always wins, even when partial. OCR runs only when
    /// `ocr_enabled` and the page has no native text; OCR failures yield an
    /// empty page instead of an error. Errors returned here come from the
    /// PDF source and are fatal for the document.
    pub async fn extract(
        &self,
        source: &dyn PdfSource,
        page_number: usize,
        ocr_enabled: bool,
    ) -> Result<PageExtraction> {
        self.stage(page_number, PageStage::ReadingText);
        let fragments = source.fragments(page_number).await?;
        let text = self.lines.reconstruct(&fragments);
        if !text.is_empty() {
            debug!("Page {}: {} chars of native text", page_number, text.len());
            return Ok(PageExtraction::native(page_number, text));
        }

        if !ocr_enabled {
            debug!("Page {}: no native text, OCR disabled", page_number);
            return Ok(PageExtraction::empty(page_number));
        }

        if !self.ocr.is_available() {
            warn!(
                "Page {}: no native text and OCR engine '{}' is unavailable",
                page_number,
                self.ocr.name()
            );
            return Ok(PageExtraction::empty(page_number));
        }

        self.stage(page_number, PageStage::Rendering);
        let mut raster = source
            .render(page_number, self.config.ocr_render_scale)
            .await?;
        enhance_for_ocr(&mut raster);

        self.stage(page_number, PageStage::Recognizing);
        let reporter = self.reporter;
        let mut on_progress = |progress: OcrProgress| {
            reporter.report(&ProgressEvent::OcrProgress {
                page_number,
                status: progress.status,
                progress: progress.progress,
            });
        };
        let recognized = self
            .ocr
            .recognize(&raster, &self.config.ocr_languages, &mut on_progress)
            .await;

        debug!(
            "Page {}: releasing {}x{} raster",
            page_number,
            raster.width(),
            raster.height()
        );
        drop(raster);

        Ok(match recognized.map(|text| text.trim_matches(is_text_whitespace).to_string()) {
            Ok(text) if !text.is_empty() => PageExtraction::ocr(page_number, text),
            Ok(_) => {
                debug!("Page {}: OCR found no text", page_number);
                PageExtraction::empty(page_number)
            }
            Err(e) => {
                warn!("Page {}: OCR failed: {}", page_number, e);
                PageExtraction::empty(page_number)
            }
        })
    }

    fn stage(&self, page_number: usize, stage: PageStage) {
        self.reporter
            .report(&ProgressEvent::Stage { page_number, stage });
    }
}
