//! Document driver: pages `1..=N`, strictly in order.
//!
//! OCR is memory- and CPU-heavy, so pages are never processed
//! concurrently. Each page, OCR included, finishes before the next starts.

use futures::stream::{self, LocalBoxStream, StreamExt};
use tracing::{error, info};

use super::{PageExtraction, PageExtractor, ProgressEvent, ProgressReporter};
use crate::config::ExtractConfig;
use crate::error::ExtractError;
use crate::ocr::OcrEngine;
use crate::pdf::PdfSource;

/// Pages produced before the pipeline stopped, and why it stopped early.
#[derive(Debug)]
pub struct DocumentOutcome {
    pub pages: Vec<PageExtraction>,
    /// Fatal error that ended the run, if any.
    pub failure: Option<ExtractError>,
}

impl DocumentOutcome {
    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }
}

/// Runs the page extractor over every page of a document.
pub struct DocumentPipeline<'a> {
    extractor: PageExtractor<'a>,
    reporter: &'a dyn ProgressReporter,
}

impl<'a> DocumentPipeline<'a> {
    pub fn new(
        ocr: &'a dyn OcrEngine,
        config: &'a ExtractConfig,
        reporter: &'a dyn ProgressReporter,
    ) -> Self {
        Self {
            extractor: PageExtractor::new(ocr, config, reporter),
            reporter,
        }
    }

    /// Lazily extract every page of `source`.
    ///
    /// Nothing runs until the stream is polled. A fatal error is yielded as
    /// the last item; pages yielded before it stay valid. Dropping the
    /// stream abandons the remaining pages.
    pub fn process<'s>(
        &'s self,
        source: &'s dyn PdfSource,
        ocr_enabled: bool,
    ) -> LocalBoxStream<'s, Result<PageExtraction, ExtractError>> {
        let total_pages = source.page_count();

        stream::unfold(Some(1usize), move |next| async move {
            let page_number = next?;

            if page_number == 1 {
                info!("Processing {} pages (OCR {})", total_pages, on_off(ocr_enabled));
                self.reporter
                    .report(&ProgressEvent::DocumentStarted { total_pages });
            }

            if page_number > total_pages {
                info!("Done: {} pages", total_pages);
                self.reporter
                    .report(&ProgressEvent::DocumentFinished { total_pages });
                return None;
            }

            self.reporter.report(&ProgressEvent::PageStarted {
                page_number,
                total_pages,
            });

            match self.extractor.extract(source, page_number, ocr_enabled).await {
                Ok(page) => {
                    self.reporter.report(&ProgressEvent::PageFinished {
                        page_number,
                        total_pages,
                        provenance: page.provenance,
                    });
                    Some((Ok(page), Some(page_number + 1)))
                }
                Err(e) => {
                    error!("Aborting at page {}/{}: {}", page_number, total_pages, e);
                    Some((Err(e), None))
                }
            }
        })
        .boxed_local()
    }

    /// Drive [`process`](Self::process) to the end, collecting pages.
    pub async fn run(&self, source: &dyn PdfSource, ocr_enabled: bool) -> DocumentOutcome {
        let mut pages = Vec::with_capacity(source.page_count());
        let mut stream = self.process(source, ocr_enabled);

        while let Some(item) = stream.next().await {
            match item {
                Ok(page) => pages.push(page),
                Err(e) => {
                    return DocumentOutcome {
                        pages,
                        failure: Some(e),
                    }
                }
            }
        }

        DocumentOutcome {
            pages,
            failure: None,
        }
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}
