//! Page extraction pipeline.
//!
//! ```text
//! DocumentPipeline ─▶ PageExtractor ─┬▶ LineReconstructor              (native text)
//!                                    └▶ render ▶ enhance_for_ocr ▶ OCR (scanned pages)
//! ```
//!
//! Pages are processed strictly in order, one at a time. Progress is
//! reported through a [`ProgressReporter`] rather than any UI.

pub mod driver;
pub mod page;

use std::fmt;

use serde::Serialize;
use tokio::sync::mpsc::UnboundedSender;

pub use driver::{DocumentOutcome, DocumentPipeline};
pub use page::PageExtractor;

/// Where a page's text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// Text embedded in the PDF.
    Native,
    /// Text recognized from a rendered image.
    Ocr,
    /// Neither produced any text.
    None,
}

impl Provenance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provenance::Native => "native",
            Provenance::Ocr => "ocr",
            Provenance::None => "none",
        }
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text extracted from one page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageExtraction {
    /// 1-based page number.
    pub page_number: usize,
    pub text: String,
    pub provenance: Provenance,
}

impl PageExtraction {
    pub fn native(page_number: usize, text: String) -> Self {
        Self {
            page_number,
            text,
            provenance: Provenance::Native,
        }
    }

    pub fn ocr(page_number: usize, text: String) -> Self {
        Self {
            page_number,
            text,
            provenance: Provenance::Ocr,
        }
    }

    pub fn empty(page_number: usize) -> Self {
        Self {
            page_number,
            text: String::new(),
            provenance: Provenance::None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.provenance == Provenance::None
    }
}

/// Sub-stage of a single page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageStage {
    ReadingText,
    Rendering,
    Recognizing,
}

/// Progress notifications emitted as the pipeline advances.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ProgressEvent {
    DocumentStarted {
        total_pages: usize,
    },
    PageStarted {
        page_number: usize,
        total_pages: usize,
    },
    Stage {
        page_number: usize,
        stage: PageStage,
    },
    OcrProgress {
        page_number: usize,
        status: String,
        progress: f32,
    },
    PageFinished {
        page_number: usize,
        total_pages: usize,
        provenance: Provenance,
    },
    DocumentFinished {
        total_pages: usize,
    },
}

/// Sink for [`ProgressEvent`]s.
pub trait ProgressReporter {
    fn report(&self, event: &ProgressEvent);
}

/// Discards all events.
impl ProgressReporter for () {
    fn report(&self, _event: &ProgressEvent) {}
}

impl<F> ProgressReporter for F
where
    F: Fn(&ProgressEvent),
{
    fn report(&self, event: &ProgressEvent) {
        self(event);
    }
}

/// Forwards events to a channel. A closed receiver is ignored.
impl ProgressReporter for UnboundedSender<ProgressEvent> {
    fn report(&self, event: &ProgressEvent) {
        let _ = self.send(event.clone());
    }
}
