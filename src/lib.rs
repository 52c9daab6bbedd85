//! `pagetext` - Readable text from PDF pages, with OCR fallback
//!
//! # Features
//!
//! - **Line reconstruction**: positioned text runs grouped into lines by baseline
//! - **OCR fallback**: pages without embedded text are rendered, binarized and
//!   recognized (Tesseract, `chi_tra+eng` by default)
//! - **Provenance**: every page says whether its text is native, OCR, or absent
//! - **Sequential pipeline**: pages are yielded lazily, strictly in order
//!
//! # Example
//!
//! ```rust,no_run
//! use futures::StreamExt;
//! use pagetext::{bind_pdfium, DocumentPipeline, ExtractConfig, PdfiumSource, TesseractEngine};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ExtractConfig::default();
//!     let pdfium = bind_pdfium(None)?;
//!     let bytes = std::fs::read("scan.pdf")?;
//!     let document = PdfiumSource::load(&pdfium, &bytes)?;
//!
//!     let ocr = TesseractEngine::new();
//!     let pipeline = DocumentPipeline::new(&ocr, &config, &());
//!     let mut pages = pipeline.process(&document, config.ocr_enabled);
//!     while let Some(page) = pages.next().await {
//!         let page = page?;
//!         println!("--- page {} ({}) ---\n{}", page.page_number, page.provenance, page.text);
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod content;
pub mod error;
pub mod ocr;
pub mod pdf;
pub mod pipeline;
pub mod raster;

pub use config::ExtractConfig;
pub use content::{reconstruct, LineReconstructor, PositionedFragment};
pub use error::{ExtractError, Result};
pub use ocr::{OcrEngine, OcrError, OcrProgress, TesseractEngine};
pub use pdf::PdfSource;
#[cfg(feature = "pdf")]
pub use pdf::{bind_pdfium, PdfiumSource};
pub use pipeline::{
    DocumentOutcome, DocumentPipeline, PageExtraction, PageExtractor, PageStage, ProgressEvent,
    ProgressReporter, Provenance,
};
pub use raster::{enhance_for_ocr, RasterImage};

/// Version of pagetext
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
