//! Document-level errors.
//!
//! Anything in [`ExtractError`] aborts a document. Page-level OCR trouble
//! is reported as [`OcrError`](crate::ocr::OcrError) and never escapes the
//! page orchestrator.

use thiserror::Error;

/// Fatal extraction errors.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Failed to load PDF: {0}")]
    DocumentLoad(String),

    #[error("PDF library unavailable: {0}")]
    LibraryUnavailable(String),

    #[error("Page {page} out of range (document has {total} pages)")]
    PageOutOfRange { page: usize, total: usize },

    #[error("Failed to read page {page}: {message}")]
    PageAccess { page: usize, message: String },

    #[error("Failed to render page {page}: {message}")]
    Render { page: usize, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ExtractError>;
