//! OCR collaborator.
//!
//! An [`OcrEngine`] turns a raster image into text. The page orchestrator
//! calls it only for pages without native text, and treats every
//! [`OcrError`] as "no text on this page" rather than a fatal error.
//!
//! Backends:
//! - [`TesseractEngine`]: the `tesseract` binary via stdin/stdout (default)

pub mod tesseract;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::raster::RasterImage;

pub use tesseract::TesseractEngine;

/// Errors from OCR backends.
#[derive(Error, Debug)]
pub enum OcrError {
    #[error("Backend not available: {0}")]
    BackendNotAvailable(String),

    #[error("Recognition failed: {0}")]
    RecognitionFailed(String),

    #[error("Image encoding failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Snapshot of recognition progress.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OcrProgress {
    /// Engine stage, e.g. `"recognizing text"`.
    pub status: String,
    /// Fraction complete in `[0, 1]`.
    pub progress: f32,
}

impl OcrProgress {
    pub fn new(status: impl Into<String>, progress: f32) -> Self {
        Self {
            status: status.into(),
            progress: progress.clamp(0.0, 1.0),
        }
    }

    /// Whole percent, rounded.
    pub fn percent(&self) -> u8 {
        (self.progress * 100.0).round() as u8
    }
}

/// Trait for OCR backends.
///
/// Extraction runs on a single task, so implementations need not be `Send`.
#[async_trait(?Send)]
pub trait OcrEngine {
    /// Short backend name for logs.
    fn name(&self) -> &str;

    /// Check whether the engine can run (binary installed, models present).
    fn is_available(&self) -> bool;

    /// Recognize text in `image`.
    ///
    /// `languages` is one or more language codes joined by `+`.
    /// `progress` may be called any number of times before returning.
    async fn recognize(
        &self,
        image: &RasterImage,
        languages: &str,
        progress: &mut dyn FnMut(OcrProgress),
    ) -> Result<String, OcrError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_is_clamped() {
        assert!((OcrProgress::new("x", 1.7).progress - 1.0).abs() < f32::EPSILON);
        assert!(OcrProgress::new("x", -0.2).progress.abs() < f32::EPSILON);
    }

    #[test]
    fn progress_percent_rounds() {
        assert_eq!(OcrProgress::new("recognizing text", 0.456).percent(), 46);
        assert_eq!(OcrProgress::new("recognizing text", 1.0).percent(), 100);
    }
}
