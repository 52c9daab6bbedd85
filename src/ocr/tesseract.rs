//! Tesseract OCR via the command-line binary.
//!
//! The raster is PNG-encoded in memory and piped to
//! `tesseract stdin stdout -l <langs>`, so no temp files are written.

use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use image::ImageFormat;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

use super::{OcrEngine, OcrError, OcrProgress};
use crate::raster::RasterImage;

/// Tesseract OCR backend.
#[derive(Debug, Clone)]
pub struct TesseractEngine {
    binary: PathBuf,
}

impl TesseractEngine {
    /// Use `tesseract` from `PATH`.
    pub fn new() -> Self {
        Self::with_binary("tesseract")
    }

    /// Use a specific executable (name looked up in `PATH`, or a path).
    pub fn with_binary(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Hint shown when the binary cannot be found.
    pub fn availability_hint(&self) -> String {
        format!(
            "{} not found (install tesseract-ocr and the language data you need)",
            self.binary.display()
        )
    }

    fn encode_png(image: &RasterImage) -> Result<Vec<u8>, OcrError> {
        let mut buffer = Cursor::new(Vec::new());
        image.write_to(&mut buffer, ImageFormat::Png)?;
        Ok(buffer.into_inner())
    }
}

impl Default for TesseractEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl OcrEngine for TesseractEngine {
    fn name(&self) -> &str {
        "tesseract"
    }

    fn is_available(&self) -> bool {
        which::which(&self.binary).is_ok()
    }

    async fn recognize(
        &self,
        image: &RasterImage,
        languages: &str,
        progress: &mut dyn FnMut(OcrProgress),
    ) -> Result<String, OcrError> {
        progress(OcrProgress::new("initializing engine", 0.0));
        let png = Self::encode_png(image)?;
        debug!(
            "Piping {}x{} raster ({} bytes PNG) to {}",
            image.width(),
            image.height(),
            png.len(),
            self.binary.display()
        );

        let mut child = match Command::new(&self.binary)
            .args(["stdin", "stdout", "-l", languages])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
        {
            Ok(child) => child,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(OcrError::BackendNotAvailable(self.availability_hint()));
            }
            Err(e) => return Err(OcrError::Io(e)),
        };

        progress(OcrProgress::new("recognizing text", 0.0));
        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(&png).await?;
            // Dropping stdin closes the pipe so tesseract sees EOF.
        }

        let output = child.wait_with_output().await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OcrError::RecognitionFailed(format!(
                "tesseract exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        progress(OcrProgress::new("recognizing text", 1.0));
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn encode_png_has_signature() {
        let image = RasterImage::from_pixel(3, 2, Rgba([255, 255, 255, 255]));
        let png = TesseractEngine::encode_png(&image).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn missing_binary_is_unavailable() {
        let engine = TesseractEngine::with_binary("pagetext-no-such-ocr-binary");
        assert!(!engine.is_available());
        assert!(engine.availability_hint().contains("pagetext-no-such-ocr-binary"));
    }

    #[tokio::test]
    async fn missing_binary_reports_backend_not_available() {
        let engine = TesseractEngine::with_binary("pagetext-no-such-ocr-binary");
        let image = RasterImage::from_pixel(4, 4, Rgba([0, 0, 0, 255]));
        let mut events = Vec::new();
        let err = engine
            .recognize(&image, "eng", &mut |p| events.push(p))
            .await
            .unwrap_err();
        assert!(matches!(err, OcrError::BackendNotAvailable(_)));
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].status, "initializing engine");
    }

    #[test]
    fn default_binary_is_tesseract() {
        assert_eq!(TesseractEngine::default().binary(), Path::new("tesseract"));
    }
}
