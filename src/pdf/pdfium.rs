//! pdfium-backed [`PdfSource`].
//!
//! Uses `pdfium-render` (Chromium's PDF library) for both halves of the
//! collaborator contract:
//!
//! ```text
//! text segments → PositionedFragment (bottom edge as baseline)
//! page render   → BGRA bitmap → RGBA raster
//! ```

use std::path::Path;

use async_trait::async_trait;
use pdfium_render::prelude::*;
use tracing::debug;

use super::{check_page, PdfSource};
use crate::content::PositionedFragment;
use crate::error::{ExtractError, Result};
use crate::raster::RasterImage;

/// Bind to the pdfium shared library.
///
/// Looks in `library_dir` first when given, then falls back to the system library.
pub fn bind_pdfium(library_dir: Option<&Path>) -> Result<Pdfium> {
    let bindings = match library_dir {
        Some(dir) => Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(dir))
            .or_else(|_| Pdfium::bind_to_system_library()),
        None => Pdfium::bind_to_system_library(),
    }
    .map_err(|e| ExtractError::LibraryUnavailable(e.to_string()))?;

    Ok(Pdfium::new(bindings))
}

/// A PDF document opened through pdfium.
pub struct PdfiumSource<'a> {
    document: PdfDocument<'a>,
    page_count: usize,
}

impl<'a> PdfiumSource<'a> {
    /// Parse a document from bytes. Corrupt or unsupported input fails here.
    pub fn load(pdfium: &'a Pdfium, bytes: &'a [u8]) -> Result<Self> {
        let document = pdfium
            .load_pdf_from_byte_slice(bytes, None)
            .map_err(|e| ExtractError::DocumentLoad(e.to_string()))?;
        let page_count = document.pages().len() as usize;
        debug!("Loaded PDF: {} pages, {} bytes", page_count, bytes.len());
        Ok(Self {
            document,
            page_count,
        })
    }

    fn page(&self, page_number: usize) -> Result<PdfPage<'a>> {
        check_page(self, page_number)?;
        let index = u16::try_from(page_number - 1).map_err(|_| ExtractError::PageAccess {
            page: page_number,
            message: "page index exceeds pdfium's range".to_string(),
        })?;
        self.document
            .pages()
            .get(index)
            .map_err(|e| ExtractError::PageAccess {
                page: page_number,
                message: e.to_string(),
            })
    }
}

/// Convert a text segment into a fragment.
///
/// pdfium reports no explicit end-of-line flag, so a trailing line break in
/// the segment text stands in for one.
#[allow(deprecated)] // PdfRect field access deprecated in 0.8.28, removed in 0.9.0
fn segment_to_fragment(segment: &PdfPageTextSegment<'_>) -> PositionedFragment {
    let text = segment.text();
    let bounds = segment.bounds();
    let ends_line = text.ends_with('\n') || text.ends_with('\r');
    PositionedFragment {
        text,
        baseline_y: Some(bounds.bottom.value),
        ends_line,
    }
}

/// Repack a BGRA bitmap (rows may be padded) into tight RGBA.
pub(crate) fn bgra_to_rgba(raw: &[u8], width: usize, height: usize) -> Vec<u8> {
    let stride = if height == 0 { 0 } else { raw.len() / height };
    let mut pixels = Vec::with_capacity(width.saturating_mul(height).saturating_mul(4));
    for y in 0..height {
        let base = y.saturating_mul(stride);
        for x in 0..width {
            let idx = base.saturating_add(x.saturating_mul(4));
            let b = raw.get(idx).copied().unwrap_or(255);
            let g = raw.get(idx + 1).copied().unwrap_or(255);
            let r = raw.get(idx + 2).copied().unwrap_or(255);
            let a = raw.get(idx + 3).copied().unwrap_or(255);
            pixels.extend_from_slice(&[r, g, b, a]);
        }
    }
    pixels
}

#[async_trait(?Send)]
impl PdfSource for PdfiumSource<'_> {
    fn page_count(&self) -> usize {
        self.page_count
    }

    async fn fragments(&self, page_number: usize) -> Result<Vec<PositionedFragment>> {
        let page = self.page(page_number)?;
        let text = page.text().map_err(|e| ExtractError::PageAccess {
            page: page_number,
            message: e.to_string(),
        })?;
        let fragments: Vec<PositionedFragment> = text
            .segments()
            .iter()
            .map(|segment| segment_to_fragment(&segment))
            .collect();
        debug!("Page {}: {} text segments", page_number, fragments.len());
        Ok(fragments)
    }

    async fn render(&self, page_number: usize, scale: f32) -> Result<RasterImage> {
        let page = self.page(page_number)?;
        let config = PdfRenderConfig::new()
            .scale_page_by_factor(scale)
            .render_form_data(true)
            .render_annotations(true)
            .set_format(PdfBitmapFormat::BGRA);

        let bitmap = page
            .render_with_config(&config)
            .map_err(|e| ExtractError::Render {
                page: page_number,
                message: e.to_string(),
            })?;

        let width = bitmap.width().max(0) as u32;
        let height = bitmap.height().max(0) as u32;
        let pixels = bgra_to_rgba(&bitmap.as_raw_bytes(), width as usize, height as usize);

        RasterImage::from_raw(width, height, pixels).ok_or_else(|| ExtractError::Render {
            page: page_number,
            message: format!("bitmap buffer does not match {width}x{height}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bgra_to_rgba_swaps_channels() {
        let raw = [10, 20, 30, 40, 1, 2, 3, 4];
        assert_eq!(bgra_to_rgba(&raw, 2, 1), vec![30, 20, 10, 40, 3, 2, 1, 4]);
    }

    #[test]
    fn bgra_to_rgba_skips_row_padding() {
        // 1 pixel wide, 2 rows, 8-byte stride
        let raw = [1, 2, 3, 4, 0, 0, 0, 0, 5, 6, 7, 8, 0, 0, 0, 0];
        assert_eq!(bgra_to_rgba(&raw, 1, 2), vec![3, 2, 1, 4, 7, 6, 5, 8]);
    }

    #[test]
    fn bgra_to_rgba_empty() {
        assert!(bgra_to_rgba(&[], 0, 0).is_empty());
    }
}
