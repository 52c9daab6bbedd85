//! PDF collaborator.
//!
//! A [`PdfSource`] is an opened document. Pages are addressed by 1-based
//! page number and expose their text as [`PositionedFragment`]s plus a
//! render-to-raster operation.
//!
//! | Backend | Feature Flag |
//! |---------|-------------|
//! | [`PdfiumSource`] | `pdf` |

#[cfg(feature = "pdf")]
pub mod pdfium;

use async_trait::async_trait;

use crate::content::PositionedFragment;
use crate::error::{ExtractError, Result};
use crate::raster::RasterImage;

#[cfg(feature = "pdf")]
pub use pdfium::{bind_pdfium, PdfiumSource};

/// An opened PDF document.
///
/// Errors from these methods are fatal for the document.
#[async_trait(?Send)]
pub trait PdfSource {
    /// Number of pages.
    fn page_count(&self) -> usize;

    /// Text fragments of `page_number` in content-stream order.
    async fn fragments(&self, page_number: usize) -> Result<Vec<PositionedFragment>>;

    /// Render `page_number` to an RGBA raster at `scale` × the page size in points.
    async fn render(&self, page_number: usize, scale: f32) -> Result<RasterImage>;
}

/// Check that `page_number` is a valid 1-based page of `source`.
pub fn check_page(source: &dyn PdfSource, page_number: usize) -> Result<()> {
    let total = source.page_count();
    if page_number == 0 || page_number > total {
        return Err(ExtractError::PageOutOfRange {
            page: page_number,
            total,
        });
    }
    Ok(())
}
