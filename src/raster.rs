//! Raster images and OCR preprocessing.
//!
//! Rendered pages are binarized with a fixed threshold before recognition.

use image::RgbaImage;

/// A rendered page: RGBA samples, row-major.
pub type RasterImage = RgbaImage;

/// Scale used when rendering a page for OCR.
pub const OCR_RENDER_SCALE: f32 = 3.0;

const CONTRAST_MIDPOINT: f64 = 128.0;
const CONTRAST_FACTOR: f64 = 1.25;
const BINARY_THRESHOLD: f64 = 175.0;

/// Binarize `image` in place for OCR. Alpha is left untouched.
pub fn enhance_for_ocr(image: &mut RasterImage) {
    for pixel in image.pixels_mut() {
        let value = binarize(pixel[0], pixel[1], pixel[2]);
        pixel[0] = value;
        pixel[1] = value;
        pixel[2] = value;
    }
}

/// Black (0) or white (255) for one RGB sample.
pub fn binarize(r: u8, g: u8, b: u8) -> u8 {
    let gray = 0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b);
    let adjusted = (gray - CONTRAST_MIDPOINT) * CONTRAST_FACTOR + CONTRAST_MIDPOINT;
    if adjusted > BINARY_THRESHOLD {
        255
    } else {
        0
    }
}
