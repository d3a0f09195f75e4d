//! Luminance conversion and Canny edge detection.

use image::{GrayImage, Luma};

use crate::math::saturate_u8;
use crate::types::PixelBuffer;

/// Convert to a single luminance channel with BT.601 weights.
///
/// A 1-channel buffer is returned as a copy.
pub fn grayscale(buf: &PixelBuffer) -> PixelBuffer {
    PixelBuffer::Gray(luma(buf))
}

/// Two-threshold Canny edge detection.
///
/// Color input is converted with [`grayscale`] first. The output is 255 on
/// edges and 0 elsewhere. `low <= high` is expected but not checked.
pub fn detect_edges(buf: &PixelBuffer, low: f32, high: f32) -> PixelBuffer {
    PixelBuffer::Gray(imageproc::edges::canny(&luma(buf), low, high))
}

fn luma(buf: &PixelBuffer) -> GrayImage {
    match buf {
        PixelBuffer::Gray(img) => img.clone(),
        PixelBuffer::Rgb(img) => {
            let (w, h) = img.dimensions();
            GrayImage::from_fn(w, h, |x, y| {
                let [r, g, b] = img.get_pixel(x, y).0;
                Luma([saturate_u8(
                    0.299 * f32::from(r) + 0.587 * f32::from(g) + 0.114 * f32::from(b),
                )])
            })
        }
    }
}
