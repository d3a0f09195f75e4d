//! Filter stages and the capability trait the pipeline drives them through.
//!
//! - **adjust**: linear brightness/contrast
//! - **blur**: separable Gaussian blur
//! - **denoise**: non-local-means denoising
//! - **edges**: luminance conversion and Canny edges
//!
//! Every stage takes a buffer by reference and returns a new one.

pub mod adjust;
pub mod blur;
pub mod denoise;
pub mod edges;

pub use adjust::adjust_brightness_contrast;
pub use blur::{gaussian_blur, KernelSize};
pub use denoise::denoise;
pub use edges::{detect_edges, grayscale};

use crate::error::PipelineResult;
use crate::features::extract_features;
use crate::types::{ChannelOrder, FeatureVector, PixelBuffer};

/// The image operations the pipeline needs.
///
/// [`StandardOps`] is the built-in implementation; tests and alternative
/// numeric backends provide their own.
pub trait ImageOps {
    fn adjust_brightness_contrast(&self, buf: &PixelBuffer, alpha: f32, beta: f32)
        -> PixelBuffer;

    /// Fails with `InvalidParameter` on even or zero kernel sides.
    fn blur(&self, buf: &PixelBuffer, kernel: KernelSize) -> PipelineResult<PixelBuffer>;

    fn denoise(&self, buf: &PixelBuffer) -> PixelBuffer;

    fn grayscale(&self, buf: &PixelBuffer) -> PixelBuffer;

    fn edges(&self, gray: &PixelBuffer, low: f32, high: f32) -> PixelBuffer;

    fn histogram(&self, buf: &PixelBuffer, order: ChannelOrder) -> FeatureVector {
        extract_features(buf, order)
    }
}

/// Pure-Rust implementations of every stage.
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardOps;

impl ImageOps for StandardOps {
    fn adjust_brightness_contrast(
        &self,
        buf: &PixelBuffer,
        alpha: f32,
        beta: f32,
    ) -> PixelBuffer {
        adjust::adjust_brightness_contrast(buf, alpha, beta)
    }

    fn blur(&self, buf: &PixelBuffer, kernel: KernelSize) -> PipelineResult<PixelBuffer> {
        blur::gaussian_blur(buf, kernel)
    }

    fn denoise(&self, buf: &PixelBuffer) -> PixelBuffer {
        denoise::denoise(buf)
    }

    fn grayscale(&self, buf: &PixelBuffer) -> PixelBuffer {
        edges::grayscale(buf)
    }

    fn edges(&self, gray: &PixelBuffer, low: f32, high: f32) -> PixelBuffer {
        edges::detect_edges(gray, low, high)
    }
}
