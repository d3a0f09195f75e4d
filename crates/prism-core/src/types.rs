//! Core data types for the Prism image pipeline.
//!
//! These types represent the buffers flowing between stages and the output
//! of processing an image through the pipeline.

use image::{DynamicImage, GrayImage, RgbImage};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Number of histogram bins per channel.
pub const BINS_PER_CHANNEL: usize = 256;

/// A decoded 8-bit image, either 3-channel color or 1-channel luma.
///
/// Buffers are never modified in place by the pipeline: each stage returns a
/// freshly allocated buffer.
#[derive(Debug, Clone, PartialEq)]
pub enum PixelBuffer {
    /// Interleaved RGB samples
    Rgb(RgbImage),
    /// Single-channel luminance samples
    Gray(GrayImage),
}

impl PixelBuffer {
    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        match self {
            Self::Rgb(img) => img.width(),
            Self::Gray(img) => img.width(),
        }
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        match self {
            Self::Rgb(img) => img.height(),
            Self::Gray(img) => img.height(),
        }
    }

    /// Number of interleaved channels (3 or 1).
    pub fn channels(&self) -> usize {
        match self {
            Self::Rgb(_) => 3,
            Self::Gray(_) => 1,
        }
    }

    /// Number of pixels (width × height).
    pub fn pixel_count(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    /// Interleaved raw samples.
    pub fn samples(&self) -> &[u8] {
        match self {
            Self::Rgb(img) => img.as_raw(),
            Self::Gray(img) => img.as_raw(),
        }
    }

    /// Interleaved raw samples, writable in place.
    pub(crate) fn samples_mut(&mut self) -> &mut [u8] {
        match self {
            Self::Rgb(img) => &mut **img,
            Self::Gray(img) => &mut **img,
        }
    }

    /// Convert into a `DynamicImage` for encoding.
    pub fn to_dynamic(&self) -> DynamicImage {
        match self {
            Self::Rgb(img) => DynamicImage::ImageRgb8(img.clone()),
            Self::Gray(img) => DynamicImage::ImageLuma8(img.clone()),
        }
    }
}

impl From<RgbImage> for PixelBuffer {
    fn from(img: RgbImage) -> Self {
        Self::Rgb(img)
    }
}

impl From<GrayImage> for PixelBuffer {
    fn from(img: GrayImage) -> Self {
        Self::Gray(img)
    }
}

/// Order in which per-channel histograms are concatenated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelOrder {
    /// Red, green, blue
    Rgb,
    /// Blue, green, red
    #[default]
    Bgr,
}

impl ChannelOrder {
    /// Interleaved sample offsets in concatenation order for a buffer with
    /// `channels` channels.
    pub fn offsets(self, channels: usize) -> Vec<usize> {
        match (self, channels) {
            (Self::Bgr, 3) => vec![2, 1, 0],
            _ => (0..channels).collect(),
        }
    }
}

/// Concatenated per-channel histogram counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureVector {
    counts: Vec<u32>,
    channels: usize,
}

impl FeatureVector {
    pub(crate) fn new(counts: Vec<u32>, channels: usize) -> Self {
        debug_assert_eq!(counts.len(), channels * BINS_PER_CHANNEL);
        Self { counts, channels }
    }

    /// Raw histogram counts, channel-major.
    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    /// Number of channels the vector was computed from.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Total number of bins (`channels × 256`).
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether the vector holds no bins.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// The 256 bins belonging to one channel.
    pub fn channel(&self, index: usize) -> &[u32] {
        &self.counts[index * BINS_PER_CHANNEL..(index + 1) * BINS_PER_CHANNEL]
    }

    /// Counts widened to `f64`.
    pub fn to_f64(&self) -> Vec<f64> {
        self.counts.iter().map(|&c| f64::from(c)).collect()
    }
}

/// One row of the accumulated dataset CSV.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetRow {
    /// Feature values (raw counts or L2-normalized)
    pub values: Vec<f64>,
    /// Label column; the input file name
    pub image_name: String,
    /// Absolute path of the processed input
    pub image_path: String,
}

/// Named pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Original,
    Brightness,
    Blur,
    Denoise,
    Edges,
    Features,
    Dataset,
}

impl Stage {
    /// Short lowercase name used in log lines.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Original => "original",
            Self::Brightness => "brightness",
            Self::Blur => "blur",
            Self::Denoise => "denoise",
            Self::Edges => "edges",
            Self::Features => "features",
            Self::Dataset => "dataset",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file written by the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    /// Stage that produced the file
    pub stage: Stage,
    /// Absolute path of the written file
    pub path: PathBuf,
}

/// Summary of one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineReport {
    /// Input path as given by the caller
    pub input: PathBuf,

    /// Absolute per-image output directory
    pub output_dir: PathBuf,

    /// Image width in pixels
    pub width: u32,

    /// Image height in pixels
    pub height: u32,

    /// Every file written, in write order
    pub artifacts: Vec<Artifact>,

    /// Number of feature bins
    pub feature_len: usize,

    /// Absolute path of the dataset file, if a row was appended
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dataset: Option<PathBuf>,

    /// Wall-clock run time in milliseconds
    pub elapsed_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_buffer_shape() {
        let rgb = PixelBuffer::from(RgbImage::new(4, 3));
        assert_eq!(rgb.width(), 4);
        assert_eq!(rgb.height(), 3);
        assert_eq!(rgb.channels(), 3);
        assert_eq!(rgb.samples().len(), 36);

        let gray = PixelBuffer::from(GrayImage::new(4, 3));
        assert_eq!(gray.channels(), 1);
        assert_eq!(gray.pixel_count(), 12);
    }

    #[test]
    fn test_samples_mut_keeps_shape() {
        let buf = PixelBuffer::from(GrayImage::new(2, 2));
        let mut out = buf.clone();
        out.samples_mut().copy_from_slice(&[1, 2, 3, 4]);
        assert_eq!(out.samples(), &[1, 2, 3, 4]);
        assert_eq!((out.width(), out.height()), (2, 2));
        assert_eq!(buf.samples(), &[0, 0, 0, 0]);

        let mut rgb = PixelBuffer::from(RgbImage::new(2, 1));
        assert_eq!(rgb.samples_mut().len(), 6);
    }

    #[test]
    fn test_channel_order_offsets() {
        assert_eq!(ChannelOrder::Rgb.offsets(3), vec![0, 1, 2]);
        assert_eq!(ChannelOrder::Bgr.offsets(3), vec![2, 1, 0]);
        assert_eq!(ChannelOrder::Bgr.offsets(1), vec![0]);
    }

    #[test]
    fn test_report_skips_missing_dataset() {
        let report = PipelineReport {
            input: PathBuf::from("cat.png"),
            output_dir: PathBuf::from("/tmp/results/cat"),
            width: 2,
            height: 2,
            artifacts: vec![Artifact {
                stage: Stage::Blur,
                path: PathBuf::from("/tmp/results/cat/2_blur.jpg"),
            }],
            feature_len: 768,
            dataset: None,
            elapsed_ms: 3,
        };
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"stage\":\"blur\""));
        assert!(!json.contains("dataset"));
    }
}
