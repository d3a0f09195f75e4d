//! Sub-configuration structs with defaults matching the command-line defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::types::ChannelOrder;

/// Brightness/contrast settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdjustConfig {
    /// Contrast gain applied to every sample
    pub alpha: f32,

    /// Brightness offset added after the gain
    pub beta: i32,
}

impl Default for AdjustConfig {
    fn default() -> Self {
        Self {
            alpha: 1.2,
            beta: 20,
        }
    }
}

/// Gaussian blur settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BlurConfig {
    /// Kernel dimensions as [width, height]; both must be odd
    pub kernel: [u32; 2],
}

impl Default for BlurConfig {
    fn default() -> Self {
        Self { kernel: [5, 5] }
    }
}

/// Canny edge detection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgesConfig {
    /// Hysteresis low threshold
    pub low_threshold: f32,

    /// Hysteresis high threshold
    pub high_threshold: f32,
}

impl Default for EdgesConfig {
    fn default() -> Self {
        Self {
            low_threshold: 50.0,
            high_threshold: 150.0,
        }
    }
}

/// Histogram feature settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeaturesConfig {
    /// Per-image feature file name, written inside the image's output directory
    pub file_name: String,

    /// L2-normalize the vector before appending it to the dataset
    pub normalize: bool,

    /// Channel order used when concatenating histograms
    pub channel_order: ChannelOrder,
}

impl Default for FeaturesConfig {
    fn default() -> Self {
        Self {
            file_name: "features.csv".to_string(),
            normalize: false,
            channel_order: ChannelOrder::Bgr,
        }
    }
}

/// Output layout settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Root directory; each image gets a subdirectory named after its stem
    pub root: PathBuf,

    /// Dataset file name, relative to `root`
    pub dataset_file: String,

    /// Append every run to the dataset file
    pub append_dataset: bool,

    /// JPEG quality for intermediate artifacts (1-100)
    pub jpeg_quality: u8,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("results"),
            dataset_file: "dataset.csv".to_string(),
            append_dataset: false,
            jpeg_quality: 95,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
