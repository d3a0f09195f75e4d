//! Parameters for one pipeline run.

use std::path::PathBuf;

use crate::config::{is_plain_file_name, Config};
use crate::error::{PipelineError, PipelineResult};
use crate::filters::KernelSize;
use crate::types::ChannelOrder;

/// Everything the driver needs to process an image.
///
/// Built from [`Config`] and then overridden by command-line flags.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineSettings {
    /// Contrast gain
    pub alpha: f32,
    /// Brightness offset
    pub beta: f32,
    /// Blur kernel size
    pub kernel: KernelSize,
    /// Canny low threshold
    pub low_threshold: f32,
    /// Canny high threshold
    pub high_threshold: f32,
    /// Per-image feature file name
    pub feature_file_name: String,
    /// L2-normalize the dataset row
    pub normalize: bool,
    /// Root under which per-image directories are created
    pub output_root: PathBuf,
    /// Dataset file name under `output_root`; `None` disables appending
    pub dataset_file: Option<String>,
    /// Histogram concatenation order
    pub channel_order: ChannelOrder,
    /// JPEG quality for intermediate images
    pub jpeg_quality: u8,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl PipelineSettings {
    /// Settings from a loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            alpha: config.adjust.alpha,
            beta: config.adjust.beta as f32,
            kernel: KernelSize::from(config.blur.kernel),
            low_threshold: config.edges.low_threshold,
            high_threshold: config.edges.high_threshold,
            feature_file_name: config.features.file_name.clone(),
            normalize: config.features.normalize,
            output_root: config.output_root(),
            dataset_file: config
                .output
                .append_dataset
                .then(|| config.output.dataset_file.clone()),
            channel_order: config.features.channel_order,
            jpeg_quality: config.output.jpeg_quality,
        }
    }

    /// Check parameters that would otherwise fail mid-run.
    pub fn validate(&self) -> PipelineResult<()> {
        self.kernel.validate()?;
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(PipelineError::InvalidParameter {
                stage: "encode",
                message: format!("jpeg quality {} is outside 1-100", self.jpeg_quality),
            });
        }
        if !is_plain_file_name(&self.feature_file_name) {
            return Err(PipelineError::InvalidParameter {
                stage: "features",
                message: format!("{:?} is not a plain file name", self.feature_file_name),
            });
        }
        if let Some(name) = self.dataset_file.as_deref().filter(|n| !is_plain_file_name(n)) {
            return Err(PipelineError::InvalidParameter {
                stage: "dataset",
                message: format!("{name:?} is not a plain file name"),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_cli_defaults() {
        let settings = PipelineSettings::default();
        assert_eq!(settings.alpha, 1.2);
        assert_eq!(settings.beta, 20.0);
        assert_eq!(settings.kernel, KernelSize::new(5, 5));
        assert_eq!(settings.low_threshold, 50.0);
        assert_eq!(settings.high_threshold, 150.0);
        assert_eq!(settings.feature_file_name, "features.csv");
        assert!(!settings.normalize);
        assert!(settings.dataset_file.is_none());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_append_dataset_enables_dataset_file() {
        let mut config = Config::default();
        config.output.append_dataset = true;
        let settings = PipelineSettings::from_config(&config);
        assert_eq!(settings.dataset_file.as_deref(), Some("dataset.csv"));
    }

    #[test]
    fn test_validate_rejects_even_kernel() {
        let settings = PipelineSettings {
            kernel: KernelSize::new(4, 4),
            ..PipelineSettings::default()
        };
        assert!(settings.validate().unwrap_err().is_invalid_parameter());
    }

    #[test]
    fn test_validate_rejects_nested_feature_file() {
        for name in ["sub/features.csv", "..", "."] {
            let settings = PipelineSettings {
                feature_file_name: name.into(),
                ..PipelineSettings::default()
            };
            assert!(settings.validate().unwrap_err().is_invalid_parameter(), "{name:?}");
        }
    }

    #[test]
    fn test_validate_rejects_escaping_dataset_file() {
        for name in ["../../escaped.csv", "..", ""] {
            let settings = PipelineSettings {
                dataset_file: Some(name.into()),
                ..PipelineSettings::default()
            };
            assert!(settings.validate().unwrap_err().is_invalid_parameter(), "{name:?}");
        }

        let settings = PipelineSettings {
            dataset_file: Some("dataset.csv".into()),
            ..PipelineSettings::default()
        };
        assert!(settings.validate().is_ok());
    }
}
