//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::Config;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        let [width, height] = self.blur.kernel;
        if width == 0 || height == 0 || width % 2 == 0 || height % 2 == 0 {
            return Err(ConfigError::ValidationError(format!(
                "blur.kernel must be odd and positive, got [{width}, {height}]"
            )));
        }
        if self.output.jpeg_quality == 0 || self.output.jpeg_quality > 100 {
            return Err(ConfigError::ValidationError(
                "output.jpeg_quality must be between 1 and 100".into(),
            ));
        }
        if !is_plain_file_name(&self.features.file_name) {
            return Err(ConfigError::ValidationError(
                "features.file_name must be a plain file name".into(),
            ));
        }
        if !is_plain_file_name(&self.output.dataset_file) {
            return Err(ConfigError::ValidationError(
                "output.dataset_file must be a plain file name".into(),
            ));
        }
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::ValidationError(
                "logging.format must be \"pretty\" or \"json\"".into(),
            ));
        }
        Ok(())
    }
}

/// A single path component that stays inside its parent directory.
pub(crate) fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}
