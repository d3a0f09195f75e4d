//! Configuration management for Prism.
//!
//! Configuration is loaded from the platform config directory with defaults
//! that match the command-line defaults. Command-line flags override it.

mod types;
mod validate;

pub use types::*;
pub(crate) use validate::is_plain_file_name;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure for Prism.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Brightness/contrast settings
    pub adjust: AdjustConfig,

    /// Blur settings
    pub blur: BlurConfig,

    /// Edge detection settings
    pub edges: EdgesConfig,

    /// Histogram feature settings
    pub features: FeaturesConfig,

    /// Output layout settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// Uses platform-appropriate directories:
    /// - macOS: ~/Library/Application Support/com.prism.prism/config.toml
    /// - Linux: ~/.config/prism/config.toml
    /// - Windows: C:\Users\<User>\AppData\Roaming\prism\config\config.toml
    ///
    /// Falls back to ~/.prism/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "prism", "prism")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".prism").join("config.toml")
            })
    }

    /// Get the resolved output root (with ~ expansion).
    pub fn output_root(&self) -> PathBuf {
        let path_str = self.output.root.to_string_lossy();
        let expanded = shellexpand::tilde(&path_str);
        PathBuf::from(expanded.into_owned())
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChannelOrder;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.adjust.alpha, 1.2);
        assert_eq!(config.adjust.beta, 20);
        assert_eq!(config.blur.kernel, [5, 5]);
        assert_eq!(config.edges.low_threshold, 50.0);
        assert_eq!(config.edges.high_threshold, 150.0);
        assert_eq!(config.features.file_name, "features.csv");
        assert!(!config.features.normalize);
        assert_eq!(config.features.channel_order, ChannelOrder::Bgr);
        assert_eq!(config.output.root, PathBuf::from("results"));
    }

    #[test]
    fn test_config_to_toml() {
        let config = Config::default();
        let toml = config.to_toml().unwrap();
        assert!(toml.contains("[adjust]"));
        assert!(toml.contains("[blur]"));
        assert!(toml.contains("[features]"));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml(
            r#"
            [blur]
            kernel = [7, 3]

            [features]
            normalize = true
            "#,
        )
        .unwrap();
        assert_eq!(config.blur.kernel, [7, 3]);
        assert!(config.features.normalize);
        assert_eq!(config.features.channel_order, ChannelOrder::Bgr);
        assert_eq!(config.adjust.alpha, 1.2);

        let config = Config::from_toml("[features]\nchannel_order = \"rgb\"\n").unwrap();
        assert_eq!(config.features.channel_order, ChannelOrder::Rgb);
        assert_eq!(config.output.jpeg_quality, 95);
    }

    #[test]
    fn test_from_toml_runs_validation() {
        let err = Config::from_toml("[blur]\nkernel = [4, 4]\n").unwrap_err();
        assert!(err.to_string().contains("blur.kernel"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[adjust]\nalpha = 2.0\nbeta = -10\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.adjust.alpha, 2.0);
        assert_eq!(config.adjust.beta, -10);
    }

    #[test]
    fn test_output_root_expands_tilde() {
        let mut config = Config::default();
        config.output.root = PathBuf::from("~/prism-out");
        let root = config.output_root();
        assert!(!root.to_string_lossy().starts_with('~'));
        assert!(root.ends_with("prism-out"));
    }
}
