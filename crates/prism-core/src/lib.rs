//! Prism Core - image enhancement and histogram feature pipeline.
//!
//! Prism loads one image, runs it through a fixed chain of filters, writes
//! every intermediate result to disk and exports a color-histogram feature
//! vector as CSV.
//!
//! # Architecture
//!
//! ```text
//! Image → Load → Brightness/Contrast → Blur → Denoise → Edges
//!                                               │
//!                                               └→ Histogram → CSV
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use prism_core::{Config, PipelineDriver, PipelineSettings, TracingObserver};
//!
//! fn main() -> prism_core::Result<()> {
//!     let config = Config::load()?;
//!     let driver = PipelineDriver::new(PipelineSettings::from_config(&config));
//!
//!     let report = driver.run("./image.jpg".as_ref(), &TracingObserver)?;
//!     println!("Wrote {} files", report.artifacts.len());
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod config;
pub mod dataset;
pub mod error;
pub mod features;
pub mod filters;
pub mod math;
pub mod pipeline;
pub mod types;

// Re-exports for convenient access
pub use config::Config;
pub use dataset::DatasetWriter;
pub use error::{ConfigError, PipelineError, PipelineResult, PrismError, Result};
pub use features::extract_features;
pub use filters::{ImageOps, KernelSize, StandardOps};
pub use pipeline::{
    ImageLoader, NullObserver, PipelineDriver, PipelineObserver, PipelineSettings, TracingObserver,
};
pub use types::{
    Artifact, ChannelOrder, DatasetRow, FeatureVector, PipelineReport, PixelBuffer, Stage,
};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
