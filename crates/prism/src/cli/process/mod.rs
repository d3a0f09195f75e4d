//! The `prism process` command for running the pipeline on one image.

mod setup;
pub mod types;

pub use types::ChannelOrderArg;

use clap::Args;
use prism_core::{Config, PipelineDriver, TracingObserver};
use std::path::PathBuf;

use setup::build_settings;

/// Arguments for the `process` command.
///
/// Unset options fall back to the config file, then to built-in defaults.
#[derive(Args, Debug, Default)]
pub struct ProcessArgs {
    /// Path to the input image
    #[arg(long, required = true)]
    pub input: PathBuf,

    /// Output root; results go to <OUTDIR>/<image name>/ [default: results]
    #[arg(long)]
    pub outdir: Option<PathBuf>,

    /// Contrast factor [default: 1.2]
    #[arg(long, allow_negative_numbers = true)]
    pub alpha: Option<f32>,

    /// Brightness offset [default: 20]
    #[arg(long, allow_negative_numbers = true)]
    pub beta: Option<i32>,

    /// Gaussian blur kernel width and height, both odd [default: 5 5]
    #[arg(long, num_args = 2, value_names = ["WIDTH", "HEIGHT"])]
    pub ksize: Option<Vec<u32>>,

    /// Canny low threshold [default: 50]
    #[arg(long)]
    pub low: Option<u32>,

    /// Canny high threshold [default: 150]
    #[arg(long)]
    pub high: Option<u32>,

    /// Per-image feature CSV file name [default: features.csv]
    #[arg(long)]
    pub featfile: Option<String>,

    /// L2-normalize the feature vector before appending it to the dataset
    #[arg(long)]
    pub normalize: bool,

    /// Append a feature row to <OUTDIR>/<NAME>
    #[arg(long, value_name = "NAME", num_args = 0..=1, default_missing_value = "dataset.csv")]
    pub dataset: Option<String>,

    /// Channel order of the concatenated histograms [default: bgr]
    #[arg(long, value_enum)]
    pub channel_order: Option<ChannelOrderArg>,

    /// Print a JSON summary of the run to stdout
    #[arg(long)]
    pub summary: bool,
}

/// Execute the process command.
pub fn execute(args: ProcessArgs, config: &Config) -> anyhow::Result<()> {
    if !args.input.is_file() {
        anyhow::bail!("Input file not found: \"{}\"", args.input.display());
    }

    let settings = build_settings(&args, config);
    tracing::debug!("Pipeline settings: {:?}", settings);

    let driver = PipelineDriver::new(settings);
    let report = driver.run(&args.input, &TracingObserver)?;

    if args.summary {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}
