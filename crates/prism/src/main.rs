//! Prism CLI - image enhancement pipeline with histogram feature export.
//!
//! Prism takes one image, writes each intermediate filter result next to a
//! copy of the original, and exports a color-histogram feature vector as CSV.
//!
//! # Usage
//!
//! ```bash
//! # Process an image with default parameters
//! prism process --input photos/cat.jpg
//!
//! # Custom parameters, appending a normalized row to results/dataset.csv
//! prism process --input cat.jpg --alpha 1.5 --ksize 7 7 --dataset --normalize
//!
//! # View configuration
//! prism config show
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

mod cli;
mod logging;

/// Prism - image enhancement pipeline with histogram feature export.
#[derive(Parser, Debug)]
#[command(name = "prism")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    /// Config file to use instead of the default location
    #[arg(short, long, global = true, env = "PRISM_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the enhancement pipeline on one image
    Process(cli::process::ProcessArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .as_ref()
        .map(|p| PathBuf::from(shellexpand::tilde(&p.to_string_lossy()).into_owned()))
        .unwrap_or_else(prism_core::Config::default_path);

    // Logging isn't initialized yet, so use eprintln for config warnings.
    let config = if config_path.exists() {
        match prism_core::Config::load_from(&config_path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!(
                    "Warning: Failed to load config from {}: {e}\n  \
                     Using default configuration. Check your config file with `prism config path`.",
                    config_path.display()
                );
                prism_core::Config::default()
            }
        }
    } else {
        prism_core::Config::default()
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("Prism v{}", prism_core::VERSION);

    // Dispatch to the appropriate command handler
    let result = match cli.command {
        Commands::Process(args) => cli::process::execute(args, &config),
        Commands::Config(args) => cli::config::execute(args, &config, &config_path),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
