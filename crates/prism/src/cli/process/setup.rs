//! Settings assembly: config values overridden by command-line flags.

use prism_core::{Config, KernelSize, PipelineSettings};

use super::ProcessArgs;

/// Start from the config file and apply every flag the user passed.
pub fn build_settings(args: &ProcessArgs, config: &Config) -> PipelineSettings {
    let mut settings = PipelineSettings::from_config(config);

    if let Some(outdir) = &args.outdir {
        let expanded = shellexpand::tilde(&outdir.to_string_lossy()).into_owned();
        settings.output_root = expanded.into();
    }
    if let Some(alpha) = args.alpha {
        settings.alpha = alpha;
    }
    if let Some(beta) = args.beta {
        settings.beta = beta as f32;
    }
    let kernel = args
        .ksize
        .as_deref()
        .and_then(|k| <[u32; 2]>::try_from(k).ok());
    if let Some([width, height]) = kernel {
        settings.kernel = KernelSize::new(width, height);
    }
    if let Some(low) = args.low {
        settings.low_threshold = low as f32;
    }
    if let Some(high) = args.high {
        settings.high_threshold = high as f32;
    }
    if let Some(featfile) = &args.featfile {
        settings.feature_file_name = featfile.clone();
    }
    if args.normalize {
        settings.normalize = true;
    }
    if let Some(dataset) = &args.dataset {
        settings.dataset_file = Some(dataset.clone());
    }
    if let Some(order) = args.channel_order {
        settings.channel_order = order.into();
    }

    if settings.normalize && settings.dataset_file.is_none() {
        tracing::warn!("--normalize only affects the dataset row; pass --dataset to append one");
    }
    if settings.low_threshold > settings.high_threshold {
        tracing::warn!(
            "Edge low threshold {} is above high threshold {}",
            settings.low_threshold,
            settings.high_threshold
        );
    }

    settings
}
