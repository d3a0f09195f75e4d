//! Progress reporting from the pipeline driver.
//!
//! The driver never logs progress on its own; it reports to the observer it
//! is given. The binary passes a [`TracingObserver`], tests pass recorders.

use crate::types::{Artifact, PipelineReport, Stage};

/// Receives progress notifications from a pipeline run.
pub trait PipelineObserver {
    /// A stage is about to run.
    fn stage_started(&self, _stage: Stage) {}

    /// A file was written.
    fn artifact_written(&self, artifact: &Artifact);

    /// The run completed successfully.
    fn finished(&self, report: &PipelineReport);
}

/// Emits one `tracing` event per notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl PipelineObserver for TracingObserver {
    fn stage_started(&self, stage: Stage) {
        tracing::debug!("Running {} stage", stage);
    }

    fn artifact_written(&self, artifact: &Artifact) {
        let what = match artifact.stage {
            Stage::Original => "Copied original image",
            Stage::Brightness => "Saved brightness-adjusted image",
            Stage::Blur => "Saved blurred image",
            Stage::Denoise => "Saved denoised image",
            Stage::Edges => "Saved edge-detected image",
            Stage::Features => "Saved feature vector",
            Stage::Dataset => "Appended dataset row",
        };
        tracing::info!("{what}: {}", artifact.path.display());
    }

    fn finished(&self, report: &PipelineReport) {
        tracing::info!(
            "Done in {}ms, all files saved to \"{}\"",
            report.elapsed_ms,
            report.output_dir.display()
        );
    }
}

/// Discards every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl PipelineObserver for NullObserver {
    fn artifact_written(&self, _artifact: &Artifact) {}

    fn finished(&self, _report: &PipelineReport) {}
}
