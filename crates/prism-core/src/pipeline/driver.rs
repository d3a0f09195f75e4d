//! Pipeline orchestration - wires together all processing stages.

use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::dataset::DatasetWriter;
use crate::error::{PipelineError, PipelineResult};
use crate::features::dataset_values;
use crate::filters::{ImageOps, StandardOps};
use crate::types::{Artifact, DatasetRow, PipelineReport, PixelBuffer, Stage};

use super::layout::{write_jpeg, OutputLayout};
use super::load::ImageLoader;
use super::observer::PipelineObserver;
use super::settings::PipelineSettings;

/// Runs the fixed stage sequence for one input image.
///
/// Order: load, copy original, brightness/contrast, blur, denoise,
/// grayscale + edges, histogram of the denoised image, per-image CSV,
/// optional dataset row. Every intermediate image is written before the
/// next stage starts; nothing is cleaned up if a later stage fails.
pub struct PipelineDriver<O: ImageOps = StandardOps> {
    settings: PipelineSettings,
    ops: O,
    loader: ImageLoader,
    writer: DatasetWriter,
}

impl PipelineDriver<StandardOps> {
    /// Create a driver using the built-in filter implementations.
    pub fn new(settings: PipelineSettings) -> Self {
        Self::with_ops(settings, StandardOps)
    }
}

impl<O: ImageOps> PipelineDriver<O> {
    /// Create a driver with a custom set of image operations.
    pub fn with_ops(settings: PipelineSettings, ops: O) -> Self {
        Self {
            settings,
            ops,
            loader: ImageLoader,
            writer: DatasetWriter,
        }
    }

    /// Get a reference to the run settings.
    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    /// Process `input`, reporting progress to `observer`.
    ///
    /// A missing or undecodable input fails with `NotFound` before anything
    /// is created under the output root.
    pub fn run(
        &self,
        input: &Path,
        observer: &dyn PipelineObserver,
    ) -> PipelineResult<PipelineReport> {
        let start = Instant::now();
        let settings = &self.settings;
        settings.validate()?;

        let image = self.loader.load(input)?;
        tracing::debug!("Loaded {:?} in {:?}", input, start.elapsed());

        let root = absolute(&settings.output_root)?;
        let layout = OutputLayout::for_input(&root, input);
        layout.create()?;

        let mut artifacts = Vec::with_capacity(7);
        let mut record = |stage: Stage, path: PathBuf| {
            let artifact = Artifact { stage, path };
            observer.artifact_written(&artifact);
            artifacts.push(artifact);
        };

        let original = layout.original(input);
        std::fs::copy(input, &original).map_err(|e| PipelineError::io(&original, e))?;
        record(Stage::Original, original);

        observer.stage_started(Stage::Brightness);
        let bright = self
            .ops
            .adjust_brightness_contrast(&image, settings.alpha, settings.beta);
        record(Stage::Brightness, self.save(&layout, Stage::Brightness, &bright)?);

        observer.stage_started(Stage::Blur);
        let blurred = self.ops.blur(&bright, settings.kernel)?;
        record(Stage::Blur, self.save(&layout, Stage::Blur, &blurred)?);

        observer.stage_started(Stage::Denoise);
        let denoise_start = Instant::now();
        let denoised = self.ops.denoise(&blurred);
        tracing::debug!("Denoise took {:?}", denoise_start.elapsed());
        record(Stage::Denoise, self.save(&layout, Stage::Denoise, &denoised)?);

        observer.stage_started(Stage::Edges);
        let gray = self.ops.grayscale(&denoised);
        let edges = self
            .ops
            .edges(&gray, settings.low_threshold, settings.high_threshold);
        record(Stage::Edges, self.save(&layout, Stage::Edges, &edges)?);

        // Features describe the denoised color image, not the edge map.
        observer.stage_started(Stage::Features);
        let features = self.ops.histogram(&denoised, settings.channel_order);
        let feature_path = layout.features(&settings.feature_file_name);
        self.writer.write_per_image(&feature_path, &features)?;
        record(Stage::Features, feature_path);

        let dataset = match &settings.dataset_file {
            Some(name) => {
                observer.stage_started(Stage::Dataset);
                let path = root.join(name);
                let row = DatasetRow {
                    values: dataset_values(&features, settings.normalize),
                    image_name: input
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default(),
                    image_path: absolute(input)?.to_string_lossy().into_owned(),
                };
                self.writer.append_dataset_row(&path, &row)?;
                record(Stage::Dataset, path.clone());
                Some(path)
            }
            None => None,
        };

        let report = PipelineReport {
            input: input.to_path_buf(),
            output_dir: layout.dir().to_path_buf(),
            width: image.width(),
            height: image.height(),
            artifacts,
            feature_len: features.len(),
            dataset,
            elapsed_ms: start.elapsed().as_millis() as u64,
        };
        observer.finished(&report);
        Ok(report)
    }

    fn save(
        &self,
        layout: &OutputLayout,
        stage: Stage,
        buf: &PixelBuffer,
    ) -> PipelineResult<PathBuf> {
        let path = layout
            .stage_image(stage)
            .unwrap_or_else(|| layout.dir().join(format!("{stage}.jpg")));
        write_jpeg(buf, &path, self.settings.jpeg_quality)?;
        Ok(path)
    }
}

fn absolute(path: &Path) -> PipelineResult<PathBuf> {
    std::path::absolute(path).map_err(|e| PipelineError::io(path, e))
}
