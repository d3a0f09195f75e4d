//! Per-image output directory layout and artifact writers.

use image::codecs::jpeg::JpegEncoder;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{PipelineError, PipelineResult};
use crate::types::{PixelBuffer, Stage};

/// File locations for one processed image: `<root>/<input stem>/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    dir: PathBuf,
}

impl OutputLayout {
    /// Layout for `input` under `root`. The directory is named after the
    /// input's file name with the extension stripped.
    pub fn for_input(root: &Path, input: &Path) -> Self {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "image".to_string());
        Self {
            dir: root.join(stem),
        }
    }

    /// The per-image directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the directory and any missing parents. Existing directories are
    /// reused as-is.
    pub fn create(&self) -> PipelineResult<()> {
        std::fs::create_dir_all(&self.dir).map_err(|e| PipelineError::io(&self.dir, e))
    }

    /// Destination of the unmodified input copy, keeping its extension.
    pub fn original(&self, input: &Path) -> PathBuf {
        match input.extension() {
            Some(ext) => self
                .dir
                .join(format!("0_original.{}", ext.to_string_lossy())),
            None => self.dir.join("0_original"),
        }
    }

    /// Destination of an intermediate image, if the stage writes one.
    pub fn stage_image(&self, stage: Stage) -> Option<PathBuf> {
        let name = match stage {
            Stage::Brightness => "1_brightness.jpg",
            Stage::Blur => "2_blur.jpg",
            Stage::Denoise => "3_denoise.jpg",
            Stage::Edges => "4_edges.jpg",
            Stage::Original | Stage::Features | Stage::Dataset => return None,
        };
        Some(self.dir.join(name))
    }

    /// Destination of the per-image feature table.
    pub fn features(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name)
    }
}

/// Encode a buffer as JPEG at `path`, replacing any existing file.
pub fn write_jpeg(buf: &PixelBuffer, path: &Path, quality: u8) -> PipelineResult<()> {
    let file = File::create(path).map_err(|e| PipelineError::io(path, e))?;
    let mut writer = BufWriter::new(file);

    let encoder = JpegEncoder::new_with_quality(&mut writer, quality);
    buf.to_dynamic()
        .write_with_encoder(encoder)
        .map_err(|e| PipelineError::Encode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    writer.flush().map_err(|e| PipelineError::io(path, e))
}
