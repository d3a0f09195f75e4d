//! Image loading with content-based format detection.

use image::{ImageFormat, ImageReader};
use std::io::Cursor;
use std::path::Path;

use crate::error::{PipelineError, PipelineResult};
use crate::types::PixelBuffer;

/// Reads image files into 3-channel pixel buffers.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageLoader;

impl ImageLoader {
    /// Load an image from disk.
    ///
    /// Any decodable color type is converted to 8-bit RGB. A missing path, a
    /// directory, or undecodable content all fail with `NotFound`.
    pub fn load(&self, path: &Path) -> PipelineResult<PixelBuffer> {
        if !path.is_file() {
            return Err(PipelineError::NotFound {
                path: path.to_path_buf(),
                message: "file does not exist".to_string(),
            });
        }

        let bytes = std::fs::read(path).map_err(|e| PipelineError::NotFound {
            path: path.to_path_buf(),
            message: format!("cannot read file: {e}"),
        })?;
        self.decode_bytes(bytes, path)
    }

    /// Decode an in-memory file. `path` is used for the extension fallback
    /// and for error context.
    pub fn decode_bytes(&self, bytes: Vec<u8>, path: &Path) -> PipelineResult<PixelBuffer> {
        let mut reader = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| PipelineError::NotFound {
                path: path.to_path_buf(),
                message: format!("cannot detect image format: {e}"),
            })?;

        if reader.format().is_none() {
            let format = ImageFormat::from_path(path).map_err(|_| PipelineError::NotFound {
                path: path.to_path_buf(),
                message: "unrecognized image format".to_string(),
            })?;
            reader.set_format(format);
        }

        let image = reader.decode().map_err(|e| PipelineError::NotFound {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        tracing::debug!(
            "Decoded {:?} ({}x{}, {:?})",
            path,
            image.width(),
            image.height(),
            image.color()
        );
        Ok(PixelBuffer::Rgb(image.to_rgb8()))
    }
}
