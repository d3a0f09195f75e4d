//! CSV output for feature vectors.
//!
//! Two layouts with different lifetimes:
//! - **per-image** (`bin,value`): one file per processed image, rewritten on
//!   every run.
//! - **dataset** (`bin_0,...,image_name_(label),image_path`): one wide row per
//!   run, appended to a shared file. The header is written only when the
//!   file is created.
//!
//! Appends are not locked; concurrent runs against one dataset file must be
//! serialized by the caller.

use std::borrow::Cow;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::{PipelineError, PipelineResult};
use crate::types::{DatasetRow, FeatureVector};

/// Label column name in the dataset header.
pub const LABEL_COLUMN: &str = "image_name_(label)";

/// Path column name in the dataset header.
pub const PATH_COLUMN: &str = "image_path";

/// Writes feature vectors in either CSV layout.
#[derive(Debug, Default, Clone, Copy)]
pub struct DatasetWriter;

impl DatasetWriter {
    /// Write the two-column per-image table, replacing any previous content.
    pub fn write_per_image(&self, path: &Path, features: &FeatureVector) -> PipelineResult<()> {
        let file = File::create(path).map_err(|e| PipelineError::io(path, e))?;
        let mut writer = BufWriter::new(file);
        write_feature_table(&mut writer, features.counts())
            .and_then(|()| writer.flush())
            .map_err(|e| PipelineError::io(path, e))
    }

    /// Append one row to the dataset file, writing the header first if the
    /// file is missing or empty.
    ///
    /// Returns `true` when the header was written.
    pub fn append_dataset_row(&self, path: &Path, row: &DatasetRow) -> PipelineResult<bool> {
        let needs_header = std::fs::metadata(path)
            .map(|meta| meta.len() == 0)
            .unwrap_or(true);

        let mut chunk = String::new();
        if needs_header {
            chunk.push_str(&dataset_header(row.values.len()));
            chunk.push('\n');
        }
        chunk.push_str(&format_dataset_row(row));
        chunk.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| PipelineError::io(path, e))?;
        // Single write per run keeps header and row together.
        file.write_all(chunk.as_bytes())
            .map_err(|e| PipelineError::io(path, e))?;

        tracing::debug!(
            "Appended {} values to {:?} (header: {})",
            row.values.len(),
            path,
            needs_header
        );
        Ok(needs_header)
    }
}

/// Write `bin,value` followed by one `bin{i},{count:.6}` row per bin.
pub fn write_feature_table<W: Write>(writer: &mut W, counts: &[u32]) -> io::Result<()> {
    writeln!(writer, "bin,value")?;
    for (i, &count) in counts.iter().enumerate() {
        writeln!(writer, "bin{},{:.6}", i, f64::from(count))?;
    }
    Ok(())
}

/// Header line for a dataset with `len` feature columns.
pub fn dataset_header(len: usize) -> String {
    let mut columns: Vec<String> = (0..len).map(|i| format!("bin_{i}")).collect();
    columns.push(LABEL_COLUMN.to_string());
    columns.push(PATH_COLUMN.to_string());
    columns.join(",")
}

/// Render a dataset row without the trailing newline.
///
/// Values always carry a decimal point (`123.0`, `0.5`) whether or not the
/// row was normalized.
pub fn format_dataset_row(row: &DatasetRow) -> String {
    let mut fields: Vec<Cow<'_, str>> = row
        .values
        .iter()
        .map(|v| Cow::Owned(format_value(*v)))
        .collect();
    fields.push(quote_field(&row.image_name));
    fields.push(quote_field(&row.image_path));
    fields.join(",")
}

fn format_value(value: f64) -> String {
    format!("{value:?}")
}

/// Quote a CSV field when it contains a delimiter, quote or line break.
fn quote_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::extract_features;
    use crate::types::{ChannelOrder, PixelBuffer};
    use image::{Rgb, RgbImage};

    fn sample_features() -> FeatureVector {
        let img = RgbImage::from_fn(4, 4, |x, y| Rgb([x as u8, y as u8, 200]));
        extract_features(&PixelBuffer::from(img), ChannelOrder::Rgb)
    }

    fn row(values: Vec<f64>, name: &str) -> DatasetRow {
        DatasetRow {
            values,
            image_name: name.to_string(),
            image_path: format!("/data/{name}"),
        }
    }

    #[test]
    fn test_feature_table_layout() {
        let mut buffer = Vec::new();
        write_feature_table(&mut buffer, &[3, 0, 12]).unwrap();
        let output = String::from_utf8(buffer).unwrap();
        assert_eq!(
            output,
            "bin,value\nbin0,3.000000\nbin1,0.000000\nbin2,12.000000\n"
        );
    }

    #[test]
    fn test_per_image_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("features.csv");
        std::fs::write(&path, "stale content\n").unwrap();

        let features = sample_features();
        DatasetWriter.write_per_image(&path, &features).unwrap();
        let first = std::fs::read_to_string(&path).unwrap();
        DatasetWriter.write_per_image(&path, &features).unwrap();
        let second = std::fs::read_to_string(&path).unwrap();

        assert_eq!(first, second);
        assert!(!first.contains("stale"));
        assert_eq!(first.lines().count(), 1 + 768);
        assert!(first.contains("bin512,0.000000"));
        assert!(first.contains("bin712,16.000000"));
    }

    #[test]
    fn test_dataset_header() {
        let header = dataset_header(3);
        assert_eq!(header, "bin_0,bin_1,bin_2,image_name_(label),image_path");
    }

    #[test]
    fn test_dataset_append_writes_header_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dataset.csv");

        let r = row(vec![1.0, 2.0, 0.5], "a.jpg");
        assert!(DatasetWriter.append_dataset_row(&path, &r).unwrap());
        assert!(!DatasetWriter.append_dataset_row(&path, &r).unwrap());

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "bin_0,bin_1,bin_2,image_name_(label),image_path");
        assert_eq!(lines[1], "1.0,2.0,0.5,a.jpg,/data/a.jpg");
        assert_eq!(lines[1], lines[2]);
    }

    #[test]
    fn test_dataset_empty_file_gets_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dataset.csv");
        std::fs::File::create(&path).unwrap();

        assert!(DatasetWriter
            .append_dataset_row(&path, &row(vec![0.0], "b.png"))
            .unwrap());
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("bin_0,"));
    }

    #[test]
    fn test_raw_counts_keep_float_form() {
        let r = row(vec![123.0, 0.0, 0.25], "c.jpg");
        assert_eq!(format_dataset_row(&r), "123.0,0.0,0.25,c.jpg,/data/c.jpg");
    }

    #[test]
    fn test_fields_with_commas_are_quoted() {
        let r = DatasetRow {
            values: vec![1.0],
            image_name: "beach, sunset.jpg".into(),
            image_path: "/p/say \"hi\".jpg".into(),
        };
        assert_eq!(
            format_dataset_row(&r),
            "1.0,\"beach, sunset.jpg\",\"/p/say \"\"hi\"\".jpg\""
        );
    }

    #[test]
    fn test_missing_parent_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("features.csv");
        let err = DatasetWriter
            .write_per_image(&path, &sample_features())
            .unwrap_err();
        assert!(matches!(err, PipelineError::Io { .. }));
    }
}
