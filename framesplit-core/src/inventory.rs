//! Inventory rows and the CSV writer.
//!
//! One row is written per attempted frame and per surviving image. The file
//! is always replaced wholesale; rows keep the order the builder emitted them.

use crate::error::CoreResult;
use crate::splits::Split;

use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Column order of the inventory file.
pub const INVENTORY_COLUMNS: [&str; 7] = [
    "category",
    "source_type",
    "filename",
    "timestamps_extracted",
    "output_path",
    "relative_path",
    "split",
];

const LINE_TERMINATOR: &str = "\r\n";

/// Kind of media a row describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Video,
    Image,
}

impl SourceType {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            SourceType::Video => "video",
            SourceType::Image => "image",
        }
    }
}

/// One line of the inventory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventoryRow {
    pub category: String,
    pub source_type: SourceType,
    /// File name of the source video or image
    pub filename: String,
    /// JSON list holding the frame timestamp, empty for images
    pub timestamps_extracted: String,
    /// Absolute artifact path, empty when extraction failed
    pub output_path: String,
    /// Artifact path relative to the dataset root
    pub relative_path: String,
    pub split: Split,
}

impl InventoryRow {
    fn fields(&self) -> [&str; 7] {
        [
            self.category.as_str(),
            self.source_type.as_str(),
            self.filename.as_str(),
            self.timestamps_extracted.as_str(),
            self.output_path.as_str(),
            self.relative_path.as_str(),
            self.split.as_str(),
        ]
    }
}

/// Encodes a frame timestamp as a one-element JSON list, rounded to milliseconds.
pub fn encode_timestamp(timestamp: f64) -> CoreResult<String> {
    let rounded = (timestamp * 1000.0).round() / 1000.0;
    Ok(serde_json::to_string(&[rounded])?)
}

/// Quotes a field when it contains a delimiter, quote or line break.
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

fn write_record<W: Write>(out: &mut W, fields: &[&str]) -> std::io::Result<()> {
    let line: Vec<String> = fields.iter().map(|f| escape_csv(f)).collect();
    write!(out, "{}{}", line.join(","), LINE_TERMINATOR)
}

/// Writes `rows` to `destination`, replacing any existing file.
///
/// Returns the number of rows written (header excluded).
pub fn write_inventory(rows: &[InventoryRow], destination: &Path) -> CoreResult<usize> {
    if destination.exists() {
        log::debug!("Removing previous inventory: {}", destination.display());
        fs::remove_file(destination)?;
    }
    if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut out = BufWriter::new(File::create(destination)?);
    write_record(&mut out, &INVENTORY_COLUMNS)?;
    for row in rows {
        write_record(&mut out, &row.fields())?;
    }
    out.flush()?;

    log::info!("Inventory written to {} ({} rows)", destination.display(), rows.len());
    Ok(rows.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_csv_quotes_only_when_needed() {
        assert_eq!(escape_csv("simple"), "simple");
        assert_eq!(escape_csv("[0.3]"), "[0.3]");
        assert_eq!(escape_csv("with,comma"), "\"with,comma\"");
        assert_eq!(escape_csv("with\"quote"), "\"with\"\"quote\"");
        assert_eq!(escape_csv("with\nnewline"), "\"with\nnewline\"");
        assert_eq!(escape_csv(""), "");
    }

    #[test]
    fn timestamps_encode_as_single_element_json_lists() {
        assert_eq!(encode_timestamp(0.3).unwrap(), "[0.3]");
        assert_eq!(encode_timestamp(1.0).unwrap(), "[1.0]");
        assert_eq!(encode_timestamp(0.0).unwrap(), "[0.0]");
        assert_eq!(encode_timestamp(1.4994).unwrap(), "[1.499]");
        assert_eq!(encode_timestamp(2.7996).unwrap(), "[2.8]");
    }

    #[test]
    fn row_fields_follow_column_order() {
        let row = InventoryRow {
            category: "cats".to_string(),
            source_type: SourceType::Image,
            filename: "tabby, small.jpg".to_string(),
            timestamps_extracted: String::new(),
            output_path: "/abs/cats/tabby, small.jpg".to_string(),
            relative_path: "cats/tabby, small.jpg".to_string(),
            split: Split::Val,
        };
        let mut out = Vec::new();
        write_record(&mut out, &row.fields()).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "cats,image,\"tabby, small.jpg\",,\"/abs/cats/tabby, small.jpg\",\"cats/tabby, small.jpg\",val\r\n"
        );
    }
}
