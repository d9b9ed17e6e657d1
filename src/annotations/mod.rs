//! Annotation input
//!
//! The annotation/hexagon join lives in the database; extraction reads its
//! exported result. Two layouts are accepted:
//! - CSV with a header naming `taxon_id` (or `taxa_id`), `hex_index`, `hex_type`
//! - JSON array of objects with the same fields
//!
//! Row order is preserved.

use crate::error::{Error, Result};
use crate::hex::HexAnnotation;
use std::fs;
use std::path::Path;

/// Read annotations from a file, picking the layout from its extension
pub fn read_annotations(path: &Path) -> Result<Vec<HexAnnotation>> {
    let content = fs::read_to_string(path).map_err(|e| {
        Error::Annotation(format!("Failed to read {}: {}", path.display(), e))
    })?;

    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => parse_json(&content),
        _ => parse_csv(&content),
    }
}

/// Parse a JSON array of annotation rows
pub fn parse_json(content: &str) -> Result<Vec<HexAnnotation>> {
    serde_json::from_str(content)
        .map_err(|e| Error::Annotation(format!("Failed to parse annotations: {}", e)))
}

const TAXON_COLUMNS: &[&str] = &["taxon_id", "taxa_id"];
const HEX_INDEX_COLUMNS: &[&str] = &["hex_index"];
const HEX_TYPE_COLUMNS: &[&str] = &["hex_type"];

/// Fail early when the header lacks a required column
fn check_header(headers: &csv::StringRecord) -> Result<()> {
    for candidates in [TAXON_COLUMNS, HEX_INDEX_COLUMNS, HEX_TYPE_COLUMNS] {
        if !headers.iter().any(|name| candidates.contains(&name)) {
            return Err(Error::Annotation(format!(
                "CSV header is missing column {}",
                candidates.join(" / ")
            )));
        }
    }
    Ok(())
}

/// Attach the 1-based input line to a CSV error
fn row_error(e: csv::Error) -> Error {
    match e.position() {
        Some(pos) => Error::Annotation(format!("line {}: {}", pos.line(), e)),
        None => Error::Annotation(e.to_string()),
    }
}

/// Parse CSV annotation rows; columns are matched by header name and
/// blank lines are skipped
pub fn parse_csv(content: &str) -> Result<Vec<HexAnnotation>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader.headers().map_err(row_error)?.clone();
    if headers.is_empty() {
        return Err(Error::Annotation("CSV input is empty".to_string()));
    }
    check_header(&headers)?;

    reader
        .deserialize::<HexAnnotation>()
        .map(|row| row.map_err(row_error))
        .collect()
}
