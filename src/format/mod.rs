//! Output formatters
//!
//! Provides trait-based formatting for pseudo-point tables.

pub mod csv;
pub mod json;

use crate::error::Result;
use crate::sampling::PseudoPoint;
use serde::{Deserialize, Serialize};

/// Information about an output format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatInfo {
    /// Format name
    pub name: String,
    /// Format description
    pub description: String,
}

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Get the format name
    fn name(&self) -> &str;

    /// Get the format description
    fn description(&self) -> &str;

    /// File extension used when writing to the output directory
    fn extension(&self) -> &str;

    /// Format the generated points
    fn format(&self, points: &[PseudoPoint]) -> Result<String>;
}

/// Get a formatter by name
pub fn get_formatter(name: &str) -> Option<Box<dyn OutputFormatter>> {
    match name.to_lowercase().as_str() {
        "csv" => Some(Box::new(csv::CsvFormatter)),
        "json" => Some(Box::new(json::JsonFormatter)),
        _ => None,
    }
}

/// Names accepted by `get_formatter`
pub const FORMAT_NAMES: [&str; 2] = ["csv", "json"];

/// List all available formatters
pub fn available_formats() -> Vec<FormatInfo> {
    FORMAT_NAMES
        .iter()
        .filter_map(|name| get_formatter(name))
        .map(|formatter| FormatInfo {
            name: formatter.name().to_string(),
            description: formatter.description().to_string(),
        })
        .collect()
}
