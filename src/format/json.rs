//! JSON output formatter

use crate::error::Result;
use crate::format::OutputFormatter;
use crate::sampling::PseudoPoint;

/// JSON formatter - outputs the points as a pretty-printed array
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "JSON array of points"
    }

    fn extension(&self) -> &str {
        "json"
    }

    fn format(&self, points: &[PseudoPoint]) -> Result<String> {
        Ok(serde_json::to_string_pretty(points)?)
    }
}
