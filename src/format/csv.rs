//! CSV output formatter

use crate::error::{Error, Result};
use crate::format::OutputFormatter;
use crate::sampling::PseudoPoint;

/// Leading empty name marks the row-index column
const HEADER: [&str; 5] = ["", "taxon_id", "hex_type", "latitude", "longitude"];

/// CSV formatter - header row plus one row per point, led by its row index
pub struct CsvFormatter;

impl OutputFormatter for CsvFormatter {
    fn name(&self) -> &str {
        "csv"
    }

    fn description(&self) -> &str {
        "Indexed CSV table"
    }

    fn extension(&self) -> &str {
        "csv"
    }

    fn format(&self, points: &[PseudoPoint]) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::with_capacity(points.len() * 48));
        writer.write_record(HEADER)?;

        for (index, point) in points.iter().enumerate() {
            writer.write_record([
                index.to_string(),
                point.taxon_id.to_string(),
                point.hex_type.to_string(),
                format!("{:?}", point.latitude),
                format!("{:?}", point.longitude),
            ])?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| Error::Io(e.into_error()))?;
        String::from_utf8(bytes).map_err(|e| Error::Io(std::io::Error::other(e)))
    }
}
