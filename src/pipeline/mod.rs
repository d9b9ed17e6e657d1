//! Extraction pipeline
//!
//! Walks the annotation rows in input order, resolves each cell once, asks the
//! generator for the row's points and appends them in the same order. Any
//! error aborts the run.

use crate::error::{Error, Result};
use crate::format::OutputFormatter;
use crate::hex::{CachedResolver, CellResolver, HexAnnotation};
use crate::sampling::{PseudoPoint, PseudoPointGenerator, SamplingMode};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::info;

/// Timestamp layout used for output file names
pub const OUTPUT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Outcome of one extraction run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionReport {
    /// Unique ID for this run
    pub id: String,
    pub started_at: DateTime<Local>,
    pub elapsed: Duration,
    pub mode: SamplingMode,
    pub max_resolution_amount: u8,
    pub source: String,
    pub rows: usize,
    pub unique_cells: usize,
    pub points: Vec<PseudoPoint>,
}

/// Generate pseudo-points for every annotation row
pub fn run<R: CellResolver>(
    annotations: &[HexAnnotation],
    resolver: R,
    generator: &PseudoPointGenerator<'_>,
) -> Result<ExtractionReport> {
    let config = *generator.config();
    let started_at = Local::now();
    let timer = Instant::now();

    info!(
        rows = annotations.len(),
        mode = %config.mode,
        max_amount = config.max_resolution_amount,
        source = generator.source_name(),
        "starting extraction"
    );

    let resolver = CachedResolver::new(resolver);
    let mut points = Vec::new();

    for annotation in annotations {
        let geometry = resolver.get(&annotation.hex_index)?;
        points.extend(generator.generate(annotation, &geometry)?);
    }

    let elapsed = timer.elapsed();
    info!(
        points = points.len(),
        unique_cells = resolver.unique_cells(),
        "Executed in: {:?}",
        elapsed
    );

    Ok(ExtractionReport {
        id: uuid::Uuid::new_v4().to_string(),
        started_at,
        elapsed,
        mode: config.mode,
        max_resolution_amount: config.max_resolution_amount,
        source: generator.source_name().to_string(),
        rows: annotations.len(),
        unique_cells: resolver.unique_cells(),
        points,
    })
}

/// `<output_dir>/<timestamp>.<extension>`
pub fn output_path(output_dir: &Path, timestamp: &DateTime<Local>, extension: &str) -> PathBuf {
    output_dir.join(format!(
        "{}.{}",
        timestamp.format(OUTPUT_TIMESTAMP_FORMAT),
        extension
    ))
}

/// Format the report's points and write them under `output_dir`
///
/// Returns the path written.
pub fn write_report(
    report: &ExtractionReport,
    output_dir: &Path,
    formatter: &dyn OutputFormatter,
) -> Result<PathBuf> {
    if !output_dir.is_dir() {
        return Err(Error::Config(format!(
            "Output directory {} does not exist",
            output_dir.display()
        )));
    }

    let path = output_path(output_dir, &Local::now(), formatter.extension());
    fs::write(&path, formatter.format(&report.points)?)?;
    info!(path = %path.display(), "wrote pseudo-points");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::csv::CsvFormatter;
    use crate::hex::tests::FixedResolver;
    use crate::hex::{H3Resolver, HexType};
    use crate::rng::pseudo::SeededRandom;
    use crate::sampling::SamplingConfig;
    use chrono::TimeZone;
    use h3o::{LatLng, Resolution};
    use tempfile::TempDir;

    fn rows() -> Vec<HexAnnotation> {
        vec![
            HexAnnotation::new(42, "a", HexType::Presence),
            HexAnnotation::new(7, "b", HexType::Absence),
            HexAnnotation::new(42, "a", HexType::Absence),
        ]
    }

    #[test]
    fn test_run_preserves_row_order() {
        let rng = SeededRandom::new(42);
        let generator = PseudoPointGenerator::new(SamplingConfig::new(SamplingMode::Circle, 7), &rng);
        let resolver = FixedResolver::new(6);

        let report = run(&rows(), &resolver, &generator).unwrap();

        // resolution 6, max 7 => 2 points per row
        assert_eq!(report.points.len(), 6);
        let labels: Vec<(i64, u8)> = report.points.iter().map(|p| (p.taxon_id, p.hex_type)).collect();
        assert_eq!(labels, vec![(42, 1), (42, 1), (7, 0), (7, 0), (42, 0), (42, 0)]);
        assert_eq!(report.rows, 3);
        assert_eq!(report.unique_cells, 2);
        assert_eq!(resolver.calls.get(), 2);
        assert_eq!(report.source, "seeded");
    }

    #[test]
    fn test_run_is_reproducible_with_seed() {
        let config = SamplingConfig::new(SamplingMode::Polygon, 7);
        let resolver = FixedResolver::new(4);

        let first_rng = SeededRandom::new(9);
        let second_rng = SeededRandom::new(9);
        let first = run(&rows(), &resolver, &PseudoPointGenerator::new(config, &first_rng)).unwrap();
        let second = run(&rows(), &resolver, &PseudoPointGenerator::new(config, &second_rng)).unwrap();

        assert_eq!(first.points, second.points);
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_end_to_end_with_h3_cell() {
        let cell = LatLng::new(48.8566, 2.3522)
            .unwrap()
            .to_cell(Resolution::Five)
            .to_string();
        let annotations = vec![HexAnnotation::new(42, cell, HexType::Presence)];
        let rng = SeededRandom::new(1);
        let generator = PseudoPointGenerator::new(SamplingConfig::new(SamplingMode::Circle, 7), &rng);

        let report = run(&annotations, H3Resolver::new(), &generator).unwrap();

        assert_eq!(report.points.len(), 3);
        assert!(report.points.iter().all(|p| p.taxon_id == 42 && p.hex_type == 1));
    }

    #[test]
    fn test_run_fails_fast_on_bad_cell() {
        let rng = SeededRandom::new(1);
        let generator = PseudoPointGenerator::new(SamplingConfig::new(SamplingMode::Circle, 7), &rng);
        let annotations = vec![HexAnnotation::new(1, "zzz", HexType::Presence)];

        assert!(matches!(
            run(&annotations, H3Resolver::new(), &generator),
            Err(Error::Cell(_))
        ));
    }

    #[test]
    fn test_output_path() {
        let ts = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        let path = output_path(Path::new("/data/annotations"), &ts, "csv");
        assert_eq!(
            path,
            PathBuf::from("/data/annotations/2024-03-09 14:05:07.000000.csv")
        );
    }

    #[test]
    fn test_write_report() {
        let temp_dir = TempDir::new().unwrap();
        let rng = SeededRandom::new(42);
        let generator = PseudoPointGenerator::new(SamplingConfig::new(SamplingMode::Circle, 7), &rng);
        let report = run(&rows(), FixedResolver::new(7), &generator).unwrap();

        let path = write_report(&report, temp_dir.path(), &CsvFormatter).unwrap();

        assert!(path.starts_with(temp_dir.path()));
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 4);
        assert!(content.starts_with(",taxon_id,hex_type,latitude,longitude\n0,42,1,"));
    }

    #[test]
    fn test_write_report_missing_dir() {
        let temp_dir = TempDir::new().unwrap();
        let rng = SeededRandom::new(42);
        let generator = PseudoPointGenerator::new(SamplingConfig::new(SamplingMode::Circle, 7), &rng);
        let report = run(&rows(), FixedResolver::new(7), &generator).unwrap();

        let missing = temp_dir.path().join("nope");
        assert!(matches!(
            write_report(&report, &missing, &CsvFormatter),
            Err(Error::Config(_))
        ));
    }
}
