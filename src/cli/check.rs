//! Check command handler
//!
//! Runs the samplers with many draws and reports how well the output matches
//! the distribution it should have.

use crate::config::defaults::DEFAULT_CHECK_SAMPLES;
use crate::coord::geodesic::sampling_radius;
use crate::coord::Coordinates;
use crate::error::Result;
use crate::hex::{CellResolver, H3Resolver};
use crate::rng::get_source;
use crate::stats::{check_circle, check_polygon, PASS_THRESHOLD};
use clap::Args;

/// Check command arguments
#[derive(Args)]
pub struct CheckArgs {
    /// Center latitude for the circle check
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub lat: f64,

    /// Center longitude for the circle check
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub lng: f64,

    /// Circle radius in meters
    #[arg(long, short = 'r', default_value_t = 1000.0)]
    pub radius: f64,

    /// H3 cell to check instead of a fixed circle (checks both samplers)
    #[arg(long, conflicts_with_all = ["lat", "lng", "radius"])]
    pub cell: Option<String>,

    /// Number of draws
    #[arg(long, short = 'n', default_value_t = DEFAULT_CHECK_SAMPLES)]
    pub samples: usize,

    /// Seed for reproducible checks
    #[arg(long, short = 's')]
    pub seed: Option<u64>,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the check command
pub fn run(args: CheckArgs) -> Result<()> {
    super::init_logging();
    let rng = get_source(args.seed);

    let (center, radius, polygon) = match &args.cell {
        Some(cell) => {
            let geometry = H3Resolver::new().resolve(cell)?;
            let radius = sampling_radius(geometry.center, &geometry.boundary)?;
            let polygon = check_polygon(&geometry.boundary, args.samples, rng.as_ref())?;
            (geometry.center, radius, Some(polygon))
        }
        None => (Coordinates::new(args.lat, args.lng), args.radius, None),
    };

    let circle = check_circle(center, radius, args.samples, rng.as_ref())?;

    if args.json {
        let output = serde_json::json!({
            "source": rng.name(),
            "center": center,
            "circle": circle,
            "polygon": polygon,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Sampler check ({}: {})", rng.name(), rng.description());
    println!("Center: ({:.6}, {:.6})", center.lat, center.lng);
    println!("Radius: {:.1}m\n", radius);

    println!("Circle:");
    println!("  Samples: {}", circle.samples);
    println!("  KS statistic: {:.5}", circle.ks_statistic);
    println!(
        "  p-value: {:.4} ({})",
        circle.p_value,
        if circle.passed() { "pass" } else { "FAIL" }
    );
    println!("  Max distance / radius: {:.5}", circle.max_distance_ratio);

    if let Some(polygon) = polygon {
        println!("\nPolygon:");
        println!("  Samples: {}", polygon.samples);
        println!("  Attempts: {}", polygon.attempts);
        println!("  Acceptance rate: {:.3}", polygon.acceptance_rate);
        println!("  All inside: {}", polygon.all_inside);
    }

    println!("\nPass threshold: p >= {}", PASS_THRESHOLD);
    Ok(())
}
