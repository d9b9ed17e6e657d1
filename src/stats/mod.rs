//! Sampler quality checks
//!
//! Circle sampling should give radial offsets with density `f(r) = 2r/R^2`,
//! i.e. CDF `F(r) = r^2/R^2`. The Kolmogorov-Smirnov statistic measures how far
//! the empirical distribution strays from that curve.

use crate::constants::geo::METERS_PER_DEGREE_LAT;
use crate::coord::circle::points_in_circle;
use crate::coord::geodesic::geodesic_distance;
use crate::coord::polygon::{is_in_polygon, sample_polygon};
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::rng::RandomSource;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// p-value below which a check is reported as failed
pub const PASS_THRESHOLD: f64 = 0.01;

/// Result of checking the circle sampler
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CircleCheck {
    pub samples: usize,
    pub radius: f64,
    /// KS statistic against F(r) = r^2/R^2
    pub ks_statistic: f64,
    /// Asymptotic p-value for the KS statistic
    pub p_value: f64,
    /// Largest geodesic distance from the center, as a fraction of the radius
    pub max_distance_ratio: f64,
}

impl CircleCheck {
    pub fn passed(&self) -> bool {
        self.p_value >= PASS_THRESHOLD
    }
}

/// Result of checking the polygon sampler
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolygonCheck {
    pub samples: usize,
    pub attempts: u64,
    pub acceptance_rate: f64,
    pub all_inside: bool,
}

/// Radial offset of `point` from `center` in the sampler's local plane
///
/// Inverts the degree conversion used by the circle sampler, so it recovers
/// the drawn `r` exactly (up to rounding).
pub fn local_offset_meters(center: Coordinates, point: Coordinates) -> f64 {
    let dy = (point.lat - center.lat) * METERS_PER_DEGREE_LAT;
    let dx = (point.lng - center.lng) * METERS_PER_DEGREE_LAT * (center.lat * PI / 180.0).cos();
    dx.hypot(dy)
}

/// One-sample KS statistic `D = sup |F_n(x) - F(x)|`
pub fn ks_statistic(samples: &[f64], cdf: impl Fn(f64) -> f64) -> f64 {
    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let n = sorted.len() as f64;

    sorted
        .iter()
        .enumerate()
        .map(|(i, &x)| {
            let f = cdf(x);
            let above = (i + 1) as f64 / n - f;
            let below = f - i as f64 / n;
            above.max(below)
        })
        .fold(0.0, f64::max)
}

/// Asymptotic p-value of a KS statistic for `n` samples
///
/// Uses the Kolmogorov series with Stephens' small-sample correction.
pub fn ks_p_value(d: f64, n: usize) -> f64 {
    if n == 0 {
        return 0.0;
    }
    let sqrt_n = (n as f64).sqrt();
    let lambda = (sqrt_n + 0.12 + 0.11 / sqrt_n) * d;
    if lambda < 1e-3 {
        return 1.0;
    }

    let mut sum = 0.0;
    let mut sign = 1.0;
    for j in 1..=100 {
        let term = sign * (-2.0 * (j as f64).powi(2) * lambda * lambda).exp();
        sum += term;
        if term.abs() < 1e-12 {
            break;
        }
        sign = -sign;
    }

    (2.0 * sum).clamp(0.0, 1.0)
}

/// Sample a circle and test the radial distribution
pub fn check_circle(
    center: Coordinates,
    radius: f64,
    samples: usize,
    rng: &dyn RandomSource,
) -> Result<CircleCheck> {
    if samples == 0 {
        return Err(Error::Config("check needs at least one sample".to_string()));
    }
    if !(radius > 0.0) {
        return Err(Error::Geometry(format!("Radius {} must be positive", radius)));
    }
    center.validate()?;

    let points = points_in_circle(center, radius, samples, rng)?;
    let offsets: Vec<f64> = points
        .iter()
        .map(|p| local_offset_meters(center, *p))
        .collect();
    let max_distance = points
        .iter()
        .map(|p| geodesic_distance(center, *p))
        .fold(0.0, f64::max);

    let r2 = radius * radius;
    let d = ks_statistic(&offsets, |r| (r * r / r2).min(1.0));

    Ok(CircleCheck {
        samples,
        radius,
        ks_statistic: d,
        p_value: ks_p_value(d, samples),
        max_distance_ratio: max_distance / radius,
    })
}

/// Sample a polygon and report acceptance and containment
pub fn check_polygon(
    boundary: &[Coordinates],
    samples: usize,
    rng: &dyn RandomSource,
) -> Result<PolygonCheck> {
    if samples == 0 {
        return Err(Error::Config("check needs at least one sample".to_string()));
    }
    let (points, stats) = sample_polygon(boundary, samples, rng)?;
    let mut all_inside = true;
    for p in &points {
        all_inside &= is_in_polygon(*p, boundary)?;
    }

    Ok(PolygonCheck {
        samples: stats.accepted,
        attempts: stats.attempts,
        acceptance_rate: stats.acceptance_rate(),
        all_inside,
    })
}
