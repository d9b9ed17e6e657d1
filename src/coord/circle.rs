//! Point-in-circle generation
//!
//! Generates random points uniformly distributed within a circle.
//! Uses the sqrt() correction on radius to ensure uniform distribution.

use crate::constants::geo::METERS_PER_DEGREE_LAT;
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::rng::RandomSource;
use std::f64::consts::PI;

/// Generate `count` random points uniformly distributed within a circle
///
/// # Arguments
/// * `center` - Center of the circle
/// * `radius_meters` - Radius in meters
/// * `count` - Number of points to generate
/// * `rng` - Random source
///
/// # Algorithm
/// - r = radius * sqrt(u), u ~ U(0, 1)
/// - theta ~ U(0, 2 * PI)
/// - lat offset = r * sin(theta) / 111320
/// - lng offset = r * cos(theta) / (111320 * cos(lat))
///
/// Without sqrt(), points would cluster toward the center because the
/// probability density would be uniform in radius, but area increases
/// with r^2.
///
/// The offset is a local flat-earth approximation, fine for radii that are
/// small against the Earth. At lat = +/-90 the longitude divisor collapses and
/// the result is meaningless; that case is not guarded.
pub fn points_in_circle(
    center: Coordinates,
    radius_meters: f64,
    count: usize,
    rng: &dyn RandomSource,
) -> Result<Vec<Coordinates>> {
    if !radius_meters.is_finite() || radius_meters < 0.0 {
        return Err(Error::Geometry(format!(
            "Radius {} must be a finite, non-negative number of meters",
            radius_meters
        )));
    }

    let meters_per_deg_lng = METERS_PER_DEGREE_LAT * (center.lat * PI / 180.0).cos();
    let mut points = Vec::with_capacity(count);

    for _ in 0..count {
        let r = radius_meters * rng.float()?.sqrt();
        let theta = rng.uniform(0.0, 2.0 * PI)?;

        let lat = center.lat + r * theta.sin() / METERS_PER_DEGREE_LAT;
        let lng = center.lng + r * theta.cos() / meters_per_deg_lng;

        points.push(Coordinates::new(lat, lng));
    }

    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::geodesic::geodesic_distance;
    use crate::rng::pseudo::SeededRandom;

    #[test]
    fn test_exact_count() {
        let rng = SeededRandom::new(42);
        let center = Coordinates::new(40.7128, -74.0060);
        for count in [1, 2, 8, 100] {
            assert_eq!(points_in_circle(center, 500.0, count, &rng).unwrap().len(), count);
        }
    }

    #[test]
    fn test_points_within_radius() {
        let rng = SeededRandom::new(42);
        for center in [
            Coordinates::new(0.0, 0.0),
            Coordinates::new(40.7128, -74.0060),
            Coordinates::new(-62.5, 150.0),
            Coordinates::new(78.2, 15.6),
        ] {
            let radius = 2000.0;
            let points = points_in_circle(center, radius, 2000, &rng).unwrap();
            for point in &points {
                let distance = geodesic_distance(center, *point);
                assert!(
                    distance <= radius * 1.005,
                    "Point at distance {} exceeds radius {} around {:?}",
                    distance,
                    radius,
                    center
                );
            }
        }
    }

    #[test]
    fn test_mean_distance_matches_uniform_disk() {
        // Uniform disk => E[r] = 2R/3; without the sqrt it would be R/2
        let rng = SeededRandom::new(12345);
        let center = Coordinates::new(0.0, 0.0);
        let radius = 10_000.0;
        let count = 10_000;

        let points = points_in_circle(center, radius, count, &rng).unwrap();
        let mean = points
            .iter()
            .map(|p| geodesic_distance(center, *p))
            .sum::<f64>()
            / count as f64;

        let expected = 2.0 * radius / 3.0;
        assert!(
            (mean - expected).abs() < expected * 0.02,
            "Mean distance {} differs from expected {}",
            mean,
            expected
        );
    }

    #[test]
    fn test_zero_radius_returns_center() {
        let rng = SeededRandom::new(7);
        let center = Coordinates::new(10.0, 20.0);
        let points = points_in_circle(center, 0.0, 3, &rng).unwrap();
        assert!(points.iter().all(|p| *p == center));
    }

    #[test]
    fn test_invalid_radius() {
        let rng = SeededRandom::new(7);
        let center = Coordinates::new(10.0, 20.0);
        assert!(points_in_circle(center, -1.0, 3, &rng).is_err());
        assert!(points_in_circle(center, f64::NAN, 3, &rng).is_err());
    }

    #[test]
    fn test_seeded_repeatable() {
        let center = Coordinates::new(51.5, -0.12);
        let a = points_in_circle(center, 800.0, 50, &SeededRandom::new(99)).unwrap();
        let b = points_in_circle(center, 800.0, 50, &SeededRandom::new(99)).unwrap();
        for (p, q) in a.iter().zip(&b) {
            assert_eq!(p.lat.to_bits(), q.lat.to_bits());
            assert_eq!(p.lng.to_bits(), q.lng.to_bits());
        }
    }
}
