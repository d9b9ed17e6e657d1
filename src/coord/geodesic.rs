//! Ellipsoidal distances
//!
//! Distances solve the inverse geodesic problem on WGS84 (Karney's algorithm
//! via `geographiclib-rs`). Exactly antipodal inputs are not special-cased.

use crate::coord::Coordinates;
use crate::error::{Error, Result};
use geographiclib_rs::{Geodesic, InverseGeodesic};
use std::sync::OnceLock;

fn wgs84() -> &'static Geodesic {
    static WGS84: OnceLock<Geodesic> = OnceLock::new();
    WGS84.get_or_init(Geodesic::wgs84)
}

/// Surface distance in meters between two points along the WGS84 ellipsoid
pub fn geodesic_distance(p1: Coordinates, p2: Coordinates) -> f64 {
    let s12: f64 = wgs84().inverse(p1.lat, p1.lng, p2.lat, p2.lng);
    s12
}

/// Radius of the sampling circle for a cell
///
/// The minimum geodesic distance from `center` to any boundary vertex, so the
/// circle never reaches past a vertex. Near edge midpoints it under-covers the
/// cell; that is the accepted trade-off.
pub fn sampling_radius(center: Coordinates, boundary: &[Coordinates]) -> Result<f64> {
    if boundary.len() < 3 {
        return Err(Error::Geometry(format!(
            "boundary needs at least 3 vertices, got {}",
            boundary.len()
        )));
    }

    let radius = boundary
        .iter()
        .map(|vertex| geodesic_distance(center, *vertex))
        .fold(f64::INFINITY, f64::min);

    if !radius.is_finite() {
        return Err(Error::Geometry(format!(
            "sampling radius is not finite for center ({}, {})",
            center.lat, center.lng
        )));
    }

    Ok(radius)
}

/// Check if a point lies within `radius_meters` of `center`
pub fn is_in_circle(point: Coordinates, center: Coordinates, radius_meters: f64) -> bool {
    geodesic_distance(point, center) <= radius_meters
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_equator_degree_of_longitude() {
        let d = geodesic_distance(Coordinates::new(0.0, 0.0), Coordinates::new(0.0, 1.0));
        // Equatorial radius 6378137 m => 2*pi*a/360
        assert_relative_eq!(d, 111_319.490_793, epsilon = 1e-3);
    }

    #[test]
    fn test_meridian_degree_differs_from_sphere() {
        // One degree of latitude at the equator is shorter than at the pole on WGS84
        let equator = geodesic_distance(Coordinates::new(0.0, 10.0), Coordinates::new(1.0, 10.0));
        let polar = geodesic_distance(Coordinates::new(88.0, 10.0), Coordinates::new(89.0, 10.0));
        assert_relative_eq!(equator, 110_574.0, epsilon = 5.0);
        assert_relative_eq!(polar, 111_692.0, epsilon = 5.0);
    }

    #[test]
    fn test_distance_symmetric_and_zero() {
        let a = Coordinates::new(37.7749, -122.4194);
        let b = Coordinates::new(34.0522, -118.2437);
        assert_relative_eq!(geodesic_distance(a, b), geodesic_distance(b, a), epsilon = 1e-6);
        assert_eq!(geodesic_distance(a, a), 0.0);
    }

    #[test]
    fn test_sampling_radius_is_minimum() {
        let center = Coordinates::new(0.0, 0.0);
        let boundary = vec![
            Coordinates::new(0.01, 0.0),
            Coordinates::new(0.0, 0.02),
            Coordinates::new(-0.03, 0.0),
            Coordinates::new(0.0, -0.015),
        ];
        let distances: Vec<f64> = boundary
            .iter()
            .map(|v| geodesic_distance(center, *v))
            .collect();
        let max = distances.iter().cloned().fold(f64::MIN, f64::max);
        let mean = distances.iter().sum::<f64>() / distances.len() as f64;

        let radius = sampling_radius(center, &boundary).unwrap();

        assert_eq!(radius, distances[0]);
        assert!(radius < mean);
        assert!(radius < max);
    }

    #[test]
    fn test_sampling_radius_rejects_short_boundary() {
        let center = Coordinates::new(0.0, 0.0);
        let boundary = vec![Coordinates::new(0.01, 0.0), Coordinates::new(0.0, 0.01)];
        assert!(matches!(
            sampling_radius(center, &boundary),
            Err(Error::Geometry(_))
        ));
    }

    #[test]
    fn test_is_in_circle() {
        let center = Coordinates::new(40.7128, -74.0060);
        assert!(is_in_circle(center, center, 1000.0));
        assert!(is_in_circle(Coordinates::new(40.7168, -74.0060), center, 1000.0));
        assert!(!is_in_circle(Coordinates::new(40.7328, -74.0060), center, 1000.0));
    }
}
