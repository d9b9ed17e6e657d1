//! Coordinate geometry
//!
//! This module handles:
//! - Geodesic distances on the WGS84 ellipsoid and the inscribed sampling radius
//! - Uniform point sampling inside a circle (closed form)
//! - Uniform point sampling inside a polygon (rejection)

pub mod circle;
pub mod geodesic;
pub mod polygon;

use serde::{Deserialize, Serialize};

/// A geographic coordinate (latitude, longitude) in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Create new coordinates
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Validate that coordinates are within valid ranges
    ///
    /// Latitude: -90 to 90
    /// Longitude: -180 to 180
    pub fn validate(&self) -> crate::error::Result<()> {
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(crate::error::Error::InvalidCoordinates(format!(
                "Latitude {} is out of range [-90, 90]",
                self.lat
            )));
        }
        if !(-180.0..=180.0).contains(&self.lng) {
            return Err(crate::error::Error::InvalidCoordinates(format!(
                "Longitude {} is out of range [-180, 180]",
                self.lng
            )));
        }
        Ok(())
    }
}

impl From<(f64, f64)> for Coordinates {
    /// From a `(lat, lng)` pair
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_ranges() {
        assert!(Coordinates::new(40.7128, -74.0060).validate().is_ok());
        assert!(Coordinates::new(90.0, 180.0).validate().is_ok());
        assert!(Coordinates::new(90.5, 0.0).validate().is_err());
        assert!(Coordinates::new(0.0, -180.1).validate().is_err());
        assert!(Coordinates::new(f64::NAN, 0.0).validate().is_err());
    }

    #[test]
    fn test_from_tuple_is_lat_lng() {
        let c = Coordinates::from((12.5, -3.0));
        assert_eq!(c.lat, 12.5);
        assert_eq!(c.lng, -3.0);
    }
}
