//! Centralized constants for the pseudo-points crate

/// Geographic constants
pub mod geo {
    /// Meters per degree of latitude at the equator
    pub const METERS_PER_DEGREE_LAT: f64 = 111_320.0;
}

/// Binary labels written for each hex type
pub mod label {
    pub const PRESENCE: u8 = 1;
    pub const ABSENCE: u8 = 0;
}
