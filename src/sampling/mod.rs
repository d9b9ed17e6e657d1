//! Pseudo-point generation
//!
//! Turns one annotation row plus its cell geometry into `N` labelled points,
//! where coarser cells receive more samples:
//!
//! `N = max(max_amount - resolution, 0) + 1`

use crate::coord::geodesic::sampling_radius;
use crate::coord::{circle, polygon, Coordinates};
use crate::error::{Error, Result};
use crate::hex::{HexAnnotation, HexGeometry};
use crate::rng::RandomSource;
use serde::{Deserialize, Serialize};

/// Which sampler produces the points for a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplingMode {
    /// Rejection sampling inside the cell outline
    Polygon,
    /// Closed-form sampling inside the inscribed circle
    Circle,
}

impl Default for SamplingMode {
    fn default() -> Self {
        Self::Circle
    }
}

impl std::fmt::Display for SamplingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Polygon => write!(f, "polygon"),
            Self::Circle => write!(f, "circle"),
        }
    }
}

impl std::str::FromStr for SamplingMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "polygon" => Ok(Self::Polygon),
            "circle" => Ok(Self::Circle),
            _ => Err(format!("Unknown sampling mode: {}", s)),
        }
    }
}

/// Validated sampling parameters, fixed for one extraction run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamplingConfig {
    pub mode: SamplingMode,
    pub max_resolution_amount: u8,
}

impl SamplingConfig {
    pub fn new(mode: SamplingMode, max_resolution_amount: u8) -> Self {
        Self {
            mode,
            max_resolution_amount,
        }
    }

    /// Build from raw configuration values, rejecting unknown modes and
    /// amounts outside `0..=15` (the H3 resolution range)
    pub fn parse(mode: &str, max_amount: i64) -> Result<Self> {
        let mode = mode.parse::<SamplingMode>().map_err(Error::Config)?;
        let max_resolution_amount = u8::try_from(max_amount)
            .ok()
            .filter(|amount| *amount <= MAX_H3_RESOLUTION)
            .ok_or_else(|| {
                Error::Config(format!(
                    "max_amount {} must be between 0 and {}",
                    max_amount, MAX_H3_RESOLUTION
                ))
            })?;
        Ok(Self::new(mode, max_resolution_amount))
    }

    /// Number of points to draw for a cell at `resolution`
    pub fn sample_count(&self, resolution: u8) -> usize {
        sample_count(self.max_resolution_amount, resolution)
    }
}

/// Finest H3 resolution
pub const MAX_H3_RESOLUTION: u8 = 15;

/// `max(max_amount - resolution, 0) + 1`; never less than one
pub fn sample_count(max_amount: u8, resolution: u8) -> usize {
    max_amount.saturating_sub(resolution) as usize + 1
}

/// A labelled training point sampled from an annotated cell
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PseudoPoint {
    pub taxon_id: i64,
    /// 1 = presence, 0 = absence
    pub hex_type: u8,
    pub latitude: f64,
    pub longitude: f64,
}

impl PseudoPoint {
    pub fn new(annotation: &HexAnnotation, coords: Coordinates) -> Self {
        Self {
            taxon_id: annotation.taxon_id,
            hex_type: annotation.hex_type.label(),
            latitude: coords.lat,
            longitude: coords.lng,
        }
    }
}

/// Generates pseudo-points for annotation rows with an injected random source
pub struct PseudoPointGenerator<'a> {
    config: SamplingConfig,
    rng: &'a dyn RandomSource,
}

impl<'a> PseudoPointGenerator<'a> {
    pub fn new(config: SamplingConfig, rng: &'a dyn RandomSource) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &SamplingConfig {
        &self.config
    }

    /// Name of the random source in use
    pub fn source_name(&self) -> &'static str {
        self.rng.name()
    }

    /// Sample coordinates for a cell with the configured sampler
    pub fn sample(&self, geometry: &HexGeometry) -> Result<Vec<Coordinates>> {
        let count = self.config.sample_count(geometry.resolution);

        match self.config.mode {
            SamplingMode::Polygon => polygon::points_in_polygon(&geometry.boundary, count, self.rng),
            SamplingMode::Circle => {
                let radius = sampling_radius(geometry.center, &geometry.boundary)?;
                circle::points_in_circle(geometry.center, radius, count, self.rng)
            }
        }
    }

    /// Labelled points for one annotation row
    pub fn generate(
        &self,
        annotation: &HexAnnotation,
        geometry: &HexGeometry,
    ) -> Result<Vec<PseudoPoint>> {
        Ok(self
            .sample(geometry)?
            .into_iter()
            .map(|coords| PseudoPoint::new(annotation, coords))
            .collect())
    }
}
