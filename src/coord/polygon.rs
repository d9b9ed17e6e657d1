//! Point-in-polygon generation
//!
//! Rejection sampling: draw uniformly inside the polygon's bounding box and
//! keep only draws that fall strictly inside the polygon. There is no cap on
//! attempts. The polygon is treated as planar in (lat, lng) degrees and is
//! assumed not to straddle the antimeridian.

use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::rng::RandomSource;
use geo::{Area, BoundingRect, Contains, Coord, LineString, Point, Polygon};
use tracing::{debug, warn};

/// Attempt count at which a slow rejection loop is reported (once)
const SLOW_REJECTION_ATTEMPTS: u64 = 1_000_000;

/// Counters from a rejection sampling run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RejectionStats {
    pub accepted: usize,
    pub attempts: u64,
}

impl RejectionStats {
    /// Fraction of draws that landed inside the polygon
    pub fn acceptance_rate(&self) -> f64 {
        if self.attempts == 0 {
            return 0.0;
        }
        self.accepted as f64 / self.attempts as f64
    }
}

/// Build a `geo` polygon from ordered boundary vertices
///
/// Fails for fewer than 3 vertices or a ring enclosing no area, both of which
/// would make the rejection loop spin forever.
pub fn boundary_polygon(boundary: &[Coordinates]) -> Result<Polygon<f64>> {
    if boundary.len() < 3 {
        return Err(Error::Geometry(format!(
            "boundary needs at least 3 vertices, got {}",
            boundary.len()
        )));
    }

    let ring: LineString<f64> = boundary
        .iter()
        .map(|c| Coord { x: c.lng, y: c.lat })
        .collect();
    let polygon = Polygon::new(ring, vec![]);

    let area = polygon.unsigned_area();
    if !(area > 0.0) {
        return Err(Error::Geometry(format!(
            "boundary with {} vertices encloses no area",
            boundary.len()
        )));
    }

    Ok(polygon)
}

/// Generate `count` points uniformly distributed inside the polygon
pub fn points_in_polygon(
    boundary: &[Coordinates],
    count: usize,
    rng: &dyn RandomSource,
) -> Result<Vec<Coordinates>> {
    sample_polygon(boundary, count, rng).map(|(points, _)| points)
}

/// Rejection sampler returning the accepted points and the draw counters
pub fn sample_polygon(
    boundary: &[Coordinates],
    count: usize,
    rng: &dyn RandomSource,
) -> Result<(Vec<Coordinates>, RejectionStats)> {
    let polygon = boundary_polygon(boundary)?;
    let bounds = polygon
        .bounding_rect()
        .ok_or_else(|| Error::Geometry("boundary has no bounding box".to_string()))?;
    let (min, max) = (bounds.min(), bounds.max());

    let mut points = Vec::with_capacity(count);
    let mut attempts: u64 = 0;

    while points.len() < count {
        attempts += 1;
        if attempts == SLOW_REJECTION_ATTEMPTS {
            warn!(
                attempts,
                accepted = points.len(),
                wanted = count,
                "rejection sampling is slow; boundary may be nearly degenerate"
            );
        }

        let lat = rng.uniform(min.y, max.y)?;
        let lng = rng.uniform(min.x, max.x)?;

        if polygon.contains(&Point::new(lng, lat)) {
            points.push(Coordinates::new(lat, lng));
        }
    }

    let stats = RejectionStats {
        accepted: points.len(),
        attempts,
    };
    debug!(
        accepted = stats.accepted,
        attempts = stats.attempts,
        "polygon rejection sampling finished"
    );

    Ok((points, stats))
}

/// Check if a point is strictly inside the boundary polygon
pub fn is_in_polygon(point: Coordinates, boundary: &[Coordinates]) -> Result<bool> {
    let polygon = boundary_polygon(boundary)?;
    Ok(polygon.contains(&Point::new(point.lng, point.lat)))
}
