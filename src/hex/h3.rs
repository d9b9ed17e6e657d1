//! H3 cell geometry via `h3o`

use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::hex::{CellResolver, HexGeometry};
use h3o::{CellIndex, LatLng};
use std::str::FromStr;

/// Resolves H3 cell identifiers (hex strings such as `851f9a4bfffffff`)
#[derive(Debug, Default, Clone, Copy)]
pub struct H3Resolver;

impl H3Resolver {
    pub fn new() -> Self {
        Self
    }

    fn parse(hex_index: &str) -> Result<CellIndex> {
        CellIndex::from_str(hex_index.trim())
            .map_err(|e| Error::Cell(format!("{}: {}", hex_index, e)))
    }
}

fn to_coordinates(ll: LatLng) -> Coordinates {
    Coordinates::new(ll.lat(), ll.lng())
}

impl CellResolver for H3Resolver {
    fn resolve(&self, hex_index: &str) -> Result<HexGeometry> {
        let cell = Self::parse(hex_index)?;
        let resolution = u8::from(cell.resolution());
        let center = to_coordinates(LatLng::from(cell));
        let boundary = cell.boundary().iter().copied().map(to_coordinates).collect();

        HexGeometry::new(resolution, center, boundary)
    }
}
