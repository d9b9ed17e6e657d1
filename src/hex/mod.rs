//! Hexagon annotations and cell geometry
//!
//! Annotation rows name an H3 cell and a presence/absence label. A
//! `CellResolver` turns the cell identifier into its resolution, center and
//! boundary; `H3Resolver` does that with `h3o`, and `CachedResolver` keeps
//! each unique cell's geometry for the rest of the run.

pub mod h3;

use crate::constants::label;
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use tracing::debug;

pub use h3::H3Resolver;

/// Whether a species was observed in a cell or confirmed absent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HexType {
    Presence,
    Absence,
}

impl HexType {
    /// Binary training label: presence = 1, absence = 0
    pub fn label(&self) -> u8 {
        match self {
            Self::Presence => label::PRESENCE,
            Self::Absence => label::ABSENCE,
        }
    }
}

impl std::fmt::Display for HexType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Presence => write!(f, "presence"),
            Self::Absence => write!(f, "absence"),
        }
    }
}

impl std::str::FromStr for HexType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "presence" => Ok(Self::Presence),
            "absence" => Ok(Self::Absence),
            _ => Err(format!("Unknown hex type: {}", s)),
        }
    }
}

/// One annotation row: a taxon marked present or absent in an H3 cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HexAnnotation {
    #[serde(alias = "taxa_id")]
    pub taxon_id: i64,
    pub hex_index: String,
    pub hex_type: HexType,
}

impl HexAnnotation {
    pub fn new(taxon_id: i64, hex_index: impl Into<String>, hex_type: HexType) -> Self {
        Self {
            taxon_id,
            hex_index: hex_index.into(),
            hex_type,
        }
    }
}

/// Geometry of a single cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HexGeometry {
    pub resolution: u8,
    pub center: Coordinates,
    /// Ordered vertices of the cell outline (not repeated at the end)
    pub boundary: Vec<Coordinates>,
}

impl HexGeometry {
    /// Build a geometry, rejecting outlines with fewer than 3 vertices
    pub fn new(resolution: u8, center: Coordinates, boundary: Vec<Coordinates>) -> Result<Self> {
        if boundary.len() < 3 {
            return Err(Error::Geometry(format!(
                "cell boundary needs at least 3 vertices, got {}",
                boundary.len()
            )));
        }
        Ok(Self {
            resolution,
            center,
            boundary,
        })
    }
}

/// Resolves a cell identifier to its geometry
pub trait CellResolver {
    fn resolve(&self, hex_index: &str) -> Result<HexGeometry>;
}

impl<R: CellResolver + ?Sized> CellResolver for &R {
    fn resolve(&self, hex_index: &str) -> Result<HexGeometry> {
        (**self).resolve(hex_index)
    }
}

/// Memoizes another resolver so each unique cell is resolved once
pub struct CachedResolver<R> {
    inner: R,
    cache: RefCell<HashMap<String, Rc<HexGeometry>>>,
}

impl<R: CellResolver> CachedResolver<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// Shared geometry for a cell, resolving it on first use
    pub fn get(&self, hex_index: &str) -> Result<Rc<HexGeometry>> {
        if let Some(geometry) = self.cache.borrow().get(hex_index) {
            return Ok(Rc::clone(geometry));
        }

        debug!(hex_index, "resolving cell geometry");
        let geometry = Rc::new(self.inner.resolve(hex_index)?);
        self.cache
            .borrow_mut()
            .insert(hex_index.to_string(), Rc::clone(&geometry));
        Ok(geometry)
    }

    /// Number of distinct cells resolved so far
    pub fn unique_cells(&self) -> usize {
        self.cache.borrow().len()
    }
}

impl<R: CellResolver> CellResolver for CachedResolver<R> {
    fn resolve(&self, hex_index: &str) -> Result<HexGeometry> {
        self.get(hex_index).map(|g| (*g).clone())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::Cell;

    /// Resolver returning one fixed geometry for every cell, counting calls
    pub(crate) struct FixedResolver {
        pub geometry: HexGeometry,
        pub calls: Cell<usize>,
    }

    impl FixedResolver {
        pub(crate) fn new(resolution: u8) -> Self {
            let center = Coordinates::new(45.0, 7.0);
            let boundary = vec![
                Coordinates::new(45.010, 7.000),
                Coordinates::new(45.005, 7.012),
                Coordinates::new(44.995, 7.012),
                Coordinates::new(44.990, 7.000),
                Coordinates::new(44.995, 6.988),
                Coordinates::new(45.005, 6.988),
            ];
            Self {
                geometry: HexGeometry::new(resolution, center, boundary).unwrap(),
                calls: Cell::new(0),
            }
        }
    }

    impl CellResolver for FixedResolver {
        fn resolve(&self, _hex_index: &str) -> Result<HexGeometry> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.geometry.clone())
        }
    }

    #[test]
    fn test_hex_type_parse_and_label() {
        assert_eq!("presence".parse::<HexType>().unwrap(), HexType::Presence);
        assert_eq!("absence".parse::<HexType>().unwrap(), HexType::Absence);
        assert!("maybe".parse::<HexType>().is_err());
        assert_eq!(HexType::Presence.label(), 1);
        assert_eq!(HexType::Absence.label(), 0);
        assert_eq!(HexType::Absence.to_string(), "absence");
    }

    #[test]
    fn test_annotation_accepts_taxa_id_alias() {
        let row: HexAnnotation = serde_json::from_str(
            r#"{"taxa_id": 42, "hex_index": "851f9a4bfffffff", "hex_type": "presence"}"#,
        )
        .unwrap();
        assert_eq!(row, HexAnnotation::new(42, "851f9a4bfffffff", HexType::Presence));
    }

    #[test]
    fn test_geometry_requires_three_vertices() {
        let center = Coordinates::new(0.0, 0.0);
        let boundary = vec![Coordinates::new(0.1, 0.0), Coordinates::new(0.0, 0.1)];
        assert!(HexGeometry::new(3, center, boundary).is_err());
    }

    #[test]
    fn test_cached_resolver_resolves_once() {
        let cached = CachedResolver::new(FixedResolver::new(5));
        for _ in 0..4 {
            cached.get("a").unwrap();
        }
        cached.get("b").unwrap();

        assert_eq!(cached.inner.calls.get(), 2);
        assert_eq!(cached.unique_cells(), 2);
    }
}
