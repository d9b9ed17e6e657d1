//! pseudo-points: training points from H3 hexagon annotations
//!
//! Species presence/absence is annotated per H3 cell. A point-based species
//! distribution model needs point locations instead, so each annotated cell is
//! replaced by a handful of random points drawn inside it.
//!
//! ## Features
//!
//! - WGS84 geodesic distances and inscribed sampling radius per cell
//! - Uniform point-in-circle sampling with sqrt correction
//! - Uniform point-in-polygon rejection sampling
//! - More samples for coarser cells: `max(max_amount - resolution, 0) + 1`
//! - Seedable random sources for reproducible runs
//!
//! ## Quick Start
//!
//! ```rust
//! use pseudo_points::hex::{H3Resolver, HexAnnotation, HexType};
//! use pseudo_points::rng::pseudo::SeededRandom;
//! use pseudo_points::sampling::{PseudoPointGenerator, SamplingConfig, SamplingMode};
//!
//! let rng = SeededRandom::new(42);
//! let generator = PseudoPointGenerator::new(SamplingConfig::new(SamplingMode::Circle, 7), &rng);
//! let rows = vec![HexAnnotation::new(42, "851f9a4bfffffff", HexType::Presence)];
//!
//! let report = pseudo_points::pipeline::run(&rows, H3Resolver::new(), &generator).unwrap();
//! assert_eq!(report.points.len(), 3);
//! ```

pub mod annotations;
pub mod cli;
pub mod config;
pub mod constants;
pub mod coord;
pub mod error;
pub mod format;
pub mod hex;
pub mod pipeline;
pub mod rng;
pub mod sampling;
pub mod stats;

// Re-export commonly used types
pub use config::Config;
pub use coord::Coordinates;
pub use error::{Error, Result};
pub use hex::{HexAnnotation, HexGeometry, HexType};
pub use sampling::{PseudoPoint, SamplingConfig, SamplingMode};
