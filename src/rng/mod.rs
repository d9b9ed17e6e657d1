//! Random sources for the samplers
//!
//! Samplers never reach for process-global randomness: every draw goes through
//! a `RandomSource` passed in by the caller, so a seeded source reproduces an
//! extraction run bit-for-bit.

pub mod pseudo;

use crate::error::Result;

/// Trait for random number sources used by the samplers
///
/// Implementations must be thread-safe (Send + Sync).
pub trait RandomSource: Send + Sync {
    /// Returns the source name (e.g., "pseudo", "seeded")
    fn name(&self) -> &'static str;

    /// Returns a human-readable description of this source
    fn description(&self) -> &'static str;

    /// Generate a single random float uniformly distributed in [0.0, 1.0)
    fn float(&self) -> Result<f64>;

    /// Draw a float uniformly distributed in [low, high)
    fn uniform(&self, low: f64, high: f64) -> Result<f64> {
        Ok(low + (high - low) * self.float()?)
    }
}

/// Get a random source: seeded when a seed is given, thread-local otherwise
pub fn get_source(seed: Option<u64>) -> Box<dyn RandomSource> {
    match seed {
        Some(seed) => Box::new(pseudo::SeededRandom::new(seed)),
        None => Box::new(pseudo::PseudoRandom::new()),
    }
}
