//! Error types for pseudo-points

use thiserror::Error;

/// Main error type for pseudo-point extraction
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Geometry error: {0}")]
    Geometry(String),

    #[error("Invalid H3 cell: {0}")]
    Cell(String),

    #[error("Annotation error: {0}")]
    Annotation(String),

    #[error("Random source error: {0}")]
    Random(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for pseudo-points operations
pub type Result<T> = std::result::Result<T, Error>;
