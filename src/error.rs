//! Error types.

use thiserror::Error;

/// Result type alias for color coding operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal errors.  All of them are detected before a canvas is
/// touched.  Regions lacking a measurement are not errors, see
/// [`ColorAssignment::unresolved`](crate::ColorAssignment::unresolved).
#[derive(Error, Debug)]
pub enum Error {
    /// Bad override bounds, bad percentiles, or no usable data.
    #[error("invalid range: {0}")]
    InvalidRange(String),

    /// Empty or malformed lookup table.
    #[error("invalid LUT: {0}")]
    InvalidLut(String),

    /// A configuration value out of its domain.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration could not be parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
