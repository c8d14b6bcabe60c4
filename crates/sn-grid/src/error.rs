//! Grid-subsystem error type.

use thiserror::Error;

/// Errors produced by `sn-grid`.  All of them are configuration errors: a
/// failed build never yields a partially populated grid.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GridError {
    #[error("node spacing must be finite and > 0 px, got {0}")]
    InvalidSpacing(f64),

    #[error("viewport must be finite and positive, got {width}x{height}")]
    InvalidViewport { width: f64, height: f64 },

    #[error("margin {0} px is negative or leaves no room inside the viewport")]
    InvalidMargin(f64),

    #[error("spacing yields an axial radius of {radius}, above the limit of {limit}")]
    TooDense { radius: i64, limit: i64 },

    #[error("malformed axial key {0:?}, expected \"q,r\"")]
    MalformedKey(String),
}

pub type GridResult<T> = Result<T, GridError>;
