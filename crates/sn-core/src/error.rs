//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `SnError` as one variant
//! via `#[from]`, so a configuration failure raised here surfaces unchanged
//! from `sn-grid` or `sn-sim`.

use thiserror::Error;

use crate::{NodeId, WaveId};

/// The top-level error type for `sn-core` and a common base for sub-crates.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SnError {
    /// Non-positive spacing/scale, malformed viewport bounds, and similar
    /// caller contract violations.
    #[error("configuration error: {0}")]
    Config(String),

    #[error("node {0} not found")]
    NodeNotFound(NodeId),

    #[error("wave {0} not found")]
    WaveNotFound(WaveId),
}

/// Shorthand result type for all `sn-*` crates.
pub type SnResult<T> = Result<T, SnError>;
