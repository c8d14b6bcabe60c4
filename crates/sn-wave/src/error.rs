use thiserror::Error;

/// Rejected wave requests.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum WaveError {
    #[error("magnitude must be finite, got {0}")]
    InvalidMagnitude(f64),

    #[error("pulse duration must be finite and > 0 s, got {0}")]
    InvalidPulse(f64),

    #[error("wave origin must be finite")]
    InvalidOrigin,

    #[error("km-to-px scale must be finite and > 0, got {0}")]
    InvalidScale(f64),
}

pub type WaveResult<T> = Result<T, WaveError>;
