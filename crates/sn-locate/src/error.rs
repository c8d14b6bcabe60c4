use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum LocateError {
    /// The detectors are collinear (or coincide) so the linear system has no
    /// unique solution.
    #[error("degenerate detector geometry (determinant {determinant:e})")]
    Degenerate { determinant: f64 },

    /// The arrival times admit no source at a non-negative range from the
    /// earliest detector.
    #[error("detection times are inconsistent with a single source")]
    Inconsistent,

    #[error("need {need} detection reports, got {got}")]
    Incomplete { got: usize, need: usize },
}

pub type LocateResult<T> = Result<T, LocateError>;
