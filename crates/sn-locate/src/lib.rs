//! `sn-locate`: epicenter estimation from the first three detections.
//!
//! # Crate layout
//!
//! | Module            | Contents                                                    |
//! |-------------------|-------------------------------------------------------------|
//! | [`estimator`]     | `estimate_epicenter`, `estimate_radius`, `trilaterate`      |
//! | [`triangulation`] | `Triangulation` lock-once context, `DetectionReport`        |
//! | [`error`]         | `LocateError`, `LocateResult<T>`                            |
//!
//! # Estimation model
//!
//! ```text
//! relSec_i  = t_i - min(t)
//! centroid  = mean(p_i)
//! weighted  = Σ p_i / (1 + relSec_i)  /  Σ 1 / (1 + relSec_i)
//! beta      = min(1, max(relSec) / (max(relSec) + 0.5))
//! epicenter = centroid * (1 - beta) + weighted * beta
//! ```
//!
//! Simultaneous detections carry no timing information (`beta = 0`) and fall
//! back to the plain centroid; a large spread leans on the early detectors.

pub mod error;
pub mod estimator;
pub mod triangulation;

#[cfg(test)]
mod tests;

pub use error::{LocateError, LocateResult};
pub use estimator::{EpicenterFit, estimate_epicenter, estimate_radius, trilaterate};
pub use triangulation::{DetectionReport, Estimate, REPORTS_TO_LOCK, Triangulation};
