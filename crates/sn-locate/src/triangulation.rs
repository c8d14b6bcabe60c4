//! The per-wave lock-once estimation context.

use tracing::{debug, warn};

use sn_core::{NodeId, Point};

use crate::{LocateError, estimate_epicenter, estimate_radius, trilaterate};

/// Reports collected before a context locks.
pub const REPORTS_TO_LOCK: usize = 3;

/// One detector's first contact with a wave.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DetectionReport {
    pub node:          NodeId,
    pub position:      Point,
    /// Simulated seconds at which the node entered `detected`.
    pub detected_at:   f64,
    /// Front velocity observed at the detector (PGV, km/s), if known.
    pub velocity_km_s: Option<f64>,
    /// Front acceleration observed at the detector (PGA, km/s²), if known.
    pub accel_km_s2:   Option<f64>,
}

/// The locked estimate.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Estimate {
    pub epicenter: Point,
    /// `None` when the radius stage could not produce a finite value.
    pub radius_px: Option<f64>,
    pub beta:      f64,
}

/// Collects up to three detection reports for one wave and, on the third,
/// computes an epicentre and extent estimate exactly once.
///
/// Once locked the context rejects every further report and never
/// recomputes.
#[derive(Clone, Debug)]
pub struct Triangulation {
    reports:  Vec<DetectionReport>,
    locked:   bool,
    estimate: Option<Estimate>,
    km_to_px: f64,
}

impl Triangulation {
    /// `km_to_px` converts the radius stage back to pixels.
    pub fn new(km_to_px: f64) -> Self {
        Self {
            reports: Vec::with_capacity(REPORTS_TO_LOCK),
            locked: false,
            estimate: None,
            km_to_px,
        }
    }

    /// Offer a report.  Returns `false` (and changes nothing) once locked or
    /// when the node already reported.
    pub fn add_report(&mut self, report: DetectionReport) -> bool {
        if self.locked || self.reports.iter().any(|r| r.node == report.node) {
            return false;
        }
        self.reports.push(report);

        if self.reports.len() == REPORTS_TO_LOCK {
            self.locked = true;
            self.estimate = self.compute();
        }
        true
    }

    fn compute(&self) -> Option<Estimate> {
        let fit = match estimate_epicenter(&self.reports) {
            Ok(fit) => fit,
            Err(e) => {
                warn!(error = %e, "epicenter estimate unavailable");
                return None;
            }
        };
        let radius_px = estimate_radius(&self.reports, fit.epicenter, self.km_to_px);
        debug!(epicenter = %fit.epicenter, beta = fit.beta, ?radius_px, "triangulation locked");
        Some(Estimate { epicenter: fit.epicenter, radius_px, beta: fit.beta })
    }

    /// Trilaterate from the collected reports as an independent check of the
    /// weighted-centroid estimate.  `None` before lock, for collinear
    /// detectors, or when the timings fit no single source.
    pub fn cross_check(&self, speed_px_per_s: f64) -> Option<Point> {
        if !self.locked {
            return None;
        }
        match trilaterate(&self.reports, speed_px_per_s) {
            Ok(p) => Some(p),
            Err(e @ LocateError::Degenerate { .. }) => {
                warn!(error = %e, "trilateration cross-check unavailable");
                None
            }
            Err(e) => {
                debug!(error = %e, "trilateration cross-check unavailable");
                None
            }
        }
    }

    #[inline]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn reports(&self) -> &[DetectionReport] {
        &self.reports
    }

    pub fn estimate(&self) -> Option<&Estimate> {
        self.estimate.as_ref()
    }

    pub fn estimated_epicenter(&self) -> Option<Point> {
        self.estimate.map(|e| e.epicenter)
    }

    pub fn estimated_radius(&self) -> Option<f64> {
        self.estimate.and_then(|e| e.radius_px)
    }
}
