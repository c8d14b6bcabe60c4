//! Simulation time model.
//!
//! # Design
//!
//! The simulation is frame-driven: each animation frame supplies a wall-clock
//! delta `dt` in seconds.  Two counters are kept in `SimClock`:
//!
//! - `current_tick`: an integer frame counter, exact and cheap to compare.
//! - `elapsed_secs`: the sum of every accepted `dt`, used as the detection
//!   timestamp fed to the epicentre estimator.
//!
//! Every `dt` passes through [`sanitize_dt`] first, so a negative, `NaN` or
//! absurdly large delta (e.g. the first frame after a tab was hidden) can
//! never reach the finite-difference derivatives.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation frame counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── dt sanitising ─────────────────────────────────────────────────────────────

/// Clamp a raw frame delta into `[0, max_dt]`.
///
/// Non-finite and negative inputs become `0.0`; a zero `dt` makes every
/// consumer skip its derivative update for that frame.
#[inline]
pub fn sanitize_dt(dt: f64, max_dt: f64) -> f64 {
    if !dt.is_finite() || dt <= 0.0 {
        return 0.0;
    }
    dt.min(max_dt)
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Frame counter plus accumulated simulated seconds.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// The current frame, advanced once per `Sim::step`.
    pub current_tick: Tick,
    /// Sum of all accepted frame deltas, in seconds.
    pub elapsed_secs: f64,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by one frame of `dt` seconds.  `dt` must already be sanitised.
    #[inline]
    pub fn advance(&mut self, dt: f64) {
        self.current_tick = Tick(self.current_tick.0 + 1);
        self.elapsed_secs += dt;
    }

    /// Simulated seconds since the clock was created or last reset.
    #[inline]
    pub fn now(&self) -> f64 {
        self.elapsed_secs
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.3} s)", self.current_tick, self.elapsed_secs)
    }
}

// ── FrameClock ────────────────────────────────────────────────────────────────

/// Turns absolute frame timestamps (milliseconds, as delivered by an
/// animation-frame callback) into sanitised deltas in seconds.
///
/// The first frame has no predecessor and yields `0.0`.
#[derive(Clone, Debug)]
pub struct FrameClock {
    last_ms: Option<f64>,
    max_dt:  f64,
}

impl FrameClock {
    pub fn new(max_dt: f64) -> Self {
        Self { last_ms: None, max_dt }
    }

    /// Record a frame at `timestamp_ms` and return the delta since the
    /// previous frame, in seconds.
    pub fn frame(&mut self, timestamp_ms: f64) -> f64 {
        let dt = match self.last_ms {
            None       => 0.0,
            Some(last) => (timestamp_ms - last) / 1000.0,
        };
        if timestamp_ms.is_finite() {
            self.last_ms = Some(timestamp_ms);
        }
        sanitize_dt(dt, self.max_dt)
    }

    /// Forget the previous timestamp so the next frame yields `0.0`.
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}
