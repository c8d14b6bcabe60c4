//! One disturbance event: an expanding front that starts as a filled disk
//! and turns into a ring of fixed thickness once it outgrows it.

use std::collections::HashMap;

use tracing::trace;

use sn_core::{NodeId, Point, WaveId, WaveRng};
use sn_grid::HexGrid;
use sn_locate::Triangulation;

use crate::laws::{amplitude_max, distance_max_km, duration_max_secs, ease_in_out_cubic, noise_envelope};
use crate::{WaveError, WaveResult};

/// Floor for divisions by the travel duration.
const MIN_DURATION_SECS: f64 = 1e-6;

/// Request for a new wave.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WaveSpec {
    pub origin:              Point,
    pub magnitude:           f64,
    pub pulse_duration_secs: f64,
}

/// Which collision rule the front currently follows.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// `radius < thickness`: the whole interior is shaking.
    Disk,
    /// `radius >= thickness`: only the annulus of width `thickness` is.
    Ring,
}

/// One point of the synthetic seismogram.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SignalSample {
    /// Seconds since the wave started.
    pub t:         f64,
    pub amplitude: f64,
}

#[derive(Clone, Debug)]
pub struct Wave {
    id:        WaveId,
    origin:    Point,
    magnitude: f64,
    pulse_secs: f64,

    // Derived once at creation.
    total_distance_km:   f64,
    travel_duration_secs: f64,
    total_radius_px:     f64,
    life_radius_px:      f64,
    thickness_px:        f64,
    amplitude_max:       f64,
    km_to_px:            f64,

    // Kinematics.
    elapsed_secs:   f64,
    radius_px:      f64,
    velocity_px:    f64,
    accel_px:       f64,
    peak_velocity_px: f64,
    peak_accel_px:  f64,
    peak_displacement: f64,

    /// Origin distance of every node the front can ever reach.
    reach: HashMap<NodeId, f64>,

    signal: Vec<SignalSample>,
    rng:    WaveRng,

    triangulation: Triangulation,
}

impl Wave {
    /// Create a wave over `grid`.  Node distances are captured here, so a
    /// later network rebuild does not affect a live wave.
    pub fn new(id: WaveId, spec: WaveSpec, grid: &HexGrid, km_to_px: f64, seed: u64) -> WaveResult<Wave> {
        if !spec.magnitude.is_finite() {
            return Err(WaveError::InvalidMagnitude(spec.magnitude));
        }
        if !spec.pulse_duration_secs.is_finite() || spec.pulse_duration_secs <= 0.0 {
            return Err(WaveError::InvalidPulse(spec.pulse_duration_secs));
        }
        if !spec.origin.is_finite() {
            return Err(WaveError::InvalidOrigin);
        }
        if !km_to_px.is_finite() || km_to_px <= 0.0 {
            return Err(WaveError::InvalidScale(km_to_px));
        }

        let total_distance_km = distance_max_km(spec.magnitude);
        let travel_duration_secs = duration_max_secs(spec.magnitude);
        let total_radius_px = total_distance_km * km_to_px;
        let thickness_px =
            (total_radius_px * spec.pulse_duration_secs / travel_duration_secs.max(MIN_DURATION_SECS)).max(1.0);
        let corner_reach = grid.params().viewport.max_corner_distance(spec.origin, thickness_px / 2.0);
        let life_radius_px = corner_reach.min(total_radius_px);

        let reach: HashMap<NodeId, f64> =
            grid.nodes_within(spec.origin, total_radius_px).into_iter().collect();

        trace!(
            wave = %id,
            total_radius_px,
            thickness_px,
            reachable = reach.len(),
            "wave created"
        );

        Ok(Wave {
            id,
            origin: spec.origin,
            magnitude: spec.magnitude,
            pulse_secs: spec.pulse_duration_secs,
            total_distance_km,
            travel_duration_secs,
            total_radius_px,
            life_radius_px,
            thickness_px,
            amplitude_max: amplitude_max(spec.magnitude),
            km_to_px,
            elapsed_secs: 0.0,
            radius_px: 0.0,
            velocity_px: 0.0,
            accel_px: 0.0,
            peak_velocity_px: 0.0,
            peak_accel_px: 0.0,
            peak_displacement: 0.0,
            reach,
            signal: Vec::new(),
            rng: WaveRng::new(seed, id),
            triangulation: Triangulation::new(km_to_px),
        })
    }

    // ── Per-frame advance ─────────────────────────────────────────────────

    /// Advance by `dt` seconds.  A `dt` of zero (or anything not a positive
    /// finite number) leaves elapsed time and derivatives untouched.
    pub fn update(&mut self, dt: f64) {
        let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };
        self.elapsed_secs += dt;

        let t_norm = (self.elapsed_secs / self.travel_duration_secs.max(MIN_DURATION_SECS)).min(1.0);
        let radius = (ease_in_out_cubic(t_norm) * self.total_radius_px).max(self.radius_px);

        if dt > 0.0 {
            let velocity = (radius - self.radius_px) / dt;
            self.accel_px = (velocity - self.velocity_px) / dt;
            self.velocity_px = velocity;
            self.peak_velocity_px = self.peak_velocity_px.max(self.velocity_px.abs());
            self.peak_accel_px = self.peak_accel_px.max(self.accel_px.abs());
        }
        self.radius_px = radius;

        if self.radius_px < self.thickness_px {
            let env = noise_envelope(self.radius_px / self.thickness_px);
            let amplitude = self.rng.centered() * self.amplitude_max * env;
            self.peak_displacement = self.peak_displacement.max(amplitude.abs());
            self.signal.push(SignalSample { t: self.elapsed_secs, amplitude });
        }
    }

    /// `true` once the front has left the viewport or run out of reach.
    pub fn is_off_the_map(&self) -> bool {
        self.radius_px >= self.life_radius_px
            || (self.velocity_px <= 0.0 && self.elapsed_secs >= self.travel_duration_secs)
    }

    // ── Collision ─────────────────────────────────────────────────────────

    /// Distance from the origin to `node`, or `None` if the front can never
    /// reach it.
    #[inline]
    pub fn distance_to(&self, node: NodeId) -> Option<f64> {
        self.reach.get(&node).copied()
    }

    /// `true` if `node` lies inside the front this frame.
    pub fn collides(&self, node: NodeId) -> bool {
        let Some(d) = self.distance_to(node) else {
            return false;
        };
        match self.phase() {
            Phase::Disk => d < self.radius_px,
            Phase::Ring => self.radius_px - self.thickness_px <= d && d <= self.radius_px,
        }
    }

    /// `true` if a point at `distance` from the origin, with a footprint of
    /// `half_size`, touches the current front's outer edge.
    #[inline]
    pub fn reaches(&self, distance: f64, half_size: f64) -> bool {
        distance <= self.radius_px + half_size
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn id(&self) -> WaveId {
        self.id
    }

    #[inline]
    pub fn origin(&self) -> Point {
        self.origin
    }

    #[inline]
    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    #[inline]
    pub fn pulse_duration_secs(&self) -> f64 {
        self.pulse_secs
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        if self.radius_px < self.thickness_px { Phase::Disk } else { Phase::Ring }
    }

    #[inline]
    pub fn radius_px(&self) -> f64 {
        self.radius_px
    }

    #[inline]
    pub fn thickness_px(&self) -> f64 {
        self.thickness_px
    }

    #[inline]
    pub fn total_radius_px(&self) -> f64 {
        self.total_radius_px
    }

    #[inline]
    pub fn total_distance_km(&self) -> f64 {
        self.total_distance_km
    }

    #[inline]
    pub fn life_radius_px(&self) -> f64 {
        self.life_radius_px
    }

    #[inline]
    pub fn travel_duration_secs(&self) -> f64 {
        self.travel_duration_secs
    }

    #[inline]
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_secs
    }

    /// Fraction of the full reach covered, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        (self.radius_px / self.total_radius_px.max(1.0)).min(1.0)
    }

    /// Render opacity: fades from 0.8 to 0.2 as the front spreads.
    pub fn alpha(&self) -> f64 {
        0.8 - 0.6 * self.progress()
    }

    /// Peak ground velocity of the front, km/s.
    pub fn pgv_km_s(&self) -> f64 {
        self.velocity_px / self.km_to_px
    }

    /// Peak ground acceleration of the front, km/s².
    pub fn pga_km_s2(&self) -> f64 {
        self.accel_px / self.km_to_px
    }

    /// Largest absolute seismogram amplitude so far.
    pub fn pgd(&self) -> f64 {
        self.peak_displacement
    }

    /// Largest |velocity| seen, km/s.
    pub fn peak_pgv_km_s(&self) -> f64 {
        self.peak_velocity_px / self.km_to_px
    }

    /// Largest |acceleration| seen, km/s².
    pub fn peak_pga_km_s2(&self) -> f64 {
        self.peak_accel_px / self.km_to_px
    }

    #[inline]
    pub fn signal(&self) -> &[SignalSample] {
        &self.signal
    }

    /// Number of nodes the front will sweep over its lifetime.
    #[inline]
    pub fn reachable_count(&self) -> usize {
        self.reach.len()
    }

    #[inline]
    pub fn triangulation(&self) -> &Triangulation {
        &self.triangulation
    }

    #[inline]
    pub fn triangulation_mut(&mut self) -> &mut Triangulation {
        &mut self.triangulation
    }
}
