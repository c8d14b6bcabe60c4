//! Read-only copies of simulation state for presentation layers.
//!
//! Snapshots own their data, so a renderer can hold them across the next
//! step without borrowing the [`Sim`].

use sn_core::{NodeId, Point, SiteId, SnError, WaveId};
use sn_grid::Axial;
use sn_population::{Site, SiteState};
use sn_relay::{MotionSample, NodeState};
use sn_wave::{Phase, SignalSample, Wave};

use crate::{Sim, SimResult};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeSnapshot {
    pub id:               NodeId,
    pub axial:            Axial,
    pub position:         Point,
    pub state:            NodeState,
    pub order:            u32,
    pub origin:           Option<NodeId>,
    pub detected_at:      Option<f64>,
    pub peak_accel:       f64,
    pub peak_velocity:    f64,
    /// Seconds of shaking recorded since first detection.
    pub elapsed:          f64,
    pub accel_samples:    Vec<MotionSample>,
    pub velocity_samples: Vec<MotionSample>,
    pub selected:         bool,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WaveSnapshot {
    pub id:           WaveId,
    pub origin:       Point,
    pub magnitude:    f64,
    pub radius_px:    f64,
    pub thickness_px: f64,
    pub phase:        Phase,
    pub progress:     f64,
    pub alpha:        f64,
    pub pgv_km_s:     f64,
    pub pga_km_s2:    f64,
    pub pgd:          f64,
    pub signal:       Vec<SignalSample>,
}

impl From<&Wave> for WaveSnapshot {
    fn from(w: &Wave) -> Self {
        Self {
            id:           w.id(),
            origin:       w.origin(),
            magnitude:    w.magnitude(),
            radius_px:    w.radius_px(),
            thickness_px: w.thickness_px(),
            phase:        w.phase(),
            progress:     w.progress(),
            alpha:        w.alpha(),
            pgv_km_s:     w.pgv_km_s(),
            pga_km_s2:    w.pga_km_s2(),
            pgd:          w.pgd(),
            signal:       w.signal().to_vec(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TriangulationSnapshot {
    pub wave:      WaveId,
    pub locked:    bool,
    pub reports:   usize,
    pub epicenter: Option<Point>,
    pub radius_px: Option<f64>,
    /// Time-difference trilateration at the wave's mean front speed; `None`
    /// until locked, or when the detectors are collinear.
    pub cross_check: Option<Point>,
}

impl From<&Wave> for TriangulationSnapshot {
    fn from(w: &Wave) -> Self {
        let t = w.triangulation();
        let mean_speed = w.total_radius_px() / w.travel_duration_secs();
        Self {
            wave:        w.id(),
            locked:      t.is_locked(),
            reports:     t.reports().len(),
            epicenter:   t.estimated_epicenter(),
            radius_px:   t.estimated_radius(),
            cross_check: t.cross_check(mean_speed),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SiteSnapshot {
    pub id:          SiteId,
    pub name:        String,
    pub position:    Point,
    pub size_px:     f64,
    pub state:       SiteState,
    pub alert_start: Option<f64>,
}

impl SiteSnapshot {
    fn new(id: SiteId, site: &Site) -> Self {
        Self {
            id,
            name:        site.name.clone(),
            position:    site.position,
            size_px:     site.size_px,
            state:       site.state(),
            alert_start: site.alert_start(),
        }
    }
}

// ── Sim accessors ─────────────────────────────────────────────────────────────

impl Sim {
    pub fn node_snapshot(&self, node: NodeId) -> SimResult<NodeSnapshot> {
        if !self.grid.contains(node) {
            return Err(SnError::NodeNotFound(node).into());
        }
        let i = node.index();
        let s = &self.sensors;
        Ok(NodeSnapshot {
            id:               node,
            axial:            self.grid.axial(node),
            position:         self.grid.position(node),
            state:            s.state[i],
            order:            s.order[i],
            origin:           s.origin[i],
            detected_at:      s.detected_at[i],
            peak_accel:       s.peak_accel[i],
            peak_velocity:    s.peak_velocity[i],
            elapsed:          s.elapsed[i],
            accel_samples:    s.accel_samples[i].clone(),
            velocity_samples: s.velocity_samples[i].clone(),
            selected:         self.selected() == Some(node),
        })
    }

    /// Every sensor, in `NodeId` order.
    pub fn node_snapshots(&self) -> Vec<NodeSnapshot> {
        self.grid.node_ids().filter_map(|n| self.node_snapshot(n).ok()).collect()
    }

    pub fn wave_snapshot(&self, wave: WaveId) -> SimResult<WaveSnapshot> {
        self.waves
            .get(wave)
            .map(WaveSnapshot::from)
            .ok_or_else(|| SnError::WaveNotFound(wave).into())
    }

    /// Every active wave, in creation order.
    pub fn wave_snapshots(&self) -> Vec<WaveSnapshot> {
        self.waves.iter().map(WaveSnapshot::from).collect()
    }

    pub fn triangulation_snapshot(&self, wave: WaveId) -> SimResult<TriangulationSnapshot> {
        self.waves
            .get(wave)
            .map(TriangulationSnapshot::from)
            .ok_or_else(|| SnError::WaveNotFound(wave).into())
    }

    pub fn triangulation_snapshots(&self) -> Vec<TriangulationSnapshot> {
        self.waves.iter().map(TriangulationSnapshot::from).collect()
    }

    pub fn site_snapshots(&self) -> Vec<SiteSnapshot> {
        self.sites.iter().map(|(id, s)| SiteSnapshot::new(id, s)).collect()
    }
}
