//! `SensorStore`: structure-of-arrays state for every sensor in the grid.

use std::collections::VecDeque;

use tracing::trace;

use sn_core::NodeId;
use sn_grid::HexGrid;

use crate::{MotionSample, NodeState};

/// Per-sensor relay state and motion statistics.
///
/// Every `Vec` has exactly `count` elements and is indexed by `NodeId`, the
/// same index the grid uses.  The store is built for one grid; a rebuilt grid
/// gets a fresh store.
#[derive(Clone, Debug)]
pub struct SensorStore {
    /// Number of sensors.  Equals the length of every SoA `Vec`.
    pub count: usize,

    // ── Relay ─────────────────────────────────────────────────────────────
    pub state: Vec<NodeState>,

    /// Hop count from the first detector: 0 = unknown, 1 = first detector.
    pub order: Vec<u32>,

    /// The first detector this sensor's information came from.  `None` for
    /// first detectors and uninformed sensors.
    pub origin: Vec<Option<NodeId>>,

    /// Simulated seconds at which the sensor entered `Detected`.
    pub detected_at: Vec<Option<f64>>,

    // ── Motion statistics ─────────────────────────────────────────────────
    /// Largest |PGA| observed while a front covered the sensor, km/s².
    pub peak_accel: Vec<f64>,

    /// Largest |PGV| observed while a front covered the sensor, km/s.
    pub peak_velocity: Vec<f64>,

    /// Seconds of shaking recorded since first detection.
    pub elapsed: Vec<f64>,

    pub accel_samples:    Vec<Vec<MotionSample>>,
    pub velocity_samples: Vec<Vec<MotionSample>>,
}

impl SensorStore {
    /// A store of `count` sensors, all `Sensing`.
    pub fn new(count: usize) -> Self {
        Self {
            count,
            state: vec![NodeState::Sensing; count],
            order: vec![0; count],
            origin: vec![None; count],
            detected_at: vec![None; count],
            peak_accel: vec![0.0; count],
            peak_velocity: vec![0.0; count],
            elapsed: vec![0.0; count],
            accel_samples: vec![Vec::new(); count],
            velocity_samples: vec![Vec::new(); count],
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[inline]
    pub fn state(&self, node: NodeId) -> NodeState {
        self.state[node.index()]
    }

    #[inline]
    pub fn order(&self, node: NodeId) -> u32 {
        self.order[node.index()]
    }

    #[inline]
    pub fn origin(&self, node: NodeId) -> Option<NodeId> {
        self.origin[node.index()]
    }

    #[inline]
    pub fn detected_at(&self, node: NodeId) -> Option<f64> {
        self.detected_at[node.index()]
    }

    #[inline]
    pub fn is_detected(&self, node: NodeId) -> bool {
        self.state[node.index()] == NodeState::Detected
    }

    /// Number of sensors in `state`.
    pub fn count_in(&self, state: NodeState) -> usize {
        self.state.iter().filter(|&&s| s == state).count()
    }

    // ── Transitions ───────────────────────────────────────────────────────

    /// Mark `node` as hit at simulated time `now`.
    ///
    /// Returns `true` only on the first transition into `Detected` this
    /// cycle.  A sensor nobody told about the event becomes a first detector
    /// (order 1); an informed sensor keeps the order it was relayed.
    pub fn detect(&mut self, node: NodeId, now: f64) -> bool {
        let i = node.index();
        if self.state[i] == NodeState::Detected {
            return false;
        }
        self.state[i] = NodeState::Detected;
        self.detected_at[i] = Some(now);
        if self.order[i] == 0 {
            self.order[i] = 1;
            self.origin[i] = None;
        }
        trace!(node = %node, order = self.order[i], "sensor detected");
        true
    }

    /// Offer relayed information to `node` from `informant`.
    ///
    /// Accepted only if `node` has no order yet; late or duplicate offers
    /// change nothing.  On acceptance the order becomes the informant's plus
    /// one and the origin points at the informant's first detector.
    pub fn listen(&mut self, node: NodeId, informant: NodeId) -> bool {
        let (i, j) = (node.index(), informant.index());
        let informant_order = self.order[j];
        if self.order[i] != 0 || informant_order == 0 {
            return false;
        }
        self.order[i] = informant_order + 1;
        self.origin[i] = if informant_order > 1 { self.origin[j] } else { Some(informant) };
        if self.state[i] == NodeState::Sensing {
            self.state[i] = NodeState::Listening;
        }
        true
    }

    /// Flood detection order outward from `source` over the grid's adjacency.
    ///
    /// Every reachable sensor forwards to all of its neighbors, including
    /// ones that are already informed or detected, so the flood passes
    /// through hit regions.  Returns the sensors newly informed, in visit
    /// order.
    pub fn relay_from(&mut self, grid: &HexGrid, source: NodeId) -> Vec<NodeId> {
        let mut informed = Vec::new();
        if self.order[source.index()] == 0 {
            return informed;
        }

        let mut visited = vec![false; self.count];
        let mut queue = VecDeque::from([source]);
        visited[source.index()] = true;

        while let Some(node) = queue.pop_front() {
            for (_, next) in grid.neighbors(node) {
                if self.listen(next, node) {
                    informed.push(next);
                }
                if !visited[next.index()] {
                    visited[next.index()] = true;
                    queue.push_back(next);
                }
            }
        }

        trace!(source = %source, informed = informed.len(), "relay flood");
        informed
    }

    /// Escalate every `Listening` sensor to `Alerted`.  Returns those changed.
    pub fn alert_listening(&mut self) -> Vec<NodeId> {
        let mut changed = Vec::new();
        for (i, s) in self.state.iter_mut().enumerate() {
            if *s == NodeState::Listening {
                *s = NodeState::Alerted;
                changed.push(NodeId(i as u32));
            }
        }
        changed
    }

    // ── Statistics ────────────────────────────────────────────────────────

    /// Record one frame of shaking at `node`.  Only detected sensors record.
    pub fn record_motion(&mut self, node: NodeId, dt: f64, pgv_km_s: f64, pga_km_s2: f64) {
        let i = node.index();
        if self.state[i] != NodeState::Detected {
            return;
        }
        self.elapsed[i] += dt;
        self.peak_velocity[i] = self.peak_velocity[i].max(pgv_km_s.abs());
        self.peak_accel[i] = self.peak_accel[i].max(pga_km_s2.abs());

        let t = self.elapsed[i];
        self.accel_samples[i].push(MotionSample { t, value: pga_km_s2 });
        self.velocity_samples[i].push(MotionSample { t, value: pgv_km_s });
    }

    /// Start a new cycle: every sensor back to `Sensing` with no order,
    /// origin, or recorded motion.
    pub fn reset(&mut self) {
        *self = Self::new(self.count);
    }
}
