//! Plain data row types written by output backends.

use sn_sim::{DetectionEvent, TickSummary};

/// Sentinel written for "no node".
pub const NO_NODE: u32 = u32::MAX;

/// One sensor's first hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectionRow {
    pub tick:        u64,
    pub time_secs:   f64,
    pub wave_id:     u32,
    pub node_id:     u32,
    pub x:           f64,
    pub y:           f64,
    pub distance_px: f64,
    pub order:       u32,
    /// First detector the node heard from; [`NO_NODE`] for first detectors.
    pub origin_node: u32,
    pub informed:    u64,
}

impl From<&DetectionEvent> for DetectionRow {
    fn from(e: &DetectionEvent) -> Self {
        Self {
            tick:        e.tick.0,
            time_secs:   e.time,
            wave_id:     e.wave.0,
            node_id:     e.node.0,
            x:           e.position.x,
            y:           e.position.y,
            distance_px: e.distance,
            order:       e.order,
            origin_node: e.origin.map_or(NO_NODE, |n| n.0),
            informed:    e.informed as u64,
        }
    }
}

/// Counters for one simulation step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSummaryRow {
    pub tick:           u64,
    pub time_secs:      f64,
    pub dt_secs:        f64,
    pub active_waves:   u64,
    pub retired_waves:  u64,
    pub detections:     u64,
    pub detected_total: u64,
    pub locks:          u64,
    pub site_changes:   u64,
}

impl From<&TickSummary> for TickSummaryRow {
    fn from(s: &TickSummary) -> Self {
        Self {
            tick:           s.tick.0,
            time_secs:      s.time,
            dt_secs:        s.dt,
            active_waves:   s.active_waves as u64,
            retired_waves:  s.retired_waves as u64,
            detections:     s.detections as u64,
            detected_total: s.detected_total as u64,
            locks:          s.locks as u64,
            site_changes:   s.site_changes as u64,
        }
    }
}
