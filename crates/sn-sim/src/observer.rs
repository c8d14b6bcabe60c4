//! Notifications emitted by the simulation for presentation and recording
//! layers.  The simulation never depends on anything an observer does.

use sn_core::{NodeId, Point, SiteId, Tick, WaveId};
use sn_locate::Estimate;
use sn_population::SiteState;
use sn_wave::Wave;

/// A sensor's first hit in the current cycle.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DetectionEvent {
    pub tick:     Tick,
    /// Simulated seconds.
    pub time:     f64,
    pub node:     NodeId,
    pub wave:     WaveId,
    pub position: Point,
    /// Distance from the wave origin, px.
    pub distance: f64,
    pub order:    u32,
    pub origin:   Option<NodeId>,
    /// Sensors newly informed by this detection's relay flood.
    pub informed: usize,
}

/// What one call to [`Sim::step`][crate::Sim::step] did.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickSummary {
    pub tick:           Tick,
    /// Simulated seconds after the step.
    pub time:           f64,
    /// The sanitised delta actually applied.
    pub dt:             f64,
    pub active_waves:   usize,
    pub retired_waves:  usize,
    pub detections:     usize,
    pub detected_total: usize,
    pub locks:          usize,
    pub site_changes:   usize,
}

/// Callbacks invoked by [`Sim`][crate::Sim] steps and commands.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: detection logger
///
/// ```rust,ignore
/// struct Printer;
///
/// impl SimObserver for Printer {
///     fn on_detection(&mut self, e: &DetectionEvent) {
///         println!("{} hit by {} at {:.2}s (order {})", e.node, e.wave, e.time, e.order);
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the start of each step, after the clock advanced.
    fn on_tick_start(&mut self, _tick: Tick, _time: f64) {}

    /// Called at the end of each step.
    fn on_tick_end(&mut self, _summary: &TickSummary) {}

    fn on_wave_added(&mut self, _wave: &Wave) {}

    fn on_wave_retired(&mut self, _wave: WaveId) {}

    /// A front covers `node`, which is about to enter `detected`.
    fn on_before_detection(&mut self, _node: NodeId, _wave: WaveId) {}

    /// `node` entered `detected`.
    fn on_detection(&mut self, _event: &DetectionEvent) {}

    /// `node` left `detected` (detection reset or clear).
    fn on_node_reset(&mut self, _node: NodeId) {}

    /// A wave's triangulation collected its third report.  `estimate` is
    /// `None` when the estimate could not be computed.
    fn on_epicenter_locked(&mut self, _wave: WaveId, _estimate: Option<&Estimate>) {}

    fn on_site_state_changed(&mut self, _site: SiteId, _name: &str, _from: SiteState, _to: SiteState) {}

    fn on_node_selected(&mut self, _node: NodeId) {}

    fn on_node_deselected(&mut self, _node: NodeId) {}

    /// The sensor network was replaced; every previous `NodeId` is void.
    fn on_network_rebuilt(&mut self, _node_count: usize) {}

    /// Called once when [`Sim::run`][crate::Sim::run] finishes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
