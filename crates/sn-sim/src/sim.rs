//! The `Sim` struct, its frame step, and the commands a UI layer issues.

use tracing::{debug, info, warn};

use sn_core::{FrameClock, NodeId, Point, SimClock, SimConfig, SiteId, SnError, Tick, Viewport, WaveId, sanitize_dt};
use sn_grid::{GridParams, HexGrid};
use sn_locate::DetectionReport;
use sn_population::{SiteRegistry, SiteState};
use sn_relay::{NodeState, SensorStore};
use sn_wave::{ReachClass, WaveField, WaveSpec, reach_warning};

use crate::{DetectionEvent, SimObserver, SimResult, TickSummary};

/// A sensor hit this frame that was not yet detected.
struct Hit {
    distance: f64,
    wave:     WaveId,
    node:     NodeId,
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// Owns the sensor network, relay state, active waves, and population sites
/// of one simulation.
///
/// Create via [`SimBuilder`][crate::SimBuilder].  Fields are public for
/// read access between steps; mutate through the command methods so that
/// observers are notified and cross-references stay valid.
pub struct Sim {
    pub config: SimConfig,

    /// Frame counter and simulated seconds.
    pub clock: SimClock,

    /// The sensor network.  Replaced wholesale by [`Sim::rebuild_network`].
    pub grid: HexGrid,

    /// Relay state, indexed by the grid's `NodeId`s.
    pub sensors: SensorStore,

    pub waves: WaveField,

    pub sites: SiteRegistry,

    frame_clock: FrameClock,
    selected:    Option<NodeId>,
}

impl Sim {
    pub(crate) fn new(config: SimConfig, grid: HexGrid, sites: SiteRegistry) -> Self {
        Self {
            clock: SimClock::new(),
            frame_clock: FrameClock::new(config.max_dt_secs),
            sensors: SensorStore::new(grid.node_count()),
            waves: WaveField::new(),
            config,
            grid,
            sites,
            selected: None,
        }
    }

    // ── Frame step ────────────────────────────────────────────────────────

    /// Advance the simulation by one frame of `dt` seconds.
    ///
    /// `dt` is sanitised first: non-finite or negative deltas become `0`
    /// (nothing moves, no derivative is taken) and large ones are clamped to
    /// `config.max_dt_secs`.
    pub fn step<O: SimObserver>(&mut self, dt: f64, observer: &mut O) -> TickSummary {
        let dt = sanitize_dt(dt, self.config.max_dt_secs);
        self.clock.advance(dt);
        let tick = self.clock.current_tick;
        let now = self.clock.now();
        observer.on_tick_start(tick, now);

        let mut summary = TickSummary { tick, time: now, dt, ..TickSummary::default() };

        // ── ① Waves ───────────────────────────────────────────────────────
        let retired = self.waves.update(dt);
        for &id in &retired {
            info!(wave = %id, "wave retired");
            observer.on_wave_retired(id);
        }
        summary.retired_waves = retired.len();

        // ── ② Sensor collision pass ───────────────────────────────────────
        let mut hits = Vec::new();
        for node in self.grid.node_ids() {
            let Some(wave) = self.waves.first_colliding(node) else {
                continue;
            };
            if self.sensors.is_detected(node) {
                self.sensors.record_motion(node, dt, wave.pgv_km_s(), wave.pga_km_s2());
            } else {
                hits.push(Hit {
                    distance: wave.distance_to(node).unwrap_or(f64::INFINITY),
                    wave: wave.id(),
                    node,
                });
            }
        }

        // Nearest first, so coarse frames still crown the right first
        // detector.
        hits.sort_by(|a, b| {
            a.distance
                .total_cmp(&b.distance)
                .then(a.wave.cmp(&b.wave))
                .then(a.node.cmp(&b.node))
        });

        // ── ③ Detection, triangulation, relay ─────────────────────────────
        for hit in hits {
            if self.detect(hit, dt, tick, now, observer) {
                summary.locks += 1;
            }
            summary.detections += 1;
        }

        // ── ④ Population ──────────────────────────────────────────────────
        let evacuation = self.config.evacuation_secs;
        for wave in self.waves.iter() {
            for (id, site) in self.sites.iter_mut() {
                if !site.collides(wave) {
                    continue;
                }
                let from = site.state();
                if let Some(to) = site.on_wave_contact(now, evacuation) {
                    observer.on_site_state_changed(id, &site.name, from, to);
                    summary.site_changes += 1;
                }
            }
        }

        summary.active_waves = self.waves.len();
        summary.detected_total = self.sensors.count_in(NodeState::Detected);
        observer.on_tick_end(&summary);
        summary
    }

    /// Step `frames` times at a fixed `dt`, stopping early once no wave is
    /// active.  Calls [`SimObserver::on_sim_end`] when done and returns the
    /// number of frames stepped.
    pub fn run<O: SimObserver>(&mut self, frames: u64, dt: f64, observer: &mut O) -> u64 {
        let mut stepped = 0;
        while stepped < frames {
            self.step(dt, observer);
            stepped += 1;
            if self.waves.is_empty() {
                break;
            }
        }
        observer.on_sim_end(self.clock.current_tick);
        stepped
    }

    /// Advance using an absolute frame timestamp in milliseconds, as an
    /// animation-frame callback delivers it.  The first frame moves nothing.
    pub fn frame<O: SimObserver>(&mut self, timestamp_ms: f64, observer: &mut O) -> TickSummary {
        let dt = self.frame_clock.frame(timestamp_ms);
        self.step(dt, observer)
    }

    /// Process one queued hit.  Returns `true` if it locked a triangulation.
    fn detect<O: SimObserver>(&mut self, hit: Hit, dt: f64, tick: Tick, now: f64, observer: &mut O) -> bool {
        let Some(wave) = self.waves.get_mut(hit.wave) else {
            return false;
        };
        observer.on_before_detection(hit.node, hit.wave);
        if !self.sensors.detect(hit.node, now) {
            return false;
        }

        let position = self.grid.position(hit.node);
        let (pgv, pga) = (wave.pgv_km_s(), wave.pga_km_s2());
        let was_locked = wave.triangulation().is_locked();
        wave.triangulation_mut().add_report(DetectionReport {
            node: hit.node,
            position,
            detected_at: now,
            velocity_km_s: Some(pgv),
            accel_km_s2: Some(pga),
        });
        let locked_now = !was_locked && wave.triangulation().is_locked();

        let informed = self.sensors.relay_from(&self.grid, hit.node);
        self.sensors.record_motion(hit.node, dt, pgv, pga);

        let event = DetectionEvent {
            tick,
            time: now,
            node: hit.node,
            wave: hit.wave,
            position,
            distance: hit.distance,
            order: self.sensors.order(hit.node),
            origin: self.sensors.origin(hit.node),
            informed: informed.len(),
        };
        debug!(
            node = %event.node,
            wave = %event.wave,
            order = event.order,
            informed = event.informed,
            time = now,
            "sensor detected"
        );
        observer.on_detection(&event);

        if locked_now {
            self.on_lock(hit.wave, now, observer);
        }
        locked_now
    }

    /// A wave's triangulation just locked: warn listening sensors and every
    /// site inside the wave's physical reach.
    fn on_lock<O: SimObserver>(&mut self, id: WaveId, now: f64, observer: &mut O) {
        let Some(wave) = self.waves.get(id) else {
            return;
        };
        let estimate = wave.triangulation().estimate();
        match estimate {
            Some(e) => info!(
                wave = %id,
                epicenter = %e.epicenter,
                radius_px = ?e.radius_px,
                beta = e.beta,
                "epicenter locked"
            ),
            None => warn!(wave = %id, "triangulation locked without an estimate"),
        }
        observer.on_epicenter_locked(id, estimate);

        let alerted = self.sensors.alert_listening();
        debug!(wave = %id, sensors = alerted.len(), "listening sensors alerted");

        for (site_id, site) in self.sites.iter_mut() {
            if site.within_reach(wave) && site.alert(now) {
                observer.on_site_state_changed(site_id, &site.name, SiteState::Calm, SiteState::Alerting);
            }
        }
    }

    // ── Commands ──────────────────────────────────────────────────────────

    /// Start a wave.
    pub fn add_wave<O: SimObserver>(&mut self, spec: WaveSpec, observer: &mut O) -> SimResult<WaveId> {
        let id = self.waves.add(spec, &self.grid, self.config.km_to_px(), self.config.seed)?;
        if let Some(wave) = self.waves.get(id) {
            info!(
                wave = %id,
                origin = %spec.origin,
                magnitude = spec.magnitude,
                reachable = wave.reachable_count(),
                "wave added"
            );
            observer.on_wave_added(wave);
        }
        Ok(id)
    }

    /// Start a wave at `origin` with the configured magnitude and pulse.
    pub fn add_wave_at<O: SimObserver>(&mut self, origin: Point, observer: &mut O) -> SimResult<WaveId> {
        let spec = WaveSpec {
            origin,
            magnitude: self.config.magnitude,
            pulse_duration_secs: self.config.pulse_duration_secs,
        };
        self.add_wave(spec, observer)
    }

    /// Replace the sensor network with one of `spacing_km` over `viewport`.
    ///
    /// On any error the current network, waves, and relay state are left
    /// untouched.  On success every wave, relay state and the selection are
    /// discarded, since they refer to the old network's nodes.
    pub fn rebuild_network<O: SimObserver>(
        &mut self,
        spacing_km: f64,
        viewport: Viewport,
        observer: &mut O,
    ) -> SimResult<()> {
        let mut config = self.config.clone();
        config.node_spacing_km = spacing_km;
        config.viewport = viewport;
        if let Err(e) = config.validate() {
            warn!(error = %e, "network rebuild rejected");
            return Err(e.into());
        }
        let grid = match HexGrid::build(&GridParams::from_config(&config)) {
            Ok(g) => g,
            Err(e) => {
                warn!(error = %e, "network rebuild rejected");
                return Err(e.into());
            }
        };

        self.config = config;
        self.sensors = SensorStore::new(grid.node_count());
        self.grid = grid;
        self.waves.clear();
        self.selected = None;
        info!(nodes = self.grid.node_count(), spacing_px = self.config.spacing_px(), "network rebuilt");
        observer.on_network_rebuilt(self.grid.node_count());
        Ok(())
    }

    /// Set the magnitude used by [`add_wave_at`](Self::add_wave_at).
    /// Returns how far the new magnitude's reach spills over the map.
    pub fn set_magnitude(&mut self, magnitude: f64) -> SimResult<ReachClass> {
        if !magnitude.is_finite() {
            return Err(SnError::Config(format!("magnitude must be finite, got {magnitude}")).into());
        }
        self.config.magnitude = magnitude;
        let reach = reach_warning(magnitude, self.config.map_scale_km);
        if reach != ReachClass::Fits {
            debug!(magnitude, ?reach, "magnitude reach exceeds map");
        }
        Ok(reach)
    }

    pub fn set_pulse_duration(&mut self, secs: f64) -> SimResult<()> {
        if !secs.is_finite() || secs <= 0.0 {
            return Err(SnError::Config(format!("pulse_duration_secs must be finite and > 0, got {secs}")).into());
        }
        self.config.pulse_duration_secs = secs;
        Ok(())
    }

    pub fn set_evacuation_secs(&mut self, secs: f64) -> SimResult<()> {
        if !secs.is_finite() || secs < 0.0 {
            return Err(SnError::Config(format!("evacuation_secs must be finite and >= 0, got {secs}")).into());
        }
        self.config.evacuation_secs = secs;
        Ok(())
    }

    /// Drop every wave, start a new detection cycle, calm every site, and
    /// restart the clocks.
    pub fn clear_all<O: SimObserver>(&mut self, observer: &mut O) {
        self.waves.clear();
        self.reset_detections(observer);
        for (id, site) in self.sites.iter_mut() {
            let from = site.state();
            site.reset();
            if from != SiteState::Calm {
                observer.on_site_state_changed(id, &site.name, from, SiteState::Calm);
            }
        }
        if let Some(node) = self.selected.take() {
            observer.on_node_deselected(node);
        }
        self.clock.reset();
        self.frame_clock.reset();
        info!("simulation cleared");
    }

    /// Start a new detection cycle: every sensor back to `sensing` with no
    /// order or recorded motion.  Active waves keep running.
    pub fn reset_detections<O: SimObserver>(&mut self, observer: &mut O) {
        for node in self.grid.node_ids() {
            if self.sensors.is_detected(node) {
                observer.on_node_reset(node);
            }
        }
        self.sensors.reset();
        debug!("detections reset");
    }

    /// Toggle selection of the sensor under `pos`.  Selecting the selected
    /// sensor deselects it; a miss changes nothing.  Returns the selection
    /// after the call.
    pub fn select_at<O: SimObserver>(&mut self, pos: Point, observer: &mut O) -> Option<NodeId> {
        let Some(node) = self.find_node(pos) else {
            return self.selected;
        };
        if let Some(prev) = self.selected.take() {
            observer.on_node_deselected(prev);
            if prev == node {
                return None;
            }
        }
        self.selected = Some(node);
        observer.on_node_selected(node);
        self.selected
    }

    /// The sensor within `config.hit_radius_px` of `pos`, if any.
    pub fn find_node(&self, pos: Point) -> Option<NodeId> {
        self.grid.find_node(pos, self.config.hit_radius_px)
    }

    #[inline]
    pub fn selected(&self) -> Option<NodeId> {
        self.selected
    }

    // ── Population ────────────────────────────────────────────────────────

    /// Register a site; `size_px` defaults to `config.site_size_px`.
    pub fn add_site(&mut self, name: &str, position: Point, size_px: Option<f64>) -> SimResult<SiteId> {
        let id = self.sites.add(name, position, size_px.unwrap_or(self.config.site_size_px))?;
        debug!(site = name, %position, "site added");
        Ok(id)
    }

    pub fn remove_site(&mut self, name: &str) -> SimResult<()> {
        self.sites.remove(name)?;
        debug!(site = name, "site removed");
        Ok(())
    }
}
