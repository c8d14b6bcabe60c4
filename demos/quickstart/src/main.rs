//! quickstart: headless seismonet run.
//!
//! Launches scripted (and optionally random) waves over a hex sensor network
//! at a fixed frame rate, then prints who detected what, where each
//! triangulation put the epicenter, and how every town fared.
//!
//! ```text
//! cargo run -p quickstart -- --config demos/quickstart/scenario.toml --output out/
//! RUST_LOG=sn_sim=debug cargo run -p quickstart
//! ```

mod scenario;

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use sn_core::{Point, SiteId, Tick, WaveId};
use sn_locate::Estimate;
use sn_output::{CsvWriter, SimOutputObserver};
use sn_population::SiteState;
use sn_sim::{DetectionEvent, SimBuilder, SimObserver, TickSummary};
use sn_wave::{ReachClass, Wave, WaveSpec, reach_warning};

use scenario::Scenario;

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(name = "quickstart", about = "Headless seismic sensor-network run")]
struct Cli {
    /// Scenario TOML (`[sim]`, `[[waves]]`, `[[sites]]`).  Built-in scenario
    /// if omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory for detections.csv and tick_summaries.csv.
    #[arg(long)]
    output: Option<PathBuf>,

    #[arg(long)]
    seed: Option<u64>,

    /// Default magnitude for waves that do not set one.
    #[arg(long)]
    magnitude: Option<f64>,

    /// Sensor spacing in km.
    #[arg(long)]
    spacing_km: Option<f64>,

    #[arg(long)]
    evacuation_secs: Option<f64>,

    /// Extra waves at random epicentres.
    #[arg(long, default_value_t = 0)]
    random_waves: usize,

    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Stop after this many simulated seconds even if waves remain.
    #[arg(long, default_value_t = 300.0)]
    max_secs: f64,

    /// Log filter used when RUST_LOG is unset.
    #[arg(long, default_value = "info")]
    log_level: String,
}

// ── Observer ──────────────────────────────────────────────────────────────────

/// Collects what the summary needs and forwards everything to the optional
/// CSV recorder.
#[derive(Default)]
struct Report {
    recorder:   Option<SimOutputObserver<CsvWriter>>,
    origins:    HashMap<WaveId, Point>,
    detections: Vec<DetectionEvent>,
    locks:      Vec<(WaveId, Option<Point>)>,
    frames:     u64,
}

impl SimObserver for Report {
    fn on_tick_end(&mut self, summary: &TickSummary) {
        self.frames += 1;
        if let Some(r) = self.recorder.as_mut() {
            r.on_tick_end(summary);
        }
    }

    fn on_wave_added(&mut self, wave: &Wave) {
        self.origins.insert(wave.id(), wave.origin());
    }

    fn on_detection(&mut self, event: &DetectionEvent) {
        self.detections.push(*event);
        if let Some(r) = self.recorder.as_mut() {
            r.on_detection(event);
        }
    }

    fn on_epicenter_locked(&mut self, wave: WaveId, estimate: Option<&Estimate>) {
        self.locks.push((wave, estimate.map(|e| e.epicenter)));
    }

    fn on_site_state_changed(&mut self, _site: SiteId, name: &str, from: SiteState, to: SiteState) {
        info!(site = name, %from, %to, "site state changed");
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        if let Some(r) = self.recorder.as_mut() {
            r.on_sim_end(final_tick);
        }
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)))
        .init();

    // 1. Scenario + CLI overrides.
    let mut scenario = match &cli.config {
        Some(path) => Scenario::load(path)?,
        None => Scenario::builtin(),
    };
    if let Some(seed) = cli.seed {
        scenario.sim.seed = seed;
    }
    if let Some(m) = cli.magnitude {
        scenario.sim.magnitude = m;
    }
    if let Some(km) = cli.spacing_km {
        scenario.sim.node_spacing_km = km;
    }
    if let Some(secs) = cli.evacuation_secs {
        scenario.sim.evacuation_secs = secs;
    }
    scenario.add_random_waves(cli.random_waves, 15.0);

    match reach_warning(scenario.sim.magnitude, scenario.sim.map_scale_km) {
        ReachClass::Fits => {}
        ReachClass::Alert => warn!(magnitude = scenario.sim.magnitude, "reach exceeds half the map"),
        ReachClass::Warn => warn!(magnitude = scenario.sim.magnitude, "reach exceeds the whole map"),
    }

    // 2. Build the simulation.
    let mut builder = SimBuilder::new(scenario.sim.clone());
    for s in &scenario.sites {
        builder = match s.size_px {
            Some(size) => builder.sized_site(s.name.clone(), Point::new(s.x, s.y), size),
            None => builder.site(s.name.clone(), Point::new(s.x, s.y)),
        };
    }
    let mut sim = builder.build().context("building simulation")?;

    println!("=== quickstart: seismonet ===");
    println!(
        "Sensors: {}  |  Sites: {}  |  Waves: {}  |  Seed: {}",
        sim.grid.node_count(),
        sim.sites.len(),
        scenario.waves.len(),
        sim.config.seed
    );
    println!();

    // 3. Output.
    let mut report = Report::default();
    if let Some(dir) = &cli.output {
        std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
        report.recorder = Some(SimOutputObserver::new(CsvWriter::new(dir)?));
    }

    // 4. Run: launch each scripted wave when its time comes, stop once the
    //    script is exhausted and the map is quiet.  A sensor detects once per
    //    cycle, so a wave launched onto a quiet map starts a fresh cycle;
    //    waves that overlap share one and only the first is located.
    let dt = 1.0 / f64::from(cli.fps.max(1));
    let mut pending = scenario.schedule().into_iter().peekable();
    let t0 = Instant::now();
    while sim.clock.now() <= cli.max_secs {
        while let Some(w) = pending.next_if(|w| w.at_secs <= sim.clock.now()) {
            if sim.waves.is_empty() && !report.origins.is_empty() {
                sim.reset_detections(&mut report);
            }
            let spec = WaveSpec {
                origin: w.origin(),
                magnitude: w.magnitude.unwrap_or(sim.config.magnitude),
                pulse_duration_secs: w.pulse_secs.unwrap_or(sim.config.pulse_duration_secs),
            };
            if let Err(e) = sim.add_wave(spec, &mut report) {
                warn!(error = %e, x = w.x, y = w.y, "wave skipped");
            }
        }
        if pending.peek().is_none() && sim.waves.is_empty() {
            break;
        }
        sim.step(dt, &mut report);
    }
    report.on_sim_end(sim.clock.current_tick);
    let elapsed = t0.elapsed();

    if let Some(e) = report.recorder.as_mut().and_then(|r| r.take_error()) {
        eprintln!("output error: {e}");
    }

    // 5. Summary.
    println!(
        "Simulated {:.1} s in {} frames ({:.3} s wall)",
        sim.clock.now(),
        report.frames,
        elapsed.as_secs_f64()
    );
    println!("Detections: {}", report.detections.len());
    if let Some(dir) = &cli.output {
        println!("  written to {}", dir.display());
    }
    println!();

    println!("{:<8} {:>20} {:>20} {:>10}", "Wave", "Origin", "Estimate", "Error px");
    println!("{}", "-".repeat(62));
    let mut waves: Vec<_> = report.origins.iter().collect();
    waves.sort_by_key(|(id, _)| **id);
    for (wave, origin) in waves {
        let lock = report.locks.iter().find(|(id, _)| id == wave).map(|(_, e)| *e);
        let (est, err) = match lock {
            Some(Some(p)) => (p.to_string(), format!("{:.1}", p.distance(*origin))),
            Some(None) => ("unavailable".to_owned(), "-".to_owned()),
            None => ("not located".to_owned(), "-".to_owned()),
        };
        println!("{:<8} {:>20} {:>20} {:>10}", wave.0, origin.to_string(), est, err);
    }
    println!();

    println!("{:<12} {:<10}", "Site", "State");
    println!("{}", "-".repeat(22));
    for site in sim.site_snapshots() {
        println!("{:<12} {:<10}", site.name, site.state);
    }

    Ok(())
}
