//! Scripted scenarios: the simulation configuration plus timed waves and
//! population sites, loadable from TOML.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use sn_core::{Point, SimConfig, SimRng};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub sim:   SimConfig,
    pub waves: Vec<WaveEntry>,
    pub sites: Vec<SiteEntry>,
}

/// A wave launched once the simulation clock reaches `at_secs`.
#[derive(Debug, Clone, Deserialize)]
pub struct WaveEntry {
    pub x:          f64,
    pub y:          f64,
    #[serde(default)]
    pub at_secs:    f64,
    pub magnitude:  Option<f64>,
    pub pulse_secs: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SiteEntry {
    pub name:    String,
    pub x:       f64,
    pub y:       f64,
    pub size_px: Option<f64>,
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading scenario {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing scenario {}", path.display()))
    }

    /// One central event and three towns, used when no file is given.
    pub fn builtin() -> Self {
        let site = |name: &str, x, y| SiteEntry { name: name.to_owned(), x, y, size_px: None };
        Self {
            sim:   SimConfig::default(),
            waves: vec![WaveEntry { x: 350.0, y: 350.0, at_secs: 0.0, magnitude: None, pulse_secs: None }],
            sites: vec![
                site("Rivertown", 420.0, 300.0),
                site("Hillcrest", 180.0, 520.0),
                site("Portside", 640.0, 90.0),
            ],
        }
    }

    /// Append `count` waves at random epicentres inside the viewport, one
    /// every `spacing_secs`, after the scripted ones.
    pub fn add_random_waves(&mut self, count: usize, spacing_secs: f64) {
        let mut rng = SimRng::new(self.sim.seed);
        let start = self.waves.iter().map(|w| w.at_secs).fold(0.0, f64::max);
        let (w, h) = (self.sim.viewport.width, self.sim.viewport.height);
        for i in 0..count {
            self.waves.push(WaveEntry {
                x:          rng.gen_range(0.0..w),
                y:          rng.gen_range(0.0..h),
                at_secs:    start + spacing_secs * (i + 1) as f64,
                magnitude:  None,
                pulse_secs: None,
            });
        }
    }

    /// Scripted waves sorted by launch time.
    pub fn schedule(&self) -> Vec<WaveEntry> {
        let mut waves = self.waves.clone();
        waves.sort_by(|a, b| a.at_secs.total_cmp(&b.at_secs));
        waves
    }
}

impl WaveEntry {
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }
}
