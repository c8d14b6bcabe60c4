//! Fluent builder for constructing a [`Sim`].

use tracing::info;

use sn_core::{Point, SimConfig};
use sn_grid::{GridParams, HexGrid};
use sn_population::SiteRegistry;

use crate::{Sim, SimResult};

/// Fluent builder for [`Sim`].
///
/// # Optional inputs
///
/// | Method                 | Default                        |
/// |------------------------|--------------------------------|
/// | `.site(name, pos)`     | No population sites            |
/// | `.sized_site(..)`      | Footprint `config.site_size_px` otherwise |
///
/// # Example
///
/// ```rust,ignore
/// let sim = SimBuilder::new(config)
///     .site("Rivertown", Point::new(420.0, 300.0))
///     .build()?;
/// ```
pub struct SimBuilder {
    config: SimConfig,
    sites:  Vec<(String, Point, Option<f64>)>,
}

impl SimBuilder {
    pub fn new(config: SimConfig) -> Self {
        Self { config, sites: Vec::new() }
    }

    /// Add a population site with the configured default footprint.
    pub fn site(mut self, name: impl Into<String>, position: Point) -> Self {
        self.sites.push((name.into(), position, None));
        self
    }

    pub fn sized_site(mut self, name: impl Into<String>, position: Point, size_px: f64) -> Self {
        self.sites.push((name.into(), position, Some(size_px)));
        self
    }

    /// Validate the configuration, build the sensor network, register the
    /// sites, and return a ready-to-step [`Sim`].
    pub fn build(self) -> SimResult<Sim> {
        self.config.validate()?;
        let grid = HexGrid::build(&GridParams::from_config(&self.config))?;

        let mut sites = SiteRegistry::new();
        for (name, position, size) in &self.sites {
            sites.add(name, *position, size.unwrap_or(self.config.site_size_px))?;
        }

        info!(
            nodes = grid.node_count(),
            sites = sites.len(),
            spacing_px = self.config.spacing_px(),
            "simulation built"
        );
        Ok(Sim::new(self.config, grid, sites))
    }
}
