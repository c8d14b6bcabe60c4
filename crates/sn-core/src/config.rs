//! Top-level simulation configuration.
//!
//! Typically built from [`SimConfig::default`] and adjusted field by field, or
//! loaded from a TOML file by the application crate (with the `serde`
//! feature) and passed to `SimBuilder`.

use crate::{SnError, SnResult, Viewport};

/// Every parameter with a recognised effect on the simulation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Pixel extent of the simulated map.
    pub viewport: Viewport,

    /// Kilometres represented by the full viewport width.  Default: 300.
    pub map_scale_km: f64,

    /// Distance between adjacent sensors, in kilometres.  Default: 100.
    pub node_spacing_km: f64,

    /// Sensors closer than this to any viewport edge are not created.
    pub margin_px: f64,

    /// Magnitude used by `add_wave` when none is given.  Default: 5.
    pub magnitude: f64,

    /// Pulse duration in seconds; sets the width of the wavefront.
    pub pulse_duration_secs: f64,

    /// Seconds between a site entering `alerting` and the end of its
    /// evacuation window.
    pub evacuation_secs: f64,

    /// Radius around a sensor that counts as a hit for selection queries.
    pub hit_radius_px: f64,

    /// Upper bound applied to every frame delta.
    pub max_dt_secs: f64,

    /// Footprint of a population site when none is given.
    pub site_size_px: f64,

    /// Master RNG seed.  The same seed always produces identical seismograms.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            viewport:            Viewport::default(),
            map_scale_km:        300.0,
            node_spacing_km:     100.0,
            margin_px:           10.0,
            magnitude:           5.0,
            pulse_duration_secs: 5.0,
            evacuation_secs:     10.0,
            hit_radius_px:       10.0,
            max_dt_secs:         0.25,
            site_size_px:        14.0,
            seed:                42,
        }
    }
}

impl SimConfig {
    /// Pixels per kilometre.
    #[inline]
    pub fn km_to_px(&self) -> f64 {
        self.viewport.width / self.map_scale_km
    }

    /// Sensor spacing converted to pixels.
    #[inline]
    pub fn spacing_px(&self) -> f64 {
        self.node_spacing_km * self.km_to_px()
    }

    /// Reject parameters that would make the grid or the wave laws
    /// meaningless.  Called by `SimBuilder::build` and before every rebuild.
    pub fn validate(&self) -> SnResult<()> {
        if !self.viewport.is_valid() {
            return Err(SnError::Config(format!(
                "viewport must be finite and positive, got {}x{}",
                self.viewport.width, self.viewport.height
            )));
        }
        positive("map_scale_km", self.map_scale_km)?;
        positive("node_spacing_km", self.node_spacing_km)?;
        positive("pulse_duration_secs", self.pulse_duration_secs)?;
        positive("max_dt_secs", self.max_dt_secs)?;
        non_negative("margin_px", self.margin_px)?;
        non_negative("evacuation_secs", self.evacuation_secs)?;
        non_negative("hit_radius_px", self.hit_radius_px)?;
        non_negative("site_size_px", self.site_size_px)?;
        if !self.magnitude.is_finite() {
            return Err(SnError::Config(format!("magnitude must be finite, got {}", self.magnitude)));
        }
        let min_dim = self.viewport.width.min(self.viewport.height);
        if 2.0 * self.margin_px >= min_dim {
            return Err(SnError::Config(format!(
                "margin_px {} leaves no room inside a {}x{} viewport",
                self.margin_px, self.viewport.width, self.viewport.height
            )));
        }
        Ok(())
    }
}

fn positive(name: &str, value: f64) -> SnResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SnError::Config(format!("{name} must be finite and > 0, got {value}")))
    }
}

fn non_negative(name: &str, value: f64) -> SnResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SnError::Config(format!("{name} must be finite and >= 0, got {value}")))
    }
}
