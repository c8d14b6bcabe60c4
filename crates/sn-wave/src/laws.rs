//! Closed-form empirical relations.  The constants are fixed; changing them
//! changes every recorded run.

/// Maximum propagation distance in kilometres for a magnitude.
#[inline]
pub fn distance_max_km(magnitude: f64) -> f64 {
    1.8693 * (0.7076 * magnitude).exp()
}

/// Total travel duration in seconds for a magnitude.
#[inline]
pub fn duration_max_secs(magnitude: f64) -> f64 {
    2.7344 * (0.4805 * magnitude).exp()
}

/// Peak amplitude of the synthetic seismogram.
#[inline]
pub fn amplitude_max(magnitude: f64) -> f64 {
    10f64.powf(magnitude / 2.0)
}

/// Cubic ease-in-out on `[0, 1]`: accelerates, then decelerates.
#[inline]
pub fn ease_in_out_cubic(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Noise envelope over the disk phase: smoothstep rise over the first 5%,
/// flat until 80%, smoothstep fall to zero at 100%.
pub fn noise_envelope(t_norm: f64) -> f64 {
    const RISE: f64 = 0.05;
    const FALL: f64 = 0.8;

    let smoothstep = |x: f64| x * x * (3.0 - 2.0 * x);
    let t = t_norm.clamp(0.0, 1.0);
    if t < RISE {
        smoothstep(t / RISE)
    } else if t > FALL {
        smoothstep((1.0 - t) / (1.0 - FALL))
    } else {
        1.0
    }
}

// ── Magnitude preview ─────────────────────────────────────────────────────────

/// How far a magnitude's reach spills over the configured map.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ReachClass {
    /// Reach fits within half the map width.
    Fits,
    /// Reach exceeds half the map width.
    Alert,
    /// Reach exceeds the whole map width.
    Warn,
}

/// Classify `magnitude` against a map `map_scale_km` wide.
pub fn reach_warning(magnitude: f64, map_scale_km: f64) -> ReachClass {
    let reach = distance_max_km(magnitude);
    if reach > map_scale_km {
        ReachClass::Warn
    } else if reach > map_scale_km / 2.0 {
        ReachClass::Alert
    } else {
        ReachClass::Fits
    }
}
