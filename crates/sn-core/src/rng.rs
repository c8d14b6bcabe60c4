//! Deterministic per-wave and simulation-level RNG wrappers.
//!
//! # Determinism strategy
//!
//! Each wave gets its own independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (wave_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive wave IDs uniformly across the seed space.
//! This means:
//!
//! - Waves never share RNG state, so the synthetic seismogram of one wave
//!   does not depend on how many other waves are active.
//! - Adding a wave does not disturb the noise of existing waves, so runs are
//!   reproducible given the same seed and the same sequence of commands.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::WaveId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── WaveRng ───────────────────────────────────────────────────────────────────

/// Per-wave deterministic RNG driving the synthetic seismogram.
#[derive(Clone, Debug)]
pub struct WaveRng(SmallRng);

impl WaveRng {
    /// Seed deterministically from the run's global seed and a wave ID.
    pub fn new(global_seed: u64, wave: WaveId) -> Self {
        let seed = global_seed ^ (wave.0 as u64).wrapping_mul(MIXING_CONSTANT);
        WaveRng(SmallRng::seed_from_u64(seed))
    }

    /// Uniform sample in `[-0.5, 0.5)`: the centred noise unit.
    #[inline]
    pub fn centered(&mut self) -> f64 {
        self.0.r#gen::<f64>() - 0.5
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Simulation-level RNG for random epicentres in scripted scenarios.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }
}
