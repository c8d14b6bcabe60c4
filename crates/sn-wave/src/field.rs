//! The set of active waves.
//!
//! Waves live in a `Vec` in creation order; that order is the tie-break when
//! more than one front covers a node.  Retirement happens after every wave
//! has been advanced, never while the set is being walked.

use tracing::debug;

use sn_core::{NodeId, WaveId};
use sn_grid::HexGrid;

use crate::{Wave, WaveResult, WaveSpec};

#[derive(Clone, Debug, Default)]
pub struct WaveField {
    waves:   Vec<Wave>,
    next_id: u32,
}

impl WaveField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create and activate a wave.  IDs are never reused, even after
    /// [`clear`](Self::clear).
    pub fn add(&mut self, spec: WaveSpec, grid: &HexGrid, km_to_px: f64, seed: u64) -> WaveResult<WaveId> {
        let id = WaveId(self.next_id);
        let wave = Wave::new(id, spec, grid, km_to_px, seed)?;
        self.next_id += 1;
        debug!(wave = %id, origin = %spec.origin, magnitude = spec.magnitude, "wave added");
        self.waves.push(wave);
        Ok(id)
    }

    /// Advance every wave by `dt`, then drop those that left the map.
    /// Returns the IDs retired this call, in creation order.
    pub fn update(&mut self, dt: f64) -> Vec<WaveId> {
        for wave in &mut self.waves {
            wave.update(dt);
        }

        let retired: Vec<WaveId> =
            self.waves.iter().filter(|w| w.is_off_the_map()).map(Wave::id).collect();
        if !retired.is_empty() {
            self.waves.retain(|w| !w.is_off_the_map());
            debug!(count = retired.len(), remaining = self.waves.len(), "waves retired");
        }
        retired
    }

    /// The earliest-created wave whose front covers `node`.
    pub fn first_colliding(&self, node: NodeId) -> Option<&Wave> {
        self.waves.iter().find(|w| w.collides(node))
    }

    pub fn get(&self, id: WaveId) -> Option<&Wave> {
        self.waves.iter().find(|w| w.id() == id)
    }

    pub fn get_mut(&mut self, id: WaveId) -> Option<&mut Wave> {
        self.waves.iter_mut().find(|w| w.id() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Wave> + '_ {
        self.waves.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.waves.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.waves.is_empty()
    }

    /// Drop every active wave.
    pub fn clear(&mut self) {
        self.waves.clear();
    }
}
