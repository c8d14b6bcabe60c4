//! `sn-wave`: disturbance events and the set of active waves.
//!
//! # Crate layout
//!
//! | Module    | Contents                                                        |
//! |-----------|-----------------------------------------------------------------|
//! | [`laws`]  | Empirical distance/duration laws, easing, noise envelope        |
//! | [`wave`]  | `Wave`: one expanding disk-then-ring front with its seismogram |
//! | [`field`] | `WaveField`: active waves, per-tick update, safe retirement    |
//! | [`error`] | `WaveError`, `WaveResult<T>`                                    |
//!
//! # Front model
//!
//! ```text
//! tNorm  = min(elapsed / durationMax(M), 1)
//! radius = easeInOutCubic(tNorm) * distanceMax(M) * km_to_px
//!
//! radius <  thickness → disk:  hit if d <  radius
//! radius >= thickness → ring:  hit if radius - thickness <= d <= radius
//! ```
//!
//! Distances from the origin to every node inside the final radius are
//! computed once when the wave is created; a collision query is then a single
//! hash lookup.

pub mod error;
pub mod field;
pub mod laws;
pub mod wave;


pub use error::{WaveError, WaveResult};
pub use field::WaveField;
pub use laws::{ReachClass, distance_max_km, duration_max_secs, reach_warning};
pub use wave::{Phase, SignalSample, Wave, WaveSpec};
