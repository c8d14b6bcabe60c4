//! `sn-core`: foundational types for the `seismonet` sensor-network simulator.
//!
//! This crate is a dependency of every other `sn-*` crate.  It has no `sn-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `NodeId`, `WaveId`, `SiteId`                          |
//! | [`geo`]         | `Point`, `Viewport`, distance and bounding helpers    |
//! | [`time`]        | `Tick`, `SimClock`, `FrameClock`, `sanitize_dt`       |
//! | [`rng`]         | `WaveRng` (per-wave), `SimRng` (global)               |
//! | [`config`]      | `SimConfig` and its validation                        |
//! | [`error`]       | `SnError`, `SnResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::SimConfig;
pub use error::{SnError, SnResult};
pub use geo::{Point, Viewport};
pub use ids::{NodeId, SiteId, WaveId};
pub use rng::{SimRng, WaveRng};
pub use time::{FrameClock, SimClock, Tick, sanitize_dt};
