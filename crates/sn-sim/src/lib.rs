//! `sn-sim`: the single owner of a seismonet simulation.
//!
//! # Frame step
//!
//! ```text
//! step(dt):
//!   ⓪ Clock    : sanitise dt (NaN/negative → 0, clamp to max_dt), advance.
//!   ① Waves    : advance every wave; retire those off the map afterwards.
//!   ② Sensors  : for each sensor, find the earliest wave covering it.
//!                 Already-detected sensors record motion; new hits are
//!                 queued.
//!   ③ Detect   : queued hits in ascending distance from the wave origin:
//!                   detect → report to the wave's triangulation → relay
//!                   flood → on lock: alert listeners and nearby sites.
//!   ④ Sites    : every site touched by a front resolves its race.
//! ```
//!
//! Everything the step reads or writes lives in [`Sim`]; nothing is global.
//! Presentation layers read state between steps through the snapshot types
//! and receive notifications through a [`SimObserver`].
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use sn_core::{Point, SimConfig};
//! use sn_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(SimConfig::default())
//!     .site("Rivertown", Point::new(420.0, 300.0))
//!     .build()?;
//! sim.add_wave_at(Point::new(350.0, 350.0), &mut NoopObserver)?;
//! for _ in 0..600 {
//!     sim.step(1.0 / 60.0, &mut NoopObserver);
//! }
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;
pub mod snapshot;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{DetectionEvent, NoopObserver, SimObserver, TickSummary};
pub use sim::Sim;
pub use snapshot::{NodeSnapshot, SiteSnapshot, TriangulationSnapshot, WaveSnapshot};
