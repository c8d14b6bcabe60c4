//! `sn-relay`: what every sensor knows about the current event cycle.
//!
//! # Crate layout
//!
//! | Module    | Contents                                                   |
//! |-----------|------------------------------------------------------------|
//! | [`state`] | `NodeState`, `MotionSample`                                |
//! | [`store`] | `SensorStore`: SoA per-node state, detection, relay flood |
//!
//! # State machine
//!
//! ```text
//!            hit by a wave
//!   sensing ───────────────────────────────┐
//!      │ informed by a neighbor            ▼
//!      └──────────► listening ──────────► detected
//!                       │ estimator lock     ▲
//!                       └──► alerted ────────┘
//! ```
//!
//! Detection order and origin detector are assigned once per cycle; a cycle
//! ends only when the store is reset (network rebuild, clear, or an explicit
//! detection reset).

pub mod state;
pub mod store;


pub use state::{MotionSample, NodeState};
pub use store::SensorStore;
