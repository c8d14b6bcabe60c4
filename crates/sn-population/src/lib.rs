//! `sn-population`: named places that need warning.
//!
//! # Crate layout
//!
//! | Module       | Contents                                         |
//! |--------------|--------------------------------------------------|
//! | [`site`]     | `Site`, `SiteState`: the alert/evacuation race  |
//! | [`registry`] | `SiteRegistry`: sites keyed by unique name       |
//! | [`error`]    | `PopulationError`, `PopulationResult<T>`          |
//!
//! # The race
//!
//! ```text
//! calm ──lock──► alerting ──front arrives──┬─ now - start <  evacuation → affected
//!   │                                      └─ now - start >= evacuation → safe
//!   └──front arrives──────────────────────────────────────────────────► affected
//! ```
//!
//! `affected` and `safe` are terminal until the registry is reset.

pub mod error;
pub mod registry;
pub mod site;


pub use error::{PopulationError, PopulationResult};
pub use registry::SiteRegistry;
pub use site::{Site, SiteState};
