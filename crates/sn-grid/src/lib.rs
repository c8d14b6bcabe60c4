//! `sn-grid`: the fixed hexagonal sensor network.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`axial`]   | `Axial` coordinates, `Direction` table                      |
//! | [`network`] | `HexGrid` (registry + adjacency + R-tree), `GridParams`     |
//! | [`error`]   | `GridError`, `GridResult<T>`                                |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod axial;
pub mod error;
pub mod network;

#[cfg(test)]
mod tests;

pub use axial::{Axial, Direction};
pub use error::{GridError, GridResult};
pub use network::{GridParams, HexGrid};
