//! `kb-core`: foundational types for the kitchen brigade simulation.
//!
//! This crate is a dependency of every other `kb-*` crate.  It has no `kb-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                  |
//! |------------|-----------------------------------------------------------|
//! | [`ids`]    | `WorkerId`, `StationId`, `OrderId`, `TaskId`, `PlateId`   |
//! | [`geo`]    | `GridPos`, Manhattan distance, 4-neighbourhood            |
//! | [`time`]   | `Tick`                                                    |
//! | [`kind`]   | `StationKind`, `TaskKind`                                 |
//! | [`rng`]    | `SimRng` (seeded, run-global)                             |
//! | [`config`] | `KitchenConfig`, `ActivationMode`                         |
//! | [`error`]  | `CoreError`, `CoreResult`                                 |
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
pub mod kind;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{ActivationMode, KitchenConfig};
pub use error::{CoreError, CoreResult};
pub use geo::GridPos;
pub use ids::{OrderId, PlateId, StationId, TaskId, WorkerId};
pub use kind::{StationKind, TaskKind};
pub use rng::SimRng;
pub use time::Tick;
