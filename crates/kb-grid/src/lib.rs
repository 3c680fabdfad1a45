//! `kb-grid`: kitchen floor layout and pathfinding.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                   |
//! |----------------|------------------------------------------------------------|
//! | [`layout`]     | `KitchenLayout`, `KitchenLayoutBuilder`, `StationSite`     |
//! | [`pathfinder`] | `Pathfinder` trait, `AStarPathfinder`                      |
//! | [`error`]      | `GridError`, `GridResult<T>`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod error;
pub mod layout;
pub mod pathfinder;

#[cfg(test)]
mod tests;

pub use error::{GridError, GridResult};
pub use layout::{KitchenLayout, KitchenLayoutBuilder, StationSite};
pub use pathfinder::{AStarPathfinder, Pathfinder};
