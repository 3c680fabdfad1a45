//! `kb-model`: the kitchen's shared mutable world.
//!
//! Everything agents read and write lives here, in id-indexed arenas:
//! orders and their tasks, stations with their occupancy state machines, and
//! the plate rack.  Agents never hold references into this state across
//! ticks; they hold ids and look them up.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                   |
//! |-------------|------------------------------------------------------------|
//! | [`task`]    | `TaskTemplate`, `Task`, `TaskStatus`, `TaskStore`          |
//! | [`recipe`]  | `Recipe`, `RecipeCatalog` (+ standard six-dish menu)       |
//! | [`loader`]  | `load_catalog_csv`, `load_catalog_reader`                  |
//! | [`order`]   | `Order`, `OrderStatus`, `OrderBook`                        |
//! | [`station`] | `Station`, `StationState`, `StationStore`, `CookingDone`   |
//! | [`plate`]   | `Plate`, `PlateState`, `PlateRack`                         |
//! | [`event`]   | `KitchenEvent`, `TimedEvent`, `EventLog`, `Outcome`        |
//! | [`state`]   | `KitchenState` (the aggregate agents mutate)               |
//! | [`error`]   | `ModelError`, `ModelResult<T>`                             |

pub mod error;
pub mod event;
pub mod loader;
pub mod order;
pub mod plate;
pub mod recipe;
pub mod state;
pub mod station;
pub mod task;

#[cfg(test)]
mod tests;

pub use error::{ModelError, ModelResult};
pub use event::{BidRecord, EventLog, KitchenEvent, Outcome, TimedEvent};
pub use loader::{load_catalog_csv, load_catalog_reader};
pub use order::{Order, OrderBook, OrderStatus};
pub use plate::{Plate, PlateRack, PlateState};
pub use recipe::{Recipe, RecipeCatalog};
pub use state::KitchenState;
pub use station::{CookingDone, Station, StationState, StationStore};
pub use task::{Task, TaskStatus, TaskStore, TaskTemplate};
