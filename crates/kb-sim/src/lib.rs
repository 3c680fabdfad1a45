//! `kb-sim`: tick loop orchestrator for the kitchen brigade simulation.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 1..=config.max_ticks, until an outcome:
//!   ① Countdowns: active orders lose a tick (timeouts fail, plates go
//!                  dirty); cooking stations count down and finished cooks
//!                  are reported to the coordinator.
//!   ② Arrivals:   open an order for a random recipe when one is due.
//!   ③ Activation: coordinator and workers each act once, in a seeded
//!                  permutation.  Workers hand finished tasks back to the
//!                  coordinator.
//!   ④ Outcome:    lose at failed ≥ lose_threshold, else win at
//!                  completed ≥ win_threshold.
//!   then drain the event buffer to the observer.
//! ```
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use kb_core::KitchenConfig;
//! use kb_sim::{KitchenBuilder, NoopObserver};
//!
//! let mut kitchen = KitchenBuilder::new(KitchenConfig::with_seed(42)).build()?;
//! let outcome = kitchen.run(&mut NoopObserver);
//! ```

pub mod builder;
pub mod error;
pub mod kitchen;
pub mod observer;


pub use builder::KitchenBuilder;
pub use error::{SimError, SimResult};
pub use kitchen::Kitchen;
pub use observer::{KitchenObserver, NoopObserver, TickSummary};
