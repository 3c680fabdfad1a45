//! Run configuration.
//!
//! `KitchenConfig` carries every tunable the kitchen reads: grid size, agent
//! count, order arrival window, win/lose thresholds, plate stock, wait
//! ceilings and bid weights.  Typically loaded from JSON by the application
//! crate (missing fields fall back to [`KitchenConfig::default`]) and handed to
//! `KitchenBuilder`.

use crate::{CoreError, CoreResult};

// ── ActivationMode ────────────────────────────────────────────────────────────

/// How agents are ordered within a tick.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ActivationMode {
    /// A fresh seeded permutation of all agents every tick.
    #[default]
    Shuffled,
    /// Coordinator first, then workers in id order.  Pins activation for
    /// tests that need a fixed contention outcome.
    InOrder,
}

// ── KitchenConfig ─────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct KitchenConfig {
    /// Grid columns.  Default: 12.
    pub grid_width: u32,
    /// Grid rows.  Default: 10.
    pub grid_height: u32,

    /// Number of worker agents (the coordinator is extra).  Default: 4.
    pub worker_count: u32,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Hard stop for `Kitchen::run` if neither threshold is reached.
    pub max_ticks: u64,

    /// Cells a worker may advance per tick.  Default: 2.
    pub movement_budget: u32,

    /// Inclusive bounds on ticks between automatic order arrivals.
    pub order_interval_min: u64,
    pub order_interval_max: u64,

    /// Disable to drive orders exclusively through `Kitchen::inject_order`.
    pub auto_orders: bool,

    /// Completed orders needed to win.  Default: 10.
    pub win_threshold: usize,
    /// Failed orders that end the game as a loss.  Default: 3.
    pub lose_threshold: usize,

    pub total_plates: u32,
    /// The dish-shortage watchdog fires when clean plates drop below this.
    pub min_clean_plates: usize,

    /// Ticks a worker waits on a held station before the reassignment hook
    /// is consulted.
    pub max_resource_wait: u32,
    /// Ticks a worker waits on a blocked path cell before a full repath.
    pub max_path_wait: u32,

    /// Bid score weights: `distance_weight * distance + workload_weight * workload`.
    pub distance_weight: f64,
    pub workload_weight: f64,

    /// Distance bid used when no station of the required kind exists.
    pub unreachable_distance: u32,

    pub activation: ActivationMode,
}

impl Default for KitchenConfig {
    fn default() -> Self {
        Self {
            grid_width: 12,
            grid_height: 10,
            worker_count: 4,
            seed: 0,
            max_ticks: 500,
            movement_budget: 2,
            order_interval_min: 15,
            order_interval_max: 25,
            auto_orders: true,
            win_threshold: 10,
            lose_threshold: 3,
            total_plates: 8,
            min_clean_plates: 2,
            max_resource_wait: 20,
            max_path_wait: 5,
            distance_weight: 0.3,
            workload_weight: 0.7,
            unreachable_distance: 20,
            activation: ActivationMode::Shuffled,
        }
    }
}

impl KitchenConfig {
    /// Same as `default()` but with an explicit seed.
    pub fn with_seed(seed: u64) -> Self {
        Self { seed, ..Self::default() }
    }

    /// Reject configurations the tick loop cannot run with.
    pub fn validate(&self) -> CoreResult<()> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(CoreError::Config(format!(
                "grid must be non-empty, got {}x{}",
                self.grid_width, self.grid_height
            )));
        }
        if self.worker_count == 0 {
            return Err(CoreError::Config("worker_count must be at least 1".into()));
        }
        if self.movement_budget == 0 {
            return Err(CoreError::Config("movement_budget must be at least 1".into()));
        }
        if self.order_interval_min > self.order_interval_max {
            return Err(CoreError::Config(format!(
                "order_interval_min ({}) exceeds order_interval_max ({})",
                self.order_interval_min, self.order_interval_max
            )));
        }
        if self.win_threshold == 0 || self.lose_threshold == 0 {
            return Err(CoreError::Config("win/lose thresholds must be at least 1".into()));
        }
        if !(self.distance_weight.is_finite() && self.workload_weight.is_finite()) {
            return Err(CoreError::Config("bid weights must be finite".into()));
        }
        Ok(())
    }

    /// Number of grid cells.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.grid_width as usize * self.grid_height as usize
    }
}
