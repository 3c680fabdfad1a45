//! Kitchen observer trait for progress reporting and trace collection.

use kb_core::Tick;
use kb_model::{Outcome, TimedEvent};

/// Counters sampled at the end of every tick.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct TickSummary {
    pub tick: Tick,
    pub active_orders: usize,
    pub completed_orders: usize,
    pub failed_orders: usize,
    pub clean_plates: usize,
    pub in_use_plates: usize,
    pub dirty_plates: usize,
    /// Tasks still waiting in the coordinator's queue.
    pub queued_tasks: usize,
    pub idle_workers: usize,
}

/// Callbacks invoked by [`Kitchen::run`][crate::Kitchen::run] and
/// [`Kitchen::step`][crate::Kitchen::step] at key points in the tick.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: order ticker
///
/// ```rust,ignore
/// struct OrderTicker;
///
/// impl KitchenObserver for OrderTicker {
///     fn on_events(&mut self, _tick: Tick, events: &[TimedEvent]) {
///         for e in events {
///             if let KitchenEvent::OrderCompleted { order, .. } = &e.event {
///                 println!("{}: served {order}", e.tick);
///             }
///         }
///     }
/// }
/// ```
pub trait KitchenObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Every event recorded during `tick`, in the order it happened.
    fn on_events(&mut self, _tick: Tick, _events: &[TimedEvent]) {}

    /// Called at the end of each tick, after the win/lose check.
    fn on_tick_end(&mut self, _summary: &TickSummary) {}

    /// Called once when a run stops, either on an outcome or at `max_ticks`.
    fn on_finish(&mut self, _final_tick: Tick, _outcome: Option<Outcome>) {}
}

/// A [`KitchenObserver`] that does nothing.
pub struct NoopObserver;

impl KitchenObserver for NoopObserver {}
