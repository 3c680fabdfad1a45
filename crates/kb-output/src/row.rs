//! Plain data row types written by trace sinks.

use kb_model::TimedEvent;
use kb_sim::TickSummary;

/// One kitchen event, flattened for a trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRow {
    pub tick:    u64,
    /// Stable snake_case tag, e.g. `task_awarded`.
    pub event:   &'static str,
    /// Worker the event is about; `None` for kitchen-level events.
    pub worker:  Option<u32>,
    /// Order the event is about; `None` for maintenance work.
    pub order:   Option<u32>,
    /// Human-readable line, e.g. `cook 2 arrived at sink`.
    pub message: String,
}

impl From<&TimedEvent> for EventRow {
    fn from(e: &TimedEvent) -> Self {
        Self {
            tick:    e.tick.0,
            event:   e.event.label(),
            worker:  e.event.worker().map(|w| w.0),
            order:   e.event.order().map(|o| o.0),
            message: e.event.to_string(),
        }
    }
}

/// Kitchen counters at the end of one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:             u64,
    pub active_orders:    u64,
    pub completed_orders: u64,
    pub failed_orders:    u64,
    pub clean_plates:     u64,
    pub in_use_plates:    u64,
    pub dirty_plates:     u64,
    pub queued_tasks:     u64,
    pub idle_workers:     u64,
}

impl From<&TickSummary> for TickSummaryRow {
    fn from(s: &TickSummary) -> Self {
        Self {
            tick:             s.tick.0,
            active_orders:    s.active_orders as u64,
            completed_orders: s.completed_orders as u64,
            failed_orders:    s.failed_orders as u64,
            clean_plates:     s.clean_plates as u64,
            in_use_plates:    s.in_use_plates as u64,
            dirty_plates:     s.dirty_plates as u64,
            queued_tasks:     s.queued_tasks as u64,
            idle_workers:     s.idle_workers as u64,
        }
    }
}
