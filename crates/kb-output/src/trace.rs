//! `tracing` trace backend: every event becomes a structured `info!` record
//! on the `kitchen` target, every tick summary a `debug!` record.

use tracing::{debug, info};

use crate::sink::EventSink;
use crate::{EventRow, OutputError, OutputResult, TickSummaryRow};

/// Forwards the trace to whatever `tracing` subscriber is installed.
#[derive(Debug, Default)]
pub struct TracingEventSink {
    open:    bool,
    written: u64,
}

impl TracingEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events forwarded so far.
    pub fn written(&self) -> u64 {
        self.written
    }

    fn ensure_open(&self) -> OutputResult<()> {
        if self.open { Ok(()) } else { Err(OutputError::NotOpen) }
    }
}

impl EventSink for TracingEventSink {
    fn open(&mut self) -> OutputResult<()> {
        self.open = true;
        Ok(())
    }

    fn write_events(&mut self, rows: &[EventRow]) -> OutputResult<()> {
        self.ensure_open()?;
        for row in rows {
            info!(
                target: "kitchen",
                tick = row.tick,
                event = row.event,
                worker = row.worker,
                order = row.order,
                "{}",
                row.message
            );
        }
        self.written += rows.len() as u64;
        Ok(())
    }

    fn write_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.ensure_open()?;
        debug!(
            target: "kitchen",
            tick = row.tick,
            active = row.active_orders,
            completed = row.completed_orders,
            failed = row.failed_orders,
            clean = row.clean_plates,
            dirty = row.dirty_plates,
            "tick summary"
        );
        Ok(())
    }

    fn flush(&mut self) -> OutputResult<()> {
        self.ensure_open()
    }

    fn close(&mut self) -> OutputResult<()> {
        self.open = false;
        Ok(())
    }
}
