//! The `EventSink` trait implemented by all trace backends.

use crate::{EventRow, OutputResult, TickSummaryRow};

/// Trait implemented by the CSV and `tracing` sinks.
///
/// Lifecycle: [`open`](Self::open) once, write any number of batches,
/// [`flush`](Self::flush) as needed, then [`close`](Self::close).  Writing to
/// a sink that is not open fails with [`OutputError::NotOpen`][crate::OutputError::NotOpen].
pub trait EventSink {
    /// Acquire the underlying handles and write any headers.
    fn open(&mut self) -> OutputResult<()>;

    /// Write one tick's batch of events.
    fn write_events(&mut self, rows: &[EventRow]) -> OutputResult<()>;

    /// Write one tick summary row.
    fn write_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    fn flush(&mut self) -> OutputResult<()>;

    /// Flush and release all handles.
    ///
    /// Idempotent: safe to call more than once, and on a sink never opened.
    fn close(&mut self) -> OutputResult<()>;
}
