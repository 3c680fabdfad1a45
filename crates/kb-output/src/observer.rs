//! `TraceObserver<S>`: bridges `KitchenObserver` to an `EventSink`.

use kb_core::Tick;
use kb_model::{Outcome, TimedEvent};
use kb_sim::{KitchenObserver, TickSummary};

use crate::row::{EventRow, TickSummaryRow};
use crate::sink::EventSink;
use crate::{OutputError, OutputResult};

/// A [`KitchenObserver`] that writes every event and tick summary to any
/// [`EventSink`] backend.
///
/// The sink is opened on construction and closed when the run finishes.
/// Errors from the sink are stored internally because `KitchenObserver`
/// methods have no return value.  After `kitchen.run()` returns, check for
/// errors with [`take_error`][Self::take_error].
pub struct TraceObserver<S: EventSink> {
    sink:       S,
    last_error: Option<OutputError>,
}

impl<S: EventSink> TraceObserver<S> {
    pub fn new(mut sink: S) -> Self {
        let last_error = sink.open().err();
        Self { sink, last_error }
    }

    /// Take the stored sink error (if any).
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Close the sink and hand it back.
    pub fn into_sink(mut self) -> S {
        // Already closed after a finished run; close is idempotent.
        let _ = self.sink.close();
        self.sink
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<S: EventSink> KitchenObserver for TraceObserver<S> {
    fn on_events(&mut self, _tick: Tick, events: &[TimedEvent]) {
        let rows: Vec<EventRow> = events.iter().map(EventRow::from).collect();
        let result = self.sink.write_events(&rows);
        self.store_err(result);
    }

    fn on_tick_end(&mut self, summary: &TickSummary) {
        let result = self.sink.write_summary(&TickSummaryRow::from(summary));
        self.store_err(result);
    }

    fn on_finish(&mut self, _final_tick: Tick, _outcome: Option<Outcome>) {
        let result = self.sink.flush().and_then(|()| self.sink.close());
        self.store_err(result);
    }
}
