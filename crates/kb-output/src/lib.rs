//! `kb-output`: event trace sinks for the kitchen brigade simulation.
//!
//! | Sink                 | Destination                                        |
//! |----------------------|----------------------------------------------------|
//! | [`CsvEventSink`]     | `events.csv`, `tick_summaries.csv` in a directory  |
//! | [`TracingEventSink`] | structured records on the `kitchen` tracing target |
//!
//! Both implement [`EventSink`] and are driven by [`TraceObserver`], which
//! implements `kb_sim::KitchenObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use kb_output::{CsvEventSink, TraceObserver};
//!
//! let mut obs = TraceObserver::new(CsvEventSink::new(Path::new("./trace")));
//! kitchen.run(&mut obs);
//! if let Some(e) = obs.take_error() {
//!     eprintln!("trace error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod sink;
pub mod trace;

#[cfg(test)]
mod tests;

pub use self::csv::CsvEventSink;
pub use error::{OutputError, OutputResult};
pub use observer::TraceObserver;
pub use row::{EventRow, TickSummaryRow};
pub use sink::EventSink;
pub use trace::TracingEventSink;
