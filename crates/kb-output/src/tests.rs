//! Integration tests for kb-output.

#[cfg(test)]
mod helpers {
    use kb_core::{OrderId, StationKind, Tick, WorkerId};
    use kb_model::{KitchenEvent, TimedEvent};

    use crate::row::{EventRow, TickSummaryRow};

    pub fn arrived(tick: u64, worker: u32) -> EventRow {
        EventRow::from(&TimedEvent {
            tick: Tick(tick),
            event: KitchenEvent::Arrived { worker: WorkerId(worker), station: StationKind::Sink },
        })
    }

    pub fn failed(tick: u64, order: u32) -> EventRow {
        EventRow::from(&TimedEvent {
            tick: Tick(tick),
            event: KitchenEvent::OrderFailed { order: OrderId(order), recipe: "pizza".into() },
        })
    }

    pub fn summary(tick: u64) -> TickSummaryRow {
        TickSummaryRow {
            tick,
            active_orders: 2,
            completed_orders: 1,
            failed_orders: 0,
            clean_plates: 5,
            in_use_plates: 2,
            dirty_plates: 1,
            queued_tasks: 3,
            idle_workers: 1,
        }
    }
}

// ── Rows ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod row_tests {
    use super::helpers::*;

    #[test]
    fn event_row_flattens_ids() {
        let row = arrived(4, 2);
        assert_eq!(row.tick, 4);
        assert_eq!(row.event, "arrived");
        assert_eq!(row.worker, Some(2));
        assert_eq!(row.order, None);
        assert_eq!(row.message, "cook 2 arrived at sink");

        let row = failed(9, 3);
        assert_eq!(row.worker, None);
        assert_eq!(row.order, Some(3));
    }
}

// ── CSV ───────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use super::helpers::*;
    use crate::csv::CsvEventSink;
    use crate::sink::EventSink;
    use crate::OutputError;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn read(path: std::path::PathBuf) -> (Vec<String>, Vec<csv::StringRecord>) {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        let headers = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        let rows = rdr.records().map(|r| r.unwrap()).collect();
        (headers, rows)
    }

    #[test]
    fn files_created_on_open() {
        let dir = tmp();
        let mut sink = CsvEventSink::new(dir.path());
        assert!(!dir.path().join("events.csv").exists());
        sink.open().unwrap();
        assert!(sink.is_open());
        assert!(dir.path().join("events.csv").exists());
        assert!(dir.path().join("tick_summaries.csv").exists());
    }

    #[test]
    fn open_creates_missing_directory() {
        let dir = tmp();
        let nested = dir.path().join("runs").join("seed-7");
        let mut sink = CsvEventSink::new(&nested);
        sink.open().unwrap();
        assert!(nested.join("events.csv").exists());
    }

    #[test]
    fn headers_correct() {
        let dir = tmp();
        let mut sink = CsvEventSink::new(dir.path());
        sink.open().unwrap();
        sink.close().unwrap();

        let (headers, rows) = read(dir.path().join("events.csv"));
        assert_eq!(headers, ["tick", "event", "worker", "order", "message"]);
        assert!(rows.is_empty());

        let (headers, _) = read(dir.path().join("tick_summaries.csv"));
        assert_eq!(headers[0], "tick");
        assert_eq!(headers.len(), 9);
    }

    #[test]
    fn events_written_in_order() {
        let dir = tmp();
        let mut sink = CsvEventSink::new(dir.path());
        sink.open().unwrap();
        sink.write_events(&[arrived(1, 0), failed(1, 5)]).unwrap();
        sink.write_events(&[arrived(2, 1)]).unwrap();
        sink.close().unwrap();

        let (_, rows) = read(dir.path().join("events.csv"));
        assert_eq!(rows.len(), 3);
        assert_eq!(&rows[0][1], "arrived");
        assert_eq!(&rows[0][2], "0");
        assert_eq!(&rows[0][3], "");
        assert_eq!(&rows[1][1], "order_failed");
        assert_eq!(&rows[1][2], "");
        assert_eq!(&rows[1][3], "5");
        assert_eq!(&rows[2][0], "2");
        assert_eq!(&rows[2][4], "cook 1 arrived at sink");
    }

    #[test]
    fn summary_written() {
        let dir = tmp();
        let mut sink = CsvEventSink::new(dir.path());
        sink.open().unwrap();
        sink.write_summary(&summary(3)).unwrap();
        sink.flush().unwrap();
        sink.close().unwrap();

        let (_, rows) = read(dir.path().join("tick_summaries.csv"));
        assert_eq!(rows.len(), 1);
        let cells: Vec<&str> = rows[0].iter().collect();
        assert_eq!(cells, ["3", "2", "1", "0", "5", "2", "1", "3", "1"]);
    }

    #[test]
    fn write_before_open_fails() {
        let dir = tmp();
        let mut sink = CsvEventSink::new(dir.path());
        assert!(matches!(sink.write_events(&[arrived(1, 0)]), Err(OutputError::NotOpen)));
        assert!(matches!(sink.flush(), Err(OutputError::NotOpen)));
    }

    #[test]
    fn close_idempotent() {
        let dir = tmp();
        let mut sink = CsvEventSink::new(dir.path());
        sink.close().unwrap(); // never opened
        sink.open().unwrap();
        sink.close().unwrap();
        sink.close().unwrap();
        assert!(!sink.is_open());
        assert!(matches!(sink.write_summary(&summary(1)), Err(OutputError::NotOpen)));
    }

    #[test]
    fn empty_batch_ok() {
        let dir = tmp();
        let mut sink = CsvEventSink::new(dir.path());
        sink.open().unwrap();
        sink.write_events(&[]).unwrap();
    }
}

// ── tracing ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tracing_tests {
    use super::helpers::*;
    use crate::sink::EventSink;
    use crate::trace::TracingEventSink;
    use crate::OutputError;

    #[test]
    fn lifecycle() {
        let mut sink = TracingEventSink::new();
        assert!(matches!(sink.write_events(&[arrived(1, 0)]), Err(OutputError::NotOpen)));

        sink.open().unwrap();
        sink.write_events(&[arrived(1, 0), failed(1, 2)]).unwrap();
        sink.write_summary(&summary(1)).unwrap();
        sink.flush().unwrap();
        assert_eq!(sink.written(), 2);

        sink.close().unwrap();
        sink.close().unwrap();
        assert!(sink.flush().is_err());
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use kb_core::KitchenConfig;
    use kb_sim::{KitchenBuilder, KitchenObserver, TickSummary};

    use crate::csv::CsvEventSink;
    use crate::observer::TraceObserver;
    use crate::row::{EventRow, TickSummaryRow};
    use crate::sink::EventSink;
    use crate::trace::TracingEventSink;
    use crate::{OutputError, OutputResult};

    #[test]
    fn csv_trace_of_a_short_run() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config = KitchenConfig { max_ticks: 40, ..KitchenConfig::with_seed(8) };
        let mut kitchen = KitchenBuilder::new(config).build().unwrap();

        let mut obs = TraceObserver::new(CsvEventSink::new(dir.path()));
        kitchen.run(&mut obs);
        assert!(obs.take_error().is_none());
        assert!(!obs.sink().is_open(), "closed at the end of the run");

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        assert_eq!(rdr.records().count() as u64, kitchen.now().0);

        // The first order always arrives within 25 ticks.
        let mut rdr = csv::Reader::from_path(dir.path().join("events.csv")).unwrap();
        let events: Vec<String> = rdr.records().map(|r| r.unwrap()[1].to_owned()).collect();
        assert!(events.iter().any(|e| e == "order_created"));
        assert!(events.iter().any(|e| e == "task_awarded"));
    }

    #[test]
    fn tracing_observer_counts_events() {
        let config = KitchenConfig { max_ticks: 30, ..KitchenConfig::with_seed(8) };
        let mut kitchen = KitchenBuilder::new(config).build().unwrap();
        let mut obs = TraceObserver::new(TracingEventSink::new());
        kitchen.run(&mut obs);
        assert!(obs.take_error().is_none());
        assert!(obs.into_sink().written() > 0);
    }

    /// Fails to open, then rejects every write.
    #[derive(Default)]
    struct Broken {
        calls: u32,
    }

    impl EventSink for Broken {
        fn open(&mut self) -> OutputResult<()> {
            Err(std::io::Error::other("disk gone").into())
        }

        fn write_events(&mut self, _rows: &[EventRow]) -> OutputResult<()> {
            self.calls += 1;
            Err(OutputError::NotOpen)
        }

        fn write_summary(&mut self, _row: &TickSummaryRow) -> OutputResult<()> {
            self.calls += 1;
            Err(OutputError::NotOpen)
        }

        fn flush(&mut self) -> OutputResult<()> {
            Err(OutputError::NotOpen)
        }

        fn close(&mut self) -> OutputResult<()> {
            Ok(())
        }
    }

    #[test]
    fn first_error_is_kept() {
        let mut obs = TraceObserver::new(Broken::default());
        obs.on_tick_end(&TickSummary::default());
        obs.on_tick_end(&TickSummary::default());
        assert_eq!(obs.sink().calls, 2);

        assert!(matches!(obs.take_error(), Some(OutputError::Io(_))));
        assert!(obs.take_error().is_none());

        obs.on_tick_end(&TickSummary::default());
        assert!(matches!(obs.take_error(), Some(OutputError::NotOpen)));
    }
}
