//! CSV trace backend.
//!
//! Creates two files in the configured output directory on `open`:
//! - `events.csv`
//! - `tick_summaries.csv`

use std::fs::File;
use std::path::{Path, PathBuf};

use csv::Writer;

use crate::sink::EventSink;
use crate::{EventRow, OutputError, OutputResult, TickSummaryRow};

const EVENT_HEADER: [&str; 5] = ["tick", "event", "worker", "order", "message"];
const SUMMARY_HEADER: [&str; 9] = [
    "tick",
    "active_orders",
    "completed_orders",
    "failed_orders",
    "clean_plates",
    "in_use_plates",
    "dirty_plates",
    "queued_tasks",
    "idle_workers",
];

struct Files {
    events:    Writer<File>,
    summaries: Writer<File>,
}

/// Writes the event trace to two CSV files.
pub struct CsvEventSink {
    dir:   PathBuf,
    files: Option<Files>,
}

impl CsvEventSink {
    /// A sink for `dir`.  Nothing is created until [`open`](EventSink::open).
    pub fn new(dir: &Path) -> Self {
        Self { dir: dir.to_path_buf(), files: None }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn is_open(&self) -> bool {
        self.files.is_some()
    }

    fn files(&mut self) -> OutputResult<&mut Files> {
        self.files.as_mut().ok_or(OutputError::NotOpen)
    }
}

/// Empty cell for `None`.
fn opt(v: Option<u32>) -> String {
    v.map(|v| v.to_string()).unwrap_or_default()
}

impl EventSink for CsvEventSink {
    fn open(&mut self) -> OutputResult<()> {
        if self.files.is_some() {
            return Ok(());
        }
        std::fs::create_dir_all(&self.dir)?;

        let mut events = Writer::from_path(self.dir.join("events.csv"))?;
        events.write_record(EVENT_HEADER)?;

        let mut summaries = Writer::from_path(self.dir.join("tick_summaries.csv"))?;
        summaries.write_record(SUMMARY_HEADER)?;

        self.files = Some(Files { events, summaries });
        Ok(())
    }

    fn write_events(&mut self, rows: &[EventRow]) -> OutputResult<()> {
        let files = self.files()?;
        for row in rows {
            files.events.write_record(&[
                row.tick.to_string(),
                row.event.to_owned(),
                opt(row.worker),
                opt(row.order),
                row.message.clone(),
            ])?;
        }
        Ok(())
    }

    fn write_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        let files = self.files()?;
        files.summaries.write_record(&[
            row.tick.to_string(),
            row.active_orders.to_string(),
            row.completed_orders.to_string(),
            row.failed_orders.to_string(),
            row.clean_plates.to_string(),
            row.in_use_plates.to_string(),
            row.dirty_plates.to_string(),
            row.queued_tasks.to_string(),
            row.idle_workers.to_string(),
        ])?;
        Ok(())
    }

    fn flush(&mut self) -> OutputResult<()> {
        let files = self.files()?;
        files.events.flush()?;
        files.summaries.flush()?;
        Ok(())
    }

    fn close(&mut self) -> OutputResult<()> {
        let Some(mut files) = self.files.take() else {
            return Ok(());
        };
        files.events.flush()?;
        files.summaries.flush()?;
        Ok(())
    }
}
