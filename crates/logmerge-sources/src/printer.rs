use std::fmt;
use std::io::{self, Write};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use logmerge_core::LogSink;
use logmerge_types::LogEntry;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// How a [`PrinterSink`] renders each entry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `<rfc3339 date> <message>`
    #[default]
    Text,
    /// One JSON object per line, readable by `JsonLinesSource`.
    Json,
}

/// Statistics kept by a [`PrinterSink`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PrinterStats {
    pub printed: u64,
    /// Entries whose date was earlier than the entry printed before them.
    pub out_of_order: u64,
    pub first_date: Option<DateTime<Utc>>,
    pub last_date: Option<DateTime<Utc>>,
    pub elapsed: Duration,
    pub done: bool,
}

impl PrinterStats {
    pub fn entries_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.printed as f64 / secs
        } else {
            0.0
        }
    }
}

impl fmt::Display for PrinterStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Logs printed:    {}", self.printed)?;
        writeln!(f, "Time taken (s):  {:.3}", self.elapsed.as_secs_f64())?;
        writeln!(f, "Logs/s:          {:.1}", self.entries_per_second())?;
        if let (Some(first), Some(last)) = (self.first_date, self.last_date) {
            writeln!(f, "Span:            {} .. {}", first.to_rfc3339(), last.to_rfc3339())?;
        }
        write!(f, "Out of order:    {}", self.out_of_order)
    }
}

/// Sink that writes each entry to `W` and keeps run statistics.
///
/// `print` cannot fail, so the first write error is logged, kept for
/// [`PrinterSink::take_error`], and all further output is dropped, even after
/// the error has been taken.
pub struct PrinterSink<W: Write> {
    out: W,
    format: OutputFormat,
    stats: PrinterStats,
    started: Instant,
    error: Option<io::Error>,
    failed: bool,
}

impl<W: Write> PrinterSink<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self {
            out,
            format,
            stats: PrinterStats::default(),
            started: Instant::now(),
            error: None,
            failed: false,
        }
    }

    pub fn stats(&self) -> &PrinterStats {
        &self.stats
    }

    /// The first write error seen, if any. Output stays disabled afterwards.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_entry(&mut self, entry: &LogEntry) -> io::Result<()> {
        match self.format {
            OutputFormat::Text => writeln!(self.out, "{entry}"),
            OutputFormat::Json => {
                serde_json::to_writer(&mut self.out, entry)?;
                writeln!(self.out)
            }
        }
    }

    fn record_error(&mut self, err: io::Error) {
        warn!(error = %err, "printer output failed; dropping further entries");
        self.error = Some(err);
        self.failed = true;
    }

    /// A write has failed and output is disabled.
    pub fn has_failed(&self) -> bool {
        self.failed
    }
}

impl<W: Write> LogSink for PrinterSink<W> {
    fn print(&mut self, entry: LogEntry) {
        let date = entry.date();
        if self.stats.last_date.is_some_and(|last| date < last) {
            self.stats.out_of_order += 1;
        }
        self.stats.first_date.get_or_insert(date);
        self.stats.last_date = Some(date);
        self.stats.printed += 1;

        if !self.failed {
            if let Err(err) = self.write_entry(&entry) {
                self.record_error(err);
            }
        }
    }

    fn done(&mut self) {
        self.stats.elapsed = self.started.elapsed();
        self.stats.done = true;
        if !self.failed {
            if let Err(err) = self.out.flush() {
                self.record_error(err);
            }
        }
        info!(
            printed = self.stats.printed,
            out_of_order = self.stats.out_of_order,
            elapsed_ms = self.stats.elapsed.as_millis() as u64,
            "printer done"
        );
    }
}

impl<W: Write> fmt::Debug for PrinterSink<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrinterSink")
            .field("format", &self.format)
            .field("stats", &self.stats)
            .finish()
    }
}
