use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

/// Which driver produced a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MergeMode {
    /// Blocking pulls, no suspension.
    Sync,
    /// Suspending pulls on a cooperative scheduler.
    Async,
}

impl fmt::Display for MergeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sync => write!(f, "sync"),
            Self::Async => write!(f, "async"),
        }
    }
}

/// Outcome of a completed merge run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MergeSummary {
    pub mode: MergeMode,
    /// Number of sources handed to the driver, including empty ones.
    pub sources: usize,
    /// Number of entries delivered to the sink.
    pub entries: u64,
    /// Wall-clock time from the first pull to `done()`.
    pub elapsed: Duration,
}

impl MergeSummary {
    pub fn entries_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.entries as f64 / secs
        } else {
            0.0
        }
    }
}

/// Hook invoked once after a run completes and the sink has seen `done()`.
pub trait MergeObserver: Send + Sync {
    fn on_complete(&self, summary: &MergeSummary);
}

/// Observer that reports completion through `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LoggingObserver;

impl MergeObserver for LoggingObserver {
    fn on_complete(&self, summary: &MergeSummary) {
        info!(
            mode = %summary.mode,
            sources = summary.sources,
            entries = summary.entries,
            elapsed_ms = summary.elapsed.as_millis() as u64,
            "{} merge complete",
            summary.mode
        );
    }
}
