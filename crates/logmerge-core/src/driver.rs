use std::time::Instant;

use chrono::{DateTime, Utc};
use logmerge_types::{LogEntry, SourceId};
use tracing::{debug, warn};

use crate::config::DriverConfig;
use crate::error::{MergeError, MergeResult, SourceResult};
use crate::frontier::{Frontier, FrontierItem};
use crate::observer::{MergeMode, MergeObserver, MergeSummary};
use crate::traits::LogSink;

/// Orchestrates a merge: seeds the frontier from every source, then emits
/// the globally earliest entry and refills from its source until the
/// frontier drains.
///
/// The driver borrows sources and the sink for one run and owns nothing
/// that outlives it. See [`MergeDriver::run_sync`] and
/// [`MergeDriver::run_async`].
#[derive(Default)]
pub struct MergeDriver {
    config: DriverConfig,
    observers: Vec<Box<dyn MergeObserver>>,
}

impl MergeDriver {
    pub fn new(config: DriverConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Attach a completion hook. Observers run in attachment order.
    pub fn with_observer(mut self, observer: impl MergeObserver + 'static) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    pub(crate) fn begin(&self, mode: MergeMode, sources: usize) -> Run<'_> {
        debug!(%mode, sources, "merge started");
        Run {
            mode,
            sources,
            frontier: Frontier::with_capacity(sources),
            emitted: 0,
            started: Instant::now(),
            config: &self.config,
        }
    }

    pub(crate) fn complete<K: LogSink + ?Sized>(&self, run: Run<'_>, sink: &mut K) -> MergeSummary {
        sink.done();
        let summary = MergeSummary {
            mode: run.mode,
            sources: run.sources,
            entries: run.emitted,
            elapsed: run.started.elapsed(),
        };
        for observer in &self.observers {
            observer.on_complete(&summary);
        }
        summary
    }
}

impl std::fmt::Debug for MergeDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MergeDriver")
            .field("config", &self.config)
            .field("observers", &self.observers.len())
            .finish()
    }
}

/// State of one merge run. Shared by both drivers so the sync and async
/// loops differ only in how they pull.
pub(crate) struct Run<'a> {
    mode: MergeMode,
    sources: usize,
    frontier: Frontier,
    emitted: u64,
    started: Instant,
    config: &'a DriverConfig,
}

impl Run<'_> {
    /// Record the result of a source's first pull.
    pub(crate) fn seed(&mut self, source: SourceId, pulled: SourceResult<Option<LogEntry>>) -> MergeResult<()> {
        match pulled.map_err(|e| MergeError::source_failed(source, e))? {
            Some(entry) => self.frontier.insert(FrontierItem::new(entry, source)),
            None => debug!(%source, "source empty at start"),
        }
        Ok(())
    }

    /// Remove the next entry to emit, or `None` once every source is
    /// exhausted.
    pub(crate) fn pop_next(&mut self) -> Option<FrontierItem> {
        if self.frontier.is_empty() {
            return None;
        }
        let item = self
            .frontier
            .extract_min()
            .expect("extract_min on a frontier checked non-empty");
        Some(item)
    }

    /// Count a delivered entry.
    pub(crate) fn emitted(&mut self) {
        self.emitted += 1;
        let interval = self.config.progress_interval;
        if interval > 0 && self.emitted % interval == 0 {
            debug!(
                mode = %self.mode,
                entries = self.emitted,
                pending = self.frontier.len(),
                "merge progress"
            );
        }
    }

    /// Record the result of pulling again from `source` after emitting an
    /// entry dated `previous`.
    ///
    /// A refill dated before `previous` breaks the caller's ordering
    /// contract. It is logged and merged anyway; the output is then no longer
    /// globally ordered.
    pub(crate) fn refill(
        &mut self,
        source: SourceId,
        previous: DateTime<Utc>,
        pulled: SourceResult<Option<LogEntry>>,
    ) -> MergeResult<()> {
        match pulled.map_err(|e| MergeError::source_failed(source, e))? {
            Some(entry) => {
                if entry.date() < previous {
                    warn!(
                        %source,
                        date = %entry.date(),
                        previous = %previous,
                        "source went backwards in time"
                    );
                }
                self.frontier.insert(FrontierItem::new(entry, source));
            }
            None => debug!(%source, "source exhausted"),
        }
        Ok(())
    }
}
