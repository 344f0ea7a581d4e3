//! Scripted sources and a recording sink shared by the driver tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use logmerge_types::LogEntry;

use crate::error::{SourceError, SourceResult};
use crate::traits::{AsyncLogSource, LogSink, LogSource};

pub(crate) fn entries(tag: &str, millis: &[i64]) -> Vec<LogEntry> {
    millis
        .iter()
        .map(|&ms| LogEntry::from_millis(ms, format!("{tag}@{ms}")).unwrap())
        .collect()
}

/// Counts async pulls that have started but not yet resolved, shared by
/// every source in a run.
#[derive(Debug, Default)]
pub(crate) struct InFlight {
    current: AtomicUsize,
    peak: AtomicUsize,
}

impl InFlight {
    fn enter(&self) {
        let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
    }

    fn leave(&self) {
        self.current.fetch_sub(1, Ordering::SeqCst);
    }

    pub(crate) fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    /// Forget the peak so far; the next peak starts from the current count.
    pub(crate) fn reset_peak(&self) {
        self.peak
            .store(self.current.load(Ordering::SeqCst), Ordering::SeqCst);
    }
}

/// Source that replays a fixed list, optionally sleeping before each async
/// pull and optionally failing on a given pull.
#[derive(Debug, Default)]
pub(crate) struct ScriptedSource {
    entries: VecDeque<LogEntry>,
    delays: VecDeque<Duration>,
    fail_on_pull: Option<usize>,
    in_flight: Option<Arc<InFlight>>,
    pulls: usize,
    exhausted: bool,
    pub(crate) pulls_after_exhausted: usize,
}

impl ScriptedSource {
    pub(crate) fn new(entries: Vec<LogEntry>) -> Self {
        Self {
            entries: entries.into(),
            ..Default::default()
        }
    }

    pub(crate) fn with_delays(mut self, delays_ms: &[u64]) -> Self {
        self.delays = delays_ms.iter().map(|&ms| Duration::from_millis(ms)).collect();
        self
    }

    pub(crate) fn tracking(mut self, in_flight: &Arc<InFlight>) -> Self {
        self.in_flight = Some(Arc::clone(in_flight));
        self
    }

    /// Fail on the `pull`-th pull (zero-based).
    pub(crate) fn failing_on(mut self, pull: usize) -> Self {
        self.fail_on_pull = Some(pull);
        self
    }

    fn next_entry(&mut self) -> SourceResult<Option<LogEntry>> {
        let pull = self.pulls;
        self.pulls += 1;
        if self.fail_on_pull == Some(pull) {
            return Err(SourceError::Other(format!("scripted failure on pull {pull}")));
        }
        if self.exhausted {
            self.pulls_after_exhausted += 1;
        }
        let next = self.entries.pop_front();
        if next.is_none() {
            self.exhausted = true;
        }
        Ok(next)
    }
}

impl LogSource for ScriptedSource {
    fn pop(&mut self) -> SourceResult<Option<LogEntry>> {
        self.next_entry()
    }
}

#[async_trait]
impl AsyncLogSource for ScriptedSource {
    async fn pop_async(&mut self) -> SourceResult<Option<LogEntry>> {
        if let Some(in_flight) = &self.in_flight {
            in_flight.enter();
        }
        if let Some(delay) = self.delays.pop_front() {
            tokio::time::sleep(delay).await;
        }
        if let Some(in_flight) = &self.in_flight {
            in_flight.leave();
        }
        self.next_entry()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum SinkEvent {
    Print(LogEntry),
    Done,
}

#[derive(Debug, Default)]
pub(crate) struct RecordingSink {
    pub(crate) events: Vec<SinkEvent>,
}

impl RecordingSink {
    pub(crate) fn printed(&self) -> Vec<LogEntry> {
        self.events
            .iter()
            .filter_map(|event| match event {
                SinkEvent::Print(entry) => Some(entry.clone()),
                SinkEvent::Done => None,
            })
            .collect()
    }

    pub(crate) fn printed_messages(&self) -> Vec<String> {
        self.printed().iter().map(|e| e.msg().to_string()).collect()
    }

    pub(crate) fn done_count(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, SinkEvent::Done))
            .count()
    }

    /// `done` was called once and nothing was printed after it.
    pub(crate) fn finished_cleanly(&self) -> bool {
        self.done_count() == 1 && self.events.last() == Some(&SinkEvent::Done)
    }
}

impl LogSink for RecordingSink {
    fn print(&mut self, entry: LogEntry) {
        self.events.push(SinkEvent::Print(entry));
    }

    fn done(&mut self) {
        self.events.push(SinkEvent::Done);
    }
}
