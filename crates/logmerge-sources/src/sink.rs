use logmerge_core::LogSink;
use logmerge_types::LogEntry;

/// Sink that keeps every entry it is given, in delivery order.
#[derive(Clone, Debug, Default)]
pub struct CollectingSink {
    entries: Vec<LogEntry>,
    done_calls: usize,
    printed_after_done: usize,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// How many times `done` has been called.
    pub fn done_calls(&self) -> usize {
        self.done_calls
    }

    /// Entries delivered after `done`; always zero for a correct driver.
    pub fn printed_after_done(&self) -> usize {
        self.printed_after_done
    }

    /// Delivered dates never went backwards.
    pub fn is_chronological(&self) -> bool {
        self.entries.windows(2).all(|w| w[0].date() <= w[1].date())
    }
}

impl LogSink for CollectingSink {
    fn print(&mut self, entry: LogEntry) {
        if self.done_calls > 0 {
            self.printed_after_done += 1;
        }
        self.entries.push(entry);
    }

    fn done(&mut self) {
        self.done_calls += 1;
    }
}
