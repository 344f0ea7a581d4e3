use std::collections::VecDeque;

use async_trait::async_trait;
use logmerge_core::{AsyncLogSource, LogSource, SourceResult};
use logmerge_types::LogEntry;

/// In-memory source that yields a fixed list of entries front to back.
///
/// The caller is responsible for handing in entries in non-decreasing date
/// order. The async pull resolves immediately.
#[derive(Clone, Debug, Default)]
pub struct VecSource {
    entries: VecDeque<LogEntry>,
}

impl VecSource {
    pub fn new(entries: impl IntoIterator<Item = LogEntry>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Entries not yet pulled.
    pub fn remaining(&self) -> usize {
        self.entries.len()
    }

    pub fn is_drained(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look at the next entry without pulling it.
    pub fn peek(&self) -> Option<&LogEntry> {
        self.entries.front()
    }
}

impl FromIterator<LogEntry> for VecSource {
    fn from_iter<I: IntoIterator<Item = LogEntry>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl LogSource for VecSource {
    fn pop(&mut self) -> SourceResult<Option<LogEntry>> {
        Ok(self.entries.pop_front())
    }
}

#[async_trait]
impl AsyncLogSource for VecSource {
    async fn pop_async(&mut self) -> SourceResult<Option<LogEntry>> {
        Ok(self.entries.pop_front())
    }
}
