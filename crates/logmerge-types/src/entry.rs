use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::source::SourceId;

/// A single log line: a timestamp plus an opaque message.
///
/// Entries are immutable once built. Ownership moves from the producing
/// source to the merge frontier and then to the sink; nothing ever holds two
/// live references to the same entry.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LogEntry {
    date: DateTime<Utc>,
    msg: String,
}

impl LogEntry {
    /// Build an entry from a date and message.
    pub fn new(date: DateTime<Utc>, msg: impl Into<String>) -> Self {
        Self {
            date,
            msg: msg.into(),
        }
    }

    /// Build an entry from milliseconds since the UNIX epoch.
    pub fn from_millis(millis: i64, msg: impl Into<String>) -> Result<Self, TypeError> {
        let date = DateTime::<Utc>::from_timestamp_millis(millis)
            .ok_or(TypeError::TimestampOutOfRange { millis })?;
        Ok(Self::new(date, msg))
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn msg(&self) -> &str {
        &self.msg
    }

    /// Milliseconds since the UNIX epoch.
    pub fn timestamp_millis(&self) -> i64 {
        self.date.timestamp_millis()
    }

    /// Compare two entries by date only. The message never takes part.
    pub fn cmp_by_date(&self, other: &Self) -> Ordering {
        self.date.cmp(&other.date)
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.date.to_rfc3339(), self.msg)
    }
}

/// Total order used to pick the next entry across sources.
///
/// Ordering: `date` → `source` (lower registration index first).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MergeKey {
    pub date: DateTime<Utc>,
    pub source: SourceId,
}

impl MergeKey {
    pub fn new(entry: &LogEntry, source: SourceId) -> Self {
        Self {
            date: entry.date,
            source,
        }
    }
}

impl PartialOrd for MergeKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MergeKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.date
            .cmp(&other.date)
            .then(self.source.cmp(&other.source))
    }
}
