use async_trait::async_trait;
use logmerge_types::LogEntry;

use crate::error::SourceResult;

/// A blocking, immediately-available source of log entries.
///
/// Implementations must yield entries in non-decreasing date order. The
/// drivers rely on this and do not re-check it in release builds; a source
/// that goes backwards in time produces an incorrectly ordered merge.
///
/// `Ok(None)` means the source is exhausted. Drivers never pull again from a
/// source after it has returned `Ok(None)`.
pub trait LogSource {
    fn pop(&mut self) -> SourceResult<Option<LogEntry>>;
}

/// A source whose pulls may suspend before resolving.
///
/// Same ordering and exhaustion contract as [`LogSource`]. A driver keeps at
/// most one pull outstanding per source.
#[async_trait]
pub trait AsyncLogSource: Send {
    async fn pop_async(&mut self) -> SourceResult<Option<LogEntry>>;
}

/// Consumer of the merged stream.
///
/// `print` is called once per entry in final order; `done` is called exactly
/// once after the last `print` of a successful run.
pub trait LogSink {
    fn print(&mut self, entry: LogEntry);

    fn done(&mut self);
}

impl<T: LogSource + ?Sized> LogSource for &mut T {
    fn pop(&mut self) -> SourceResult<Option<LogEntry>> {
        (**self).pop()
    }
}

impl<T: LogSource + ?Sized> LogSource for Box<T> {
    fn pop(&mut self) -> SourceResult<Option<LogEntry>> {
        (**self).pop()
    }
}

#[async_trait]
impl<T: AsyncLogSource + ?Sized> AsyncLogSource for &mut T {
    async fn pop_async(&mut self) -> SourceResult<Option<LogEntry>> {
        (**self).pop_async().await
    }
}

#[async_trait]
impl<T: AsyncLogSource + ?Sized> AsyncLogSource for Box<T> {
    async fn pop_async(&mut self) -> SourceResult<Option<LogEntry>> {
        (**self).pop_async().await
    }
}

impl<T: LogSink + ?Sized> LogSink for &mut T {
    fn print(&mut self, entry: LogEntry) {
        (**self).print(entry)
    }

    fn done(&mut self) {
        (**self).done()
    }
}

impl<T: LogSink + ?Sized> LogSink for Box<T> {
    fn print(&mut self, entry: LogEntry) {
        (**self).print(entry)
    }

    fn done(&mut self) {
        (**self).done()
    }
}
