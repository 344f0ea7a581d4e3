//! Chronological k-way merge of independently ordered log sources.
//!
//! This crate is the merge engine of logmerge. It provides:
//! - `LogSource` / `AsyncLogSource` / `LogSink` trait boundaries
//! - `Frontier`, the one-entry-per-source priority set
//! - `MergeDriver` with a blocking (`run_sync`) and a suspending
//!   (`run_async`) loop that produce identical output order
//! - `MergeObserver` completion hooks and `MergeSummary` run statistics
//!
//! Every source must yield entries in non-decreasing date order. Entries with
//! equal dates from different sources are emitted in source registration
//! order.

pub mod async_merge;
pub mod config;
pub mod driver;
pub mod error;
pub mod frontier;
pub mod observer;
pub mod sync_merge;
pub mod traits;

#[cfg(test)]
mod testing;

pub use async_merge::merge_async;
pub use config::DriverConfig;
pub use driver::MergeDriver;
pub use error::{MergeError, MergeResult, SourceError, SourceResult};
pub use frontier::{Frontier, FrontierItem};
pub use observer::{LoggingObserver, MergeMode, MergeObserver, MergeSummary};
pub use sync_merge::merge_sync;
pub use traits::{AsyncLogSource, LogSink, LogSource};
