//! Foundation types for logmerge.
//!
//! This crate provides the value types shared by every logmerge crate: the
//! immutable [`LogEntry`] that flows from sources to sinks, and the
//! [`SourceId`] that identifies where an entry came from within one merge run.
//!
//! # Ordering
//!
//! Entries are ordered by their `date` only. When two entries from different
//! sources carry the same date, the entry from the source registered first
//! (lower [`SourceId`]) wins. [`MergeKey`] packages both halves of that rule.

pub mod entry;
pub mod error;
pub mod source;

pub use entry::{LogEntry, MergeKey};
pub use error::TypeError;
pub use source::SourceId;
