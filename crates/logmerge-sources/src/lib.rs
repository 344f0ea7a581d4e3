//! Collaborators for the logmerge engine.
//!
//! Sources:
//! - [`VecSource`] — in-memory FIFO, usable by both drivers
//! - [`DelayedSource`] — wraps any source and adds a random delay to each
//!   async pull
//! - [`LogGenerator`] — seeded generator of ordered synthetic sources
//! - [`JsonLinesSource`] — one JSON entry per line from any reader or file
//!
//! Sinks:
//! - [`CollectingSink`] — keeps everything it is given
//! - [`PrinterSink`] — writes text or JSON lines and keeps run statistics

pub mod delayed;
pub mod generator;
pub mod jsonl;
pub mod memory;
pub mod printer;
pub mod sink;

pub use delayed::{DelayRange, DelayedSource};
pub use generator::{GeneratorConfig, LogGenerator};
pub use jsonl::JsonLinesSource;
pub use memory::VecSource;
pub use printer::{OutputFormat, PrinterSink, PrinterStats};
pub use sink::CollectingSink;
