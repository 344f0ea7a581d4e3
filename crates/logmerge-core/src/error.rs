use std::io;

use logmerge_types::SourceId;

/// Errors a source collaborator may report from a pull.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// I/O failure while reading the underlying log.
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    /// A record could not be decoded.
    #[error("parse error on line {line}: {reason}")]
    Parse { line: u64, reason: String },

    /// Any other collaborator-specific failure.
    #[error("{0}")]
    Other(String),
}

/// Errors produced by a merge run.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    /// `extract_min` was called on an empty frontier. The drivers check the
    /// frontier size before extracting, so seeing this is a driver bug.
    #[error("extract attempted on an empty frontier")]
    EmptyFrontier,

    /// A source pull failed. The run stops and the error is passed through
    /// unchanged; the sink never sees `done()`.
    #[error("pull from {source_id} failed: {error}")]
    Source {
        source_id: SourceId,
        #[source]
        error: SourceError,
    },
}

impl MergeError {
    pub fn source_failed(source_id: SourceId, error: SourceError) -> Self {
        Self::Source { source_id, error }
    }
}

/// Convenience alias for collaborator pulls.
pub type SourceResult<T> = std::result::Result<T, SourceError>;

/// Convenience alias used throughout the core crate.
pub type MergeResult<T> = std::result::Result<T, MergeError>;
