use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("timestamp out of range: {millis}ms")]
    TimestampOutOfRange { millis: i64 },
}
