use serde::{Deserialize, Serialize};

/// Configuration for a [`MergeDriver`](crate::MergeDriver).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// Emit a debug progress event every this many entries. Zero disables.
    pub progress_interval: u64,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            progress_interval: 10_000,
        }
    }
}

impl DriverConfig {
    /// A configuration that never logs progress.
    pub fn quiet() -> Self {
        Self {
            progress_interval: 0,
        }
    }
}
