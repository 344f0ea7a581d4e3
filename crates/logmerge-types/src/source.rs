use std::fmt;

use serde::{Deserialize, Serialize};

/// Registration index of a source within a single merge run.
///
/// Sources are numbered in the order they are handed to a driver, starting at
/// zero. The index doubles as the tie-break for entries with equal dates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SourceId(pub usize);

impl SourceId {
    /// The raw registration index.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "src#{}", self.0)
    }
}
