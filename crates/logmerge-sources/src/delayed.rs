use std::time::Duration;

use async_trait::async_trait;
use logmerge_core::{AsyncLogSource, LogSource, SourceResult};
use logmerge_types::LogEntry;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Inclusive bounds for a simulated pull latency, in milliseconds.
///
/// Missing fields deserialize to the [`Default`] bounds, and bounds given in
/// the wrong order are swapped, so `min_ms <= max_ms` always holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "DelayBounds")]
pub struct DelayRange {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl DelayRange {
    /// Build a range; bounds given in the wrong order are swapped.
    pub fn new(min_ms: u64, max_ms: u64) -> Self {
        Self {
            min_ms: min_ms.min(max_ms),
            max_ms: min_ms.max(max_ms),
        }
    }

    /// No delay at all.
    pub const fn none() -> Self {
        Self {
            min_ms: 0,
            max_ms: 0,
        }
    }

    fn sample(&self, rng: &mut StdRng) -> Duration {
        Duration::from_millis(rng.gen_range(self.min_ms..=self.max_ms))
    }
}

impl Default for DelayRange {
    fn default() -> Self {
        Self::new(0, 8)
    }
}

/// Wire form of [`DelayRange`] before normalization.
#[derive(Deserialize)]
#[serde(default)]
struct DelayBounds {
    min_ms: u64,
    max_ms: u64,
}

impl Default for DelayBounds {
    fn default() -> Self {
        let range = DelayRange::default();
        Self {
            min_ms: range.min_ms,
            max_ms: range.max_ms,
        }
    }
}

impl From<DelayBounds> for DelayRange {
    fn from(bounds: DelayBounds) -> Self {
        Self::new(bounds.min_ms, bounds.max_ms)
    }
}

/// Wraps a blocking source so that every async pull first sleeps for a
/// random delay drawn from a [`DelayRange`].
///
/// Blocking pulls through [`LogSource`] pass straight through with no delay.
#[derive(Debug)]
pub struct DelayedSource<S> {
    inner: S,
    delay: DelayRange,
    rng: StdRng,
}

impl<S: LogSource> DelayedSource<S> {
    pub fn new(inner: S, delay: DelayRange, seed: u64) -> Self {
        Self {
            inner,
            delay,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn delay(&self) -> DelayRange {
        self.delay
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: LogSource> LogSource for DelayedSource<S> {
    fn pop(&mut self) -> SourceResult<Option<LogEntry>> {
        self.inner.pop()
    }
}

#[async_trait]
impl<S: LogSource + Send> AsyncLogSource for DelayedSource<S> {
    async fn pop_async(&mut self) -> SourceResult<Option<LogEntry>> {
        let wait = self.delay.sample(&mut self.rng);
        trace!(delay_ms = wait.as_millis() as u64, "delaying pull");
        if !wait.is_zero() {
            tokio::time::sleep(wait).await;
        }
        self.inner.pop()
    }
}
