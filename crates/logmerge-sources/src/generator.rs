use chrono::{DateTime, Duration, Utc};
use logmerge_types::LogEntry;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::memory::VecSource;

const SUBJECTS: &[&str] = &[
    "scheduler", "cache", "gateway", "worker", "replica", "indexer", "auth", "queue",
];

const EVENTS: &[&str] = &[
    "started",
    "stopped",
    "timed out",
    "retried request",
    "flushed buffer",
    "rotated segment",
    "lost heartbeat",
    "recovered",
];

/// Parameters for [`LogGenerator`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Seed for the random number generator. Same seed, same sources.
    pub seed: u64,
    /// Date of the earliest possible entry.
    pub base: DateTime<Utc>,
    /// Upper bound on the random offset of each source's first entry.
    pub max_start_offset_ms: i64,
    /// Upper bound on the gap between consecutive entries of one source.
    /// Gaps are at least one millisecond, so dates strictly increase.
    pub max_gap_ms: i64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            base: DateTime::<Utc>::UNIX_EPOCH + Duration::days(19_000),
            max_start_offset_ms: 60_000,
            max_gap_ms: 5_000,
        }
    }
}

/// Seeded generator of synthetic, individually ordered log sources.
#[derive(Debug)]
pub struct LogGenerator {
    config: GeneratorConfig,
    rng: StdRng,
}

impl LogGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self { config, rng }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(GeneratorConfig {
            seed,
            ..Default::default()
        })
    }

    /// Entries for a single source, strictly increasing in date.
    pub fn entries(&mut self, source_label: &str, count: usize) -> Vec<LogEntry> {
        let max_offset = self.config.max_start_offset_ms.max(0);
        let max_gap = self.config.max_gap_ms.max(1);

        let mut date = self.config.base + Duration::milliseconds(self.rng.gen_range(0..=max_offset));
        let mut out = Vec::with_capacity(count);
        for seq in 0..count {
            if seq > 0 {
                date += Duration::milliseconds(self.rng.gen_range(1..=max_gap));
            }
            out.push(LogEntry::new(date, self.message(source_label, seq)));
        }
        out
    }

    /// One source of `count` entries.
    pub fn source(&mut self, source_label: &str, count: usize) -> VecSource {
        VecSource::new(self.entries(source_label, count))
    }

    /// `sources` sources of `entries_per_source` entries each, labelled
    /// `source-0`, `source-1`, ...
    pub fn generate(&mut self, sources: usize, entries_per_source: usize) -> Vec<VecSource> {
        debug!(sources, entries_per_source, seed = self.config.seed, "generating sources");
        (0..sources)
            .map(|i| self.source(&format!("source-{i}"), entries_per_source))
            .collect()
    }

    fn message(&mut self, source_label: &str, seq: usize) -> String {
        let subject = SUBJECTS.choose(&mut self.rng).copied().unwrap_or("node");
        let event = EVENTS.choose(&mut self.rng).copied().unwrap_or("noted");
        format!("[{source_label}#{seq}] {subject} {event}")
    }
}
