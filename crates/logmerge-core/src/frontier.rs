use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use logmerge_types::{LogEntry, MergeKey, SourceId};

use crate::error::{MergeError, MergeResult};

/// A pending entry paired with the source it came from.
///
/// Items are ordered by [`MergeKey`]: date first, then registration index.
/// The message is never consulted, so equality here means "same date from
/// the same source", not "same entry".
#[derive(Clone, Debug)]
pub struct FrontierItem {
    pub entry: LogEntry,
    pub source: SourceId,
}

impl FrontierItem {
    pub fn new(entry: LogEntry, source: SourceId) -> Self {
        Self { entry, source }
    }

    pub fn key(&self) -> MergeKey {
        MergeKey::new(&self.entry, self.source)
    }
}

impl PartialEq for FrontierItem {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for FrontierItem {}

impl PartialOrd for FrontierItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierItem {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

/// Min-priority working set holding at most one pending entry per active
/// source.
///
/// Because every source yields non-decreasing dates, the smallest item here
/// is always the next entry that is safe to emit.
#[derive(Debug, Default)]
pub struct Frontier {
    heap: BinaryHeap<Reverse<FrontierItem>>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-size for `sources` active sources.
    pub fn with_capacity(sources: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(sources),
        }
    }

    /// Add an item. O(log n) in the number of active sources.
    pub fn insert(&mut self, item: FrontierItem) {
        debug_assert!(
            !self.heap.iter().any(|Reverse(held)| held.source == item.source),
            "frontier already holds an entry from {}",
            item.source
        );
        self.heap.push(Reverse(item));
    }

    /// Remove and return the item with the smallest [`MergeKey`].
    pub fn extract_min(&mut self) -> MergeResult<FrontierItem> {
        self.heap
            .pop()
            .map(|Reverse(item)| item)
            .ok_or(MergeError::EmptyFrontier)
    }

    /// Key of the item `extract_min` would return next.
    pub fn peek_key(&self) -> Option<MergeKey> {
        self.heap.peek().map(|Reverse(item)| item.key())
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
