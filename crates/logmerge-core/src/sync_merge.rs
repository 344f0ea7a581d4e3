use logmerge_types::SourceId;

use crate::driver::MergeDriver;
use crate::error::MergeResult;
use crate::observer::{MergeMode, MergeSummary};
use crate::traits::{LogSink, LogSource};

impl MergeDriver {
    /// Merge blocking sources into `sink` in global date order.
    ///
    /// Each source is pulled once up front; after that, only the source whose
    /// entry was just printed is pulled again. Runs to completion without
    /// suspending. On success `sink.done()` has been called exactly once.
    ///
    /// A failing pull stops the run with [`MergeError::Source`] and `done()`
    /// is not called.
    ///
    /// [`MergeError::Source`]: crate::MergeError::Source
    pub fn run_sync<S, K>(&self, sources: &mut [S], sink: &mut K) -> MergeResult<MergeSummary>
    where
        S: LogSource,
        K: LogSink + ?Sized,
    {
        let mut run = self.begin(MergeMode::Sync, sources.len());

        for (index, source) in sources.iter_mut().enumerate() {
            run.seed(SourceId(index), source.pop())?;
        }

        while let Some(item) = run.pop_next() {
            let source = item.source;
            let previous = item.entry.date();
            sink.print(item.entry);
            run.emitted();
            run.refill(source, previous, sources[source.index()].pop())?;
        }

        Ok(self.complete(run, sink))
    }
}

/// Merge blocking sources with the default driver configuration.
pub fn merge_sync<S, K>(sources: &mut [S], sink: &mut K) -> MergeResult<MergeSummary>
where
    S: LogSource,
    K: LogSink + ?Sized,
{
    MergeDriver::default().run_sync(sources, sink)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use logmerge_types::LogEntry;
    use proptest::prelude::*;

    use super::*;
    use crate::config::DriverConfig;
    use crate::error::MergeError;
    use crate::observer::MergeObserver;
    use crate::testing::{entries, RecordingSink, ScriptedSource};

    struct CountingObserver(Arc<AtomicUsize>);

    impl MergeObserver for CountingObserver {
        fn on_complete(&self, _summary: &MergeSummary) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn run(sources: Vec<Vec<LogEntry>>) -> (RecordingSink, MergeSummary) {
        let mut sources: Vec<ScriptedSource> = sources.into_iter().map(ScriptedSource::new).collect();
        let mut sink = RecordingSink::default();
        let summary = merge_sync(&mut sources, &mut sink).unwrap();
        (sink, summary)
    }

    #[test]
    fn interleaves_two_sources() {
        let (sink, summary) = run(vec![entries("s1", &[1, 5]), entries("s2", &[2, 3])]);
        assert_eq!(sink.printed_messages(), vec!["s1@1", "s2@2", "s2@3", "s1@5"]);
        assert!(sink.finished_cleanly());
        assert_eq!(summary.entries, 4);
        assert_eq!(summary.sources, 2);
        assert_eq!(summary.mode, MergeMode::Sync);
    }

    #[test]
    fn empty_source_contributes_nothing() {
        let (sink, summary) = run(vec![Vec::new(), entries("s2", &[4])]);
        assert_eq!(sink.printed_messages(), vec!["s2@4"]);
        assert!(sink.finished_cleanly());
        assert_eq!(summary.entries, 1);
    }

    #[test]
    fn three_interleaved_sources_fully_sorted() {
        let sources: Vec<Vec<LogEntry>> = (0..3i64)
            .map(|s| {
                let millis: Vec<i64> = (0..100i64).map(|k| s + 3 * k).collect();
                entries(&format!("s{s}"), &millis)
            })
            .collect();
        let (sink, summary) = run(sources);

        let printed: Vec<i64> = sink.printed().iter().map(LogEntry::timestamp_millis).collect();
        assert_eq!(printed, (0..300).collect::<Vec<i64>>());
        assert_eq!(summary.entries, 300);
        assert!(sink.finished_cleanly());
    }

    #[test]
    fn no_sources_still_signals_done() {
        let (sink, summary) = run(Vec::new());
        assert!(sink.printed().is_empty());
        assert!(sink.finished_cleanly());
        assert_eq!(summary.entries, 0);
    }

    #[test]
    fn all_sources_empty_signals_done() {
        let (sink, _) = run(vec![Vec::new(), Vec::new(), Vec::new()]);
        assert!(sink.printed().is_empty());
        assert!(sink.finished_cleanly());
    }

    #[test]
    fn equal_dates_follow_registration_order() {
        let (sink, _) = run(vec![
            entries("a", &[1, 2]),
            entries("b", &[1, 2]),
            entries("c", &[2]),
        ]);
        assert_eq!(
            sink.printed_messages(),
            vec!["a@1", "b@1", "a@2", "b@2", "c@2"]
        );
    }

    #[test]
    fn out_of_order_source_completes_run() {
        let (sink, summary) = run(vec![entries("a", &[5, 1]), entries("b", &[3])]);
        assert_eq!(sink.printed_messages(), vec!["b@3", "a@5", "a@1"]);
        assert_eq!(summary.entries, 3);
        assert!(sink.finished_cleanly());
    }

    #[test]
    fn exhausted_sources_are_never_pulled_again() {
        let mut sources = vec![
            ScriptedSource::new(entries("a", &[1])),
            ScriptedSource::new(entries("b", &[2, 3, 4])),
            ScriptedSource::new(Vec::new()),
        ];
        let mut sink = RecordingSink::default();
        merge_sync(&mut sources, &mut sink).unwrap();
        assert!(sources.iter().all(|s| s.pulls_after_exhausted == 0));
    }

    #[test]
    fn source_failure_propagates_without_done() {
        let mut sources = vec![
            ScriptedSource::new(entries("a", &[1, 2, 3])).failing_on(2),
            ScriptedSource::new(entries("b", &[10])),
        ];
        let mut sink = RecordingSink::default();
        let err = merge_sync(&mut sources, &mut sink).unwrap_err();

        match err {
            MergeError::Source { source_id, .. } => assert_eq!(source_id, SourceId(0)),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(sink.printed_messages(), vec!["a@1", "a@2"]);
        assert_eq!(sink.done_count(), 0);
    }

    #[test]
    fn observers_run_once_after_done() {
        let calls = Arc::new(AtomicUsize::new(0));
        let driver = MergeDriver::new(DriverConfig::quiet())
            .with_observer(CountingObserver(Arc::clone(&calls)))
            .with_observer(CountingObserver(Arc::clone(&calls)));

        let mut sources = vec![ScriptedSource::new(entries("a", &[1, 2]))];
        let mut sink = RecordingSink::default();
        driver.run_sync(&mut sources, &mut sink).unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(sink.finished_cleanly());
    }

    #[test]
    fn observers_skipped_on_failure() {
        let calls = Arc::new(AtomicUsize::new(0));
        let driver = MergeDriver::default().with_observer(CountingObserver(Arc::clone(&calls)));

        let mut sources = vec![ScriptedSource::new(entries("a", &[1])).failing_on(0)];
        let mut sink = RecordingSink::default();
        assert!(driver.run_sync(&mut sources, &mut sink).is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn accepts_boxed_trait_objects() {
        let mut sources: Vec<Box<dyn LogSource>> = vec![
            Box::new(ScriptedSource::new(entries("a", &[3]))),
            Box::new(ScriptedSource::new(entries("b", &[1]))),
        ];
        let mut sink: Box<dyn LogSink> = Box::new(RecordingSink::default());
        let summary = merge_sync(&mut sources, &mut sink).unwrap();
        assert_eq!(summary.entries, 2);
    }

    fn sorted_sources() -> impl Strategy<Value = Vec<Vec<i64>>> {
        prop::collection::vec(
            prop::collection::vec(0i64..500, 0..25).prop_map(|mut v| {
                v.sort_unstable();
                v
            }),
            0..6,
        )
    }

    proptest! {
        #[test]
        fn output_is_ordered_complete_and_preserves_source_order(raw in sorted_sources()) {
            let sources: Vec<Vec<LogEntry>> = raw
                .iter()
                .enumerate()
                .map(|(s, millis)| {
                    millis
                        .iter()
                        .enumerate()
                        .map(|(k, &ms)| LogEntry::from_millis(ms, format!("{s}:{k}")).unwrap())
                        .collect()
                })
                .collect();
            let expected_total: usize = raw.iter().map(Vec::len).sum();
            let (sink, summary) = run(sources);
            let printed = sink.printed();

            prop_assert_eq!(printed.len(), expected_total);
            prop_assert_eq!(summary.entries, expected_total as u64);
            prop_assert!(printed.windows(2).all(|w| w[0].date() <= w[1].date()));
            prop_assert!(sink.finished_cleanly());

            let mut next_index = vec![0usize; raw.len()];
            for entry in &printed {
                let (s, k) = entry.msg().split_once(':').unwrap();
                let (s, k): (usize, usize) = (s.parse().unwrap(), k.parse().unwrap());
                prop_assert_eq!(k, next_index[s]);
                next_index[s] += 1;
            }
            for (s, millis) in raw.iter().enumerate() {
                prop_assert_eq!(next_index[s], millis.len());
            }
        }
    }
}
