use futures::future::join_all;
use logmerge_types::SourceId;

use crate::driver::MergeDriver;
use crate::error::MergeResult;
use crate::observer::{MergeMode, MergeSummary};
use crate::traits::{AsyncLogSource, LogSink};

impl MergeDriver {
    /// Merge suspending sources into `sink` in global date order.
    ///
    /// The first pull of every source is issued together and awaited as a
    /// batch. After that the loop is strictly sequential: one pull is in
    /// flight at a time, always against the source whose entry was just
    /// printed. Output order is identical to [`MergeDriver::run_sync`] for the
    /// same entries; only delivery timing differs.
    ///
    /// If any seeding pull fails, the failure from the lowest-numbered source
    /// is returned once the whole batch has resolved.
    pub async fn run_async<S, K>(&self, sources: &mut [S], sink: &mut K) -> MergeResult<MergeSummary>
    where
        S: AsyncLogSource,
        K: LogSink + ?Sized,
    {
        let mut run = self.begin(MergeMode::Async, sources.len());

        let seeds = join_all(
            sources
                .iter_mut()
                .enumerate()
                .map(|(index, source)| async move { (SourceId(index), source.pop_async().await) }),
        )
        .await;
        for (source, pulled) in seeds {
            run.seed(source, pulled)?;
        }

        while let Some(item) = run.pop_next() {
            let source = item.source;
            let previous = item.entry.date();
            sink.print(item.entry);
            run.emitted();
            let pulled = sources[source.index()].pop_async().await;
            run.refill(source, previous, pulled)?;
        }

        Ok(self.complete(run, sink))
    }
}

/// Merge suspending sources with the default driver configuration.
pub async fn merge_async<S, K>(sources: &mut [S], sink: &mut K) -> MergeResult<MergeSummary>
where
    S: AsyncLogSource,
    K: LogSink + ?Sized,
{
    MergeDriver::default().run_async(sources, sink).await
}
