//! Bounded worker pool.
//!
//! Items are turned into futures and driven `workers` at a time; results
//! are yielded in completion order, not submission order. Tasks share no
//! state, so nothing beyond the pool itself needs coordinating.

use futures::{StreamExt, stream};
use std::future::Future;

use super::outcome::{PhaseSummary, WorkResult};

/// Run `work` over every item with at most `workers` in flight.
///
/// `on_result` sees each result as soon as it completes. A worker count of
/// zero is treated as one.
pub async fn run_bounded<I, F, Fut>(
    items: I,
    workers: usize,
    work: F,
    mut on_result: impl FnMut(&WorkResult),
) -> PhaseSummary
where
    I: IntoIterator,
    F: FnMut(I::Item) -> Fut,
    Fut: Future<Output = WorkResult>,
{
    let mut results = stream::iter(items)
        .map(work)
        .buffer_unordered(workers.max(1));

    let mut summary = PhaseSummary::default();
    while let Some(result) = results.next().await {
        summary.record(&result);
        on_result(&result);
    }
    summary
}
