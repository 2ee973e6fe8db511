//! Map work over partitions on a dedicated thread pool, then merge.

use std::thread::available_parallelism;

use log::debug;
use rayon::prelude::*;

use crate::errors::{GenomicDistError, GenomicDistResult};

/// Worker count for `partitions` units of work: the configured thread count
/// (all cores when unset), never more than there are partitions.
pub fn worker_count(threads: Option<usize>, partitions: usize) -> usize {
    let available = threads
        .or_else(|| available_parallelism().ok().map(|n| n.get()))
        .unwrap_or(1);
    available.min(partitions).max(1)
}

///
/// Run `map` over every partition in parallel and fold the results, in
/// partition order, with `merge` starting from `init`.
///
/// `merge` must be associative. The first failing partition aborts the whole
/// run and its error is returned; no partial result escapes.
///
/// # Arguments
///
/// - partitions: independent units of work, typically one chromosome each
/// - threads: pool size, capped at the number of partitions
///
pub fn parallel_map_merge<P, R, F, M>(
    partitions: &[P],
    threads: Option<usize>,
    map: F,
    init: R,
    merge: M,
) -> GenomicDistResult<R>
where
    P: Sync,
    R: Send,
    F: Fn(&P) -> GenomicDistResult<R> + Sync + Send,
    M: Fn(R, R) -> R,
{
    if partitions.is_empty() {
        return Ok(init);
    }

    let num_threads = worker_count(threads, partitions.len());
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build()
        .map_err(|e| GenomicDistError::ThreadPool(e.to_string()))?;
    debug!(
        "Mapping {} partitions on {} threads",
        partitions.len(),
        num_threads
    );

    let results: Vec<R> = pool.install(|| {
        partitions
            .par_iter()
            .map(&map)
            .collect::<GenomicDistResult<Vec<R>>>()
    })?;

    Ok(results.into_iter().fold(init, merge))
}
