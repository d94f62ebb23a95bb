//! Split search: decide the first few edges up front, then explore the
//! resulting subtrees independently against a shared incumbent.

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use planar_common::Edge;
use tracing::debug;

use super::SearchError;
use super::explorer::Explorer;
use super::incumbent::SharedIncumbent;
use super::state::SearchState;
use crate::abort::StopCondition;
use crate::bound::BoundEstimator;
use crate::oracle::PlanarityOracle;
use crate::stats::SearchStats;

/// Explores `order` by splitting at `split` edges.
///
/// Subtrees run on the rayon pool when the `rayon` feature is enabled and one
/// after another otherwise. Returns the incumbent, whether every subtree was
/// exhausted, and the summed counters.
pub(super) fn explore_split<O>(
    oracle: &O,
    order: &[Edge],
    split: usize,
    bound: &dyn BoundEstimator,
    stop: &StopCondition,
) -> Result<(Vec<Edge>, bool, SearchStats), SearchError>
where
    O: PlanarityOracle + Clone + Send + Sync,
{
    let shared = SharedIncumbent::new(Vec::new());

    let mut front = Explorer::new(oracle.clone(), bound, &shared, stop).split_at(split);
    let mut completed = front.explore(&mut SearchState::new(order))?;
    let (_, seeds, mut stats) = front.into_parts();
    debug!("split at depth {} produced {} subtrees", split, seeds.len());

    if completed {
        #[cfg(feature = "rayon")]
        let iter = seeds.into_par_iter();
        #[cfg(not(feature = "rayon"))]
        let iter = seeds.into_iter();

        let results: Vec<(bool, SearchStats)> = iter
            .map(|seed| {
                let mut state = SearchState::with_prefix(order, split, seed);
                let mut worker = Explorer::new(oracle.clone(), bound, &shared, stop);
                let done = worker.explore(&mut state)?;
                let (_, _, worker_stats) = worker.into_parts();
                Ok((done, worker_stats))
            })
            .collect::<Result<_, SearchError>>()?;

        for (done, worker_stats) in &results {
            completed &= *done;
            stats.absorb(worker_stats);
        }
    }

    Ok((shared.into_inner(), completed, stats))
}
