use planar_common::Edge;
use tracing::{debug, trace};

use super::SearchError;
use super::incumbent::Incumbent;
use super::state::SearchState;
use crate::abort::StopCondition;
use crate::bound::BoundEstimator;
use crate::oracle::PlanarityOracle;
use crate::stats::SearchStats;

/// Pending work on the explicit stack.
#[derive(Clone, Copy, Debug)]
enum Frame {
    /// Expand the node whose first `depth` edges are decided.
    Visit(usize),
    /// Drop the most recently included edge.
    Retract,
}

/// Depth-first branch-and-bound from a given state.
///
/// The include branch of an edge is explored before its exclude branch, so
/// large planar sets are found early and tighten pruning for the rest.
pub(crate) struct Explorer<'s, O, I> {
    oracle: O,
    bound: &'s dyn BoundEstimator,
    incumbent: I,
    stop: &'s StopCondition,
    split: Option<usize>,
    seeds: Vec<Vec<Edge>>,
    stats: SearchStats,
}

impl<'s, O: PlanarityOracle, I: Incumbent> Explorer<'s, O, I> {
    pub(crate) fn new(
        oracle: O,
        bound: &'s dyn BoundEstimator,
        incumbent: I,
        stop: &'s StopCondition,
    ) -> Self {
        Self {
            oracle,
            bound,
            incumbent,
            stop,
            split: None,
            seeds: Vec::new(),
            stats: SearchStats::default(),
        }
    }

    /// Instead of branching at `depth`, record the kept edges of each node
    /// reached there as a seed for later exploration.
    pub(crate) const fn split_at(mut self, depth: usize) -> Self {
        self.split = Some(depth);
        self
    }

    /// Explores the subtree below `state`.
    ///
    /// Returns `true` if the subtree was exhausted and `false` if the stop
    /// condition fired first.
    pub(crate) fn explore(&mut self, state: &mut SearchState<'_>) -> Result<bool, SearchError> {
        let mut stack = vec![Frame::Visit(state.depth())];

        while let Some(frame) = stack.pop() {
            let depth = match frame {
                Frame::Retract => {
                    state.retract();
                    continue;
                }
                Frame::Visit(depth) => depth,
            };
            state.seek(depth);
            self.stats.nodes_visited += 1;

            if self.incumbent.offer(state.current()) {
                self.stats.incumbent_updates += 1;
                debug!(
                    "incumbent improved to {} edges at depth {}",
                    state.current().len(),
                    depth
                );
            }

            let Some(edge) = state.next_edge() else {
                continue;
            };
            if self.split == Some(depth) {
                self.seeds.push(state.current().to_vec());
                continue;
            }
            if self.stop.should_stop() {
                debug!(
                    "stopping at depth {} with an incumbent of {} edges",
                    depth,
                    self.incumbent.size()
                );
                return Ok(false);
            }

            let bound = self.bound.upper_bound(state)?;
            if bound <= self.incumbent.size() {
                self.stats.pruned += 1;
                trace!(
                    "depth {}: pruned, bound {} <= incumbent {}",
                    depth,
                    bound,
                    self.incumbent.size()
                );
                continue;
            }

            self.stats.oracle_calls += 1;
            if self.oracle.is_planar_with(state.current(), edge)? {
                trace!("depth {}: include {:?}", depth, edge);
                stack.push(Frame::Visit(depth + 1));
                stack.push(Frame::Retract);
                stack.push(Frame::Visit(depth + 1));
                state.include(edge);
            } else {
                self.stats.oracle_rejections += 1;
                debug!("depth {}: oracle rejected {:?}", depth, edge);
                stack.push(Frame::Visit(depth + 1));
            }
        }

        Ok(true)
    }

    /// The incumbent, collected seeds and counters.
    pub(crate) fn into_parts(self) -> (I, Vec<Vec<Edge>>, SearchStats) {
        (self.incumbent, self.seeds, self.stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abort::AbortHandle;
    use crate::bound::{CombinedBound, TrivialBound};
    use crate::oracle::EmbeddingOracle;
    use planar_common::Graph;

    fn run(graph: &Graph, bound: &dyn BoundEstimator) -> (Vec<Edge>, bool, SearchStats) {
        let order: Vec<Edge> = graph.edges().collect();
        let stop = StopCondition::new(AbortHandle::new(), None);
        let mut explorer = Explorer::new(EmbeddingOracle::new(), bound, Vec::new(), &stop);
        let done = explorer.explore(&mut SearchState::new(&order)).unwrap();
        let (best, _, stats) = explorer.into_parts();
        (best, done, stats)
    }

    #[test]
    fn test_k5_keeps_nine_edges() {
        let k5 = Graph::complete(5);
        let (best, done, stats) = run(&k5, &TrivialBound);
        assert!(done);
        assert_eq!(best.len(), 9);
        assert!(stats.oracle_rejections >= 1);
    }

    #[test]
    fn test_euler_cap_prunes_before_the_oracle_rejects() {
        // Nine kept K5 edges already meet the cap 3n - 6, so the tenth edge is
        // pruned without a planarity query.
        let k5 = Graph::complete(5);
        let (best, done, stats) = run(&k5, &CombinedBound::new(&k5));
        assert!(done);
        assert_eq!(best.len(), 9);
        assert!(stats.pruned >= 1);
        assert_eq!(stats.oracle_rejections, 0);
    }

    #[test]
    fn test_trivial_bound_explores_more_than_combined() {
        let k6 = Graph::complete(6);
        let (trivial_best, _, trivial) = run(&k6, &TrivialBound);
        let (combined_best, _, combined) = run(&k6, &CombinedBound::new(&k6));
        assert_eq!(trivial_best.len(), 12);
        assert_eq!(combined_best.len(), 12);
        assert!(combined.nodes_visited <= trivial.nodes_visited);
    }

    #[test]
    fn test_split_collects_seeds_without_branching_below() {
        let k4 = Graph::complete(4);
        let order: Vec<Edge> = k4.edges().collect();
        let stop = StopCondition::new(AbortHandle::new(), None);
        let bound = TrivialBound;
        let mut explorer =
            Explorer::new(EmbeddingOracle::new(), &bound, Vec::new(), &stop).split_at(2);
        assert!(explorer.explore(&mut SearchState::new(&order)).unwrap());
        let (best, seeds, _) = explorer.into_parts();
        // both include/exclude choices for the first two edges
        assert_eq!(seeds.len(), 4);
        assert_eq!(best.len(), 2);
    }
}
