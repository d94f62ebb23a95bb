//! The branch-and-bound driver and its public entry point.

mod explorer;
mod incumbent;
mod parallel;
mod state;

use std::cmp::Reverse;
use std::fmt;
use std::time::Instant;

use itertools::Itertools;
use planar_common::{Config, Edge, EdgeOrder, Graph};
use thiserror::Error;
use tracing::info;

pub use self::state::SearchState;
use self::explorer::Explorer;
use crate::abort::{AbortHandle, StopCondition};
use crate::assemble::assemble;
use crate::bound::{BoundError, bound_for};
use crate::oracle::{EmbeddingOracle, OracleError, PlanarityOracle};
use crate::stats::SearchStats;

/// The search could not produce a trustworthy result.
///
/// Cancellation is not an error; it shows up as
/// [`SearchStatus::BestEffortTimedOut`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The planarity oracle failed on some query.
    #[error("planarity oracle failed: {0}")]
    OracleFailure(#[from] OracleError),

    /// The bound estimator failed on some state.
    #[error("bound estimator failed: {0}")]
    BoundFailure(#[from] BoundError),
}

/// How much the returned subgraph is worth.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SearchStatus {
    /// The search space was exhausted; no planar subgraph has more edges.
    Optimal,
    /// The search was aborted or ran out of time. The subgraph is planar but
    /// may not be maximum.
    BestEffortTimedOut,
}

impl fmt::Display for SearchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Optimal => write!(f, "optimal"),
            Self::BestEffortTimedOut => write!(f, "best effort (timed out)"),
        }
    }
}

/// Result of a search.
#[derive(Clone, Debug)]
pub struct SearchOutcome {
    /// Every input vertex and the kept edges, in input order.
    pub subgraph: Graph,
    /// Whether `subgraph` is proven maximum.
    pub status: SearchStatus,
    /// Counters of the run.
    pub stats: SearchStats,
}

impl SearchOutcome {
    /// Whether the subgraph is proven maximum.
    #[must_use]
    pub fn is_optimal(&self) -> bool {
        self.status == SearchStatus::Optimal
    }
}

/// Edges of `graph` in the order the search decides them.
///
/// Sorting is stable, so ties keep their insertion order.
#[must_use]
pub fn edge_order(graph: &Graph, order: EdgeOrder) -> Vec<Edge> {
    match order {
        EdgeOrder::Insertion => graph.edges().collect(),
        EdgeOrder::DegreeDescending => graph
            .edges()
            .sorted_by_key(|e| Reverse(graph.degree(e.u()) + graph.degree(e.v())))
            .collect(),
    }
}

/// A maximum planar subgraph search over one input graph.
pub struct MaxPlanarSearch<'g, O = EmbeddingOracle> {
    graph: &'g Graph,
    config: Config,
    oracle: O,
    abort: AbortHandle,
}

impl<'g> MaxPlanarSearch<'g> {
    /// Search over `graph` with the default oracle.
    #[must_use]
    pub fn new(graph: &'g Graph, config: Config) -> Self {
        let oracle = EmbeddingOracle::with_vertex_limit(config.oracle_vertex_limit);
        Self {
            graph,
            config,
            oracle,
            abort: AbortHandle::new(),
        }
    }
}

impl<'g, O> MaxPlanarSearch<'g, O>
where
    O: PlanarityOracle + Clone + Send + Sync,
{
    /// Replaces the planarity oracle.
    #[must_use]
    pub fn with_oracle<P>(self, oracle: P) -> MaxPlanarSearch<'g, P>
    where
        P: PlanarityOracle + Clone + Send + Sync,
    {
        MaxPlanarSearch {
            graph: self.graph,
            config: self.config,
            oracle,
            abort: self.abort,
        }
    }

    /// Uses an existing abort handle, e.g. one shared with a signal handler.
    #[must_use]
    pub fn with_abort(mut self, abort: AbortHandle) -> Self {
        self.abort = abort;
        self
    }

    /// A handle that stops this search when fired.
    #[must_use]
    pub fn abort_handle(&self) -> AbortHandle {
        self.abort.clone()
    }

    /// Runs the search to completion, abort or timeout.
    ///
    /// # Errors
    /// Returns [`SearchError`] if the oracle or the bound fails; no partial
    /// result is returned in that case.
    pub fn run(&self) -> Result<SearchOutcome, SearchError> {
        let started = Instant::now();
        let order = edge_order(self.graph, self.config.order);
        let bound = bound_for(self.config.bound, self.graph);
        let deadline = self
            .config
            .time_limit
            .and_then(|limit| started.checked_add(limit));
        let stop = StopCondition::new(self.abort.clone(), deadline);

        info!(
            "searching {} vertices / {} edges (order={:?}, bound={:?}, parallel={})",
            self.graph.vertex_count(),
            self.graph.edge_count(),
            self.config.order,
            self.config.bound,
            self.config.parallel
        );

        let (best, completed, mut stats) = if self.config.parallel {
            parallel::explore_split(
                &self.oracle,
                &order,
                self.config.split_depth,
                bound.as_ref(),
                &stop,
            )?
        } else {
            let mut explorer =
                Explorer::new(self.oracle.clone(), bound.as_ref(), Vec::new(), &stop);
            let completed = explorer.explore(&mut SearchState::new(&order))?;
            let (best, _, stats) = explorer.into_parts();
            (best, completed, stats)
        };
        stats.elapsed = started.elapsed();

        let status = if completed {
            SearchStatus::Optimal
        } else {
            SearchStatus::BestEffortTimedOut
        };
        let subgraph = assemble(self.graph, &best);

        info!(
            "kept {} of {} edges, {}; {}",
            subgraph.edge_count(),
            self.graph.edge_count(),
            status,
            stats
        );

        Ok(SearchOutcome {
            subgraph,
            status,
            stats,
        })
    }
}
