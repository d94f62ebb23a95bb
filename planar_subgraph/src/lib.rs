//! Maximum planar subgraph search.
//!
//! Branch-and-bound over edge subsets: edges are decided one at a time in a
//! fixed order, every include is validated by an exact planarity oracle, and
//! subtrees whose admissible upper bound cannot beat the incumbent are pruned.
//!
//! ```ignore
//! use planar_common::{Config, Graph};
//! use planar_subgraph::{MaxPlanarSearch, SearchStatus};
//!
//! let k5 = Graph::complete(5);
//! let outcome = MaxPlanarSearch::new(&k5, Config::default()).run()?;
//! assert_eq!(outcome.subgraph.edge_count(), 9);
//! assert_eq!(outcome.status, SearchStatus::Optimal);
//! ```

mod abort;
mod assemble;
mod bound;
mod oracle;
mod search;
mod stats;

pub use crate::abort::AbortHandle;
pub use crate::assemble::assemble;
pub use crate::bound::{
    BoundError, BoundEstimator, CombinedBound, EulerBound, TrivialBound, bound_for,
};
pub use crate::oracle::{
    EmbeddingOracle, KuratowskiKind, KuratowskiWitness, OracleError, PlanarityOracle, find_witness,
};
pub use crate::search::{
    MaxPlanarSearch, SearchError, SearchOutcome, SearchState, SearchStatus, edge_order,
};
pub use crate::stats::SearchStats;

use planar_common::{Config, Graph};

/// Runs the search on `graph` with `config` to completion or timeout.
///
/// # Errors
/// See [`SearchError`].
pub fn maximum_planar_subgraph(
    graph: &Graph,
    config: Config,
) -> Result<SearchOutcome, SearchError> {
    MaxPlanarSearch::new(graph, config).run()
}

/// Whether `graph` is planar.
///
/// # Errors
/// Returns [`OracleError`] if the oracle cannot decide.
pub fn is_planar(graph: &Graph) -> Result<bool, OracleError> {
    let edges: Vec<_> = graph.edges().collect();
    EmbeddingOracle::new().is_planar(&edges)
}

/// A Kuratowski subdivision inside `graph`, or `None` if it is planar.
///
/// # Errors
/// Returns [`OracleError`] if the oracle cannot decide or the subdivision
/// cannot be traced.
pub fn kuratowski_witness(graph: &Graph) -> Result<Option<KuratowskiWitness>, OracleError> {
    let edges: Vec<_> = graph.edges().collect();
    find_witness(&mut EmbeddingOracle::new(), &edges)
}
