//! Exact planarity oracle.
//!
//! An edge set is planar iff every biconnected block of it is planar, so the
//! oracle splits the query into blocks and embeds each block face by face
//! (Demoucron, Malgrange and Pertuiset). A block is rejected exactly when some
//! fragment fits no face, which is when the block contains a subdivision of
//! K5 or K3,3; [`find_witness`] extracts that subdivision on demand.
//!
//! Queries are cheap in the common cases:
//! - at most 8 edges or at most 4 touched vertices is always planar,
//! - more than `3n - 6` edges is never planar,
//! - [`PlanarityOracle::is_planar_with`] only looks at the block that the new
//!   edge lands in, because every other block is unchanged and already known
//!   to be planar.

mod blocks;
mod embed;
mod witness;

use std::collections::{HashMap, HashSet, VecDeque};

use planar_common::{Edge, VertexId};
use thiserror::Error;
use tracing::trace;

pub use witness::{KuratowskiKind, KuratowskiWitness, find_witness};

/// Graphs with at most this many edges are planar (K3,3 has 9).
pub(crate) const TRIVIAL_EDGES: usize = 8;
/// Graphs touching at most this many vertices are planar (K5 has 5).
pub(crate) const TRIVIAL_VERTICES: usize = 4;

/// The oracle could not decide.
///
/// Every variant other than [`OracleError::TooLarge`] indicates an internal
/// invariant violation; none of them is recoverable by the search.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OracleError {
    /// The queried component is larger than the configured limit.
    #[error("component with {vertices} vertices exceeds the oracle limit of {limit}")]
    TooLarge {
        /// Vertices touched by the query.
        vertices: usize,
        /// Configured limit.
        limit: usize,
    },

    /// A biconnected block with more than one edge had no cycle.
    #[error("block with {edges} edges has no cycle")]
    NoCycle {
        /// Edges in the block.
        edges: usize,
    },

    /// A fragment of a block attaches to fewer than two embedded vertices.
    #[error("fragment attaches to {contacts} embedded vertices, expected at least two")]
    DegenerateFragment {
        /// Number of attachment vertices found.
        contacts: usize,
    },

    /// A path endpoint is missing from the face chosen for it.
    #[error("vertex {vertex} is not on the face chosen for its fragment")]
    FaceMismatch {
        /// Local index of the vertex.
        vertex: usize,
    },

    /// A minimal non-planar edge set did not have the shape of a Kuratowski subdivision.
    #[error("minimal non-planar subgraph has {branch_vertices} branch vertices and {paths} paths")]
    WitnessShape {
        /// Vertices of degree at least three.
        branch_vertices: usize,
        /// Branch-to-branch paths traced.
        paths: usize,
    },
}

/// Decides planarity of edge sets.
///
/// Implementations must be exact: the search accepts a branch only on the
/// oracle's word.
pub trait PlanarityOracle {
    /// Whether the graph formed by `edges` is planar.
    ///
    /// # Errors
    /// Returns [`OracleError`] when no answer could be determined.
    fn is_planar(&mut self, edges: &[Edge]) -> Result<bool, OracleError>;

    /// Whether `current + edge` is planar, given that `current` is planar.
    ///
    /// The default falls back to a full test.
    ///
    /// # Errors
    /// Returns [`OracleError`] when no answer could be determined.
    fn is_planar_with(&mut self, current: &[Edge], edge: Edge) -> Result<bool, OracleError> {
        let mut all = Vec::with_capacity(current.len() + 1);
        all.extend_from_slice(current);
        all.push(edge);
        self.is_planar(&all)
    }
}

/// Block decomposition plus face embedding. See the module docs.
#[derive(Clone, Debug, Default)]
pub struct EmbeddingOracle {
    vertex_limit: Option<usize>,
}

impl EmbeddingOracle {
    /// Oracle without a size limit.
    #[must_use]
    pub const fn new() -> Self {
        Self { vertex_limit: None }
    }

    /// Oracle that refuses components with more than `limit` vertices.
    #[must_use]
    pub const fn with_vertex_limit(limit: Option<usize>) -> Self {
        Self {
            vertex_limit: limit,
        }
    }

    fn check_limit(&self, vertices: usize) -> Result<(), OracleError> {
        match self.vertex_limit {
            Some(limit) if vertices > limit => Err(OracleError::TooLarge { vertices, limit }),
            _ => Ok(()),
        }
    }

    /// Tests the blocks of an already compacted edge list. `only` restricts the
    /// test to the block containing that edge index.
    fn blocks_planar(
        &self,
        n: usize,
        local: &[(usize, usize)],
        only: Option<usize>,
    ) -> Result<bool, OracleError> {
        if n <= TRIVIAL_VERTICES || local.len() <= TRIVIAL_EDGES {
            return Ok(true);
        }
        self.check_limit(n)?;
        if exceeds_euler(local.len(), n) {
            trace!("{} edges on {} vertices exceeds 3n - 6", local.len(), n);
            return Ok(false);
        }

        for block in blocks::biconnected_blocks(n, local) {
            if only.is_some_and(|id| !block.contains(&id)) || block.len() <= TRIVIAL_EDGES {
                continue;
            }
            let (bn, bedges) = compact(block.iter().map(|&id| local[id]));
            if !embed::block_is_planar(bn, &bedges)? {
                trace!(
                    "block with {} vertices and {} edges is not planar",
                    bn,
                    bedges.len()
                );
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl PlanarityOracle for EmbeddingOracle {
    fn is_planar(&mut self, edges: &[Edge]) -> Result<bool, OracleError> {
        if edges.len() <= TRIVIAL_EDGES {
            return Ok(true);
        }
        let (n, local) = compact(edges.iter().map(|e| (e.u().index(), e.v().index())));
        self.blocks_planar(n, &local, None)
    }

    fn is_planar_with(&mut self, current: &[Edge], edge: Edge) -> Result<bool, OracleError> {
        if current.len() < TRIVIAL_EDGES {
            return Ok(true);
        }

        let mut adjacency: HashMap<VertexId, Vec<VertexId>> = HashMap::new();
        for e in current {
            adjacency.entry(e.u()).or_default().push(e.v());
            adjacency.entry(e.v()).or_default().push(e.u());
        }

        let Some(reached) = component_reaching(&adjacency, edge.u(), edge.v()) else {
            // Joining two components keeps both sides' embeddings valid.
            return Ok(true);
        };

        let component = current
            .iter()
            .filter(|e| reached.contains(&e.u()))
            .chain(std::iter::once(&edge));
        let (n, local) = compact(component.map(|e| (e.u().index(), e.v().index())));
        let added = local.len() - 1;
        self.blocks_planar(n, &local, Some(added))
    }
}

/// Breadth-first search from `from`; returns the visited set if `to` was reached.
fn component_reaching(
    adjacency: &HashMap<VertexId, Vec<VertexId>>,
    from: VertexId,
    to: VertexId,
) -> Option<HashSet<VertexId>> {
    let mut seen = HashSet::from([from]);
    let mut queue = VecDeque::from([from]);
    while let Some(x) = queue.pop_front() {
        for &y in adjacency.get(&x).map_or(&[][..], Vec::as_slice) {
            if seen.insert(y) {
                queue.push_back(y);
            }
        }
    }
    seen.contains(&to).then_some(seen)
}

/// Whether `edges` on `n` vertices breaks Euler's `3n - 6` limit.
pub(crate) const fn exceeds_euler(edges: usize, n: usize) -> bool {
    n >= 3 && edges > 3 * n - 6
}

/// Relabels arbitrary vertex indices to `0..n` in order of first appearance.
pub(crate) fn compact(
    edges: impl IntoIterator<Item = (usize, usize)>,
) -> (usize, Vec<(usize, usize)>) {
    let mut ids: HashMap<usize, usize> = HashMap::new();
    let mut out = Vec::new();
    for (a, b) in edges {
        let next = ids.len();
        let a = *ids.entry(a).or_insert(next);
        let next = ids.len();
        let b = *ids.entry(b).or_insert(next);
        out.push((a, b));
    }
    (ids.len(), out)
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use planar_common::Graph;
    use rstest::rstest;

    #[rstest]
    #[case::empty(Graph::new(), true)]
    #[case::k4(Graph::complete(4), true)]
    #[case::k5(Graph::complete(5), false)]
    #[case::k6(Graph::complete(6), false)]
    #[case::k33(Graph::complete_bipartite(3, 3), false)]
    #[case::k24(Graph::complete_bipartite(2, 4), true)]
    #[case::petersen(petersen(), false)]
    #[case::subdivided_k5(subdivided(&Graph::complete(5)), false)]
    #[case::subdivided_k33(subdivided(&Graph::complete_bipartite(3, 3)), false)]
    #[case::subdivided_k4(subdivided(&Graph::complete(4)), true)]
    #[case::cube(cube(), true)]
    #[case::octahedron(octahedron(), true)]
    #[case::wheel(wheel(7), true)]
    #[case::grid(grid(4), true)]
    fn test_full_planarity(#[case] graph: Graph, #[case] expected: bool) {
        let mut oracle = EmbeddingOracle::new();
        assert_eq!(oracle.is_planar(&edges_of(&graph)).unwrap(), expected);
    }

    #[test]
    fn test_k5_minus_any_edge_is_planar() {
        let k5 = edges_of(&Graph::complete(5));
        let mut oracle = EmbeddingOracle::new();
        for skip in 0..k5.len() {
            let rest: Vec<Edge> = k5
                .iter()
                .enumerate()
                .filter_map(|(i, e)| (i != skip).then_some(*e))
                .collect();
            assert!(oracle.is_planar(&rest).unwrap());
            assert!(!oracle.is_planar_with(&rest, k5[skip]).unwrap());
        }
    }

    #[test]
    fn test_two_disjoint_k33_joined_stays_nonplanar() {
        let k33 = Graph::complete_bipartite(3, 3);
        let mut pairs: Vec<(usize, usize)> = k33
            .edges()
            .map(|e| (e.u().index(), e.v().index()))
            .collect();
        pairs.extend(k33.edges().map(|e| (e.u().index() + 6, e.v().index() + 6)));
        pairs.push((0, 6));
        let mut oracle = EmbeddingOracle::new();
        assert!(!oracle.is_planar(&edges_of(&graph(&pairs))).unwrap());
    }

    #[test]
    fn test_incremental_accepts_edge_between_components() {
        let mut oracle = EmbeddingOracle::new();
        let k4 = Graph::complete(4);
        let mut pairs: Vec<(usize, usize)> =
            k4.edges().map(|e| (e.u().index(), e.v().index())).collect();
        pairs.extend(k4.edges().map(|e| (e.u().index() + 4, e.v().index() + 4)));
        let rest = edges_of(&graph(&pairs));
        let bridge = Edge::new(VertexId::new(0), VertexId::new(4)).unwrap();
        assert!(oracle.is_planar_with(&rest, bridge).unwrap());
    }

    #[test]
    fn test_vertex_limit_raises_too_large() {
        let mut oracle = EmbeddingOracle::with_vertex_limit(Some(5));
        let err = oracle.is_planar(&edges_of(&Graph::complete(6))).unwrap_err();
        assert_eq!(
            err,
            OracleError::TooLarge {
                vertices: 6,
                limit: 5
            }
        );
    }

    #[test]
    fn test_compact_relabels_in_order() {
        let (n, edges) = compact([(10, 4), (4, 7), (7, 10)]);
        assert_eq!(n, 3);
        assert_eq!(edges, vec![(0, 1), (1, 2), (2, 0)]);
    }
}
