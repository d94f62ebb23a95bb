//! Admissible upper bounds on the size of any planar subgraph reachable from
//! a search state.
//!
//! Every estimator returns a bound on the *total* size, `|current|` included,
//! so the engine prunes when the bound does not exceed the incumbent.

use planar_common::{BoundKind, Graph, VertexId};
use thiserror::Error;

use crate::search::SearchState;

/// The estimator was handed a state it cannot evaluate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoundError {
    /// An edge of the state has an endpoint outside the input graph.
    #[error("vertex {vertex} is outside the graph of {vertices} vertices")]
    UnknownVertex {
        /// Offending endpoint.
        vertex: VertexId,
        /// Vertex count of the input graph.
        vertices: usize,
    },
}

/// Upper bound on the best total reachable from a state.
///
/// Implementations must never underestimate and must not query the oracle.
pub trait BoundEstimator: Send + Sync {
    /// Admissible bound on `|current|` plus whatever `remaining` can still add.
    ///
    /// # Errors
    /// Returns [`BoundError`] if the state does not belong to the graph the
    /// estimator was built for.
    fn upper_bound(&self, state: &SearchState<'_>) -> Result<usize, BoundError>;
}

/// Every undecided edge might still be accepted.
#[derive(Clone, Copy, Debug, Default)]
pub struct TrivialBound;

impl BoundEstimator for TrivialBound {
    fn upper_bound(&self, state: &SearchState<'_>) -> Result<usize, BoundError> {
        Ok(state.current().len() + state.remaining().len())
    }
}

/// Euler's formula applied per connected component of `current ∪ remaining`.
///
/// A planar component on `n >= 3` vertices has at most `3n - 6` edges, or
/// `2n - 4` if it has no triangle. The triangle-free cap is used when the
/// whole input graph is triangle-free, which every subgraph inherits.
#[derive(Clone, Debug)]
pub struct EulerBound {
    vertices: usize,
    triangle_free: bool,
}

impl EulerBound {
    /// Prepares the bound for searches over `graph`.
    #[must_use]
    pub fn new(graph: &Graph) -> Self {
        Self {
            vertices: graph.vertex_count(),
            triangle_free: !has_triangle(graph),
        }
    }

    /// Most edges a simple planar graph on `n` connected vertices can carry.
    #[must_use]
    pub const fn cap(&self, n: usize) -> usize {
        match n {
            0 | 1 => 0,
            2 => 1,
            n if self.triangle_free => 2 * n - 4,
            n => 3 * n - 6,
        }
    }

    fn index(&self, v: VertexId) -> Result<usize, BoundError> {
        if v.index() < self.vertices {
            Ok(v.index())
        } else {
            Err(BoundError::UnknownVertex {
                vertex: v,
                vertices: self.vertices,
            })
        }
    }
}

impl BoundEstimator for EulerBound {
    fn upper_bound(&self, state: &SearchState<'_>) -> Result<usize, BoundError> {
        let mut sets = DisjointSets::new(self.vertices);
        let edges = || state.current().iter().chain(state.remaining());
        for edge in edges() {
            sets.union(self.index(edge.u())?, self.index(edge.v())?);
        }

        // (touched vertices, edges) per component root
        let mut components = vec![(0usize, 0usize); self.vertices];
        let mut touched = vec![false; self.vertices];
        for edge in edges() {
            let root = sets.find(edge.u().index());
            components[root].1 += 1;
            for v in [edge.u().index(), edge.v().index()] {
                if !touched[v] {
                    touched[v] = true;
                    components[root].0 += 1;
                }
            }
        }

        Ok(components.iter().map(|&(n, m)| m.min(self.cap(n))).sum())
    }
}

/// The tighter of [`TrivialBound`] and [`EulerBound`].
#[derive(Clone, Debug)]
pub struct CombinedBound {
    euler: EulerBound,
}

impl CombinedBound {
    /// Prepares the bound for searches over `graph`.
    #[must_use]
    pub fn new(graph: &Graph) -> Self {
        Self {
            euler: EulerBound::new(graph),
        }
    }
}

impl BoundEstimator for CombinedBound {
    fn upper_bound(&self, state: &SearchState<'_>) -> Result<usize, BoundError> {
        let trivial = TrivialBound.upper_bound(state)?;
        let euler = self.euler.upper_bound(state)?;
        Ok(trivial.min(euler))
    }
}

/// The estimator selected by `kind`, prepared for `graph`.
#[must_use]
pub fn bound_for(kind: BoundKind, graph: &Graph) -> Box<dyn BoundEstimator> {
    match kind {
        BoundKind::Trivial => Box::new(TrivialBound),
        BoundKind::Euler => Box::new(EulerBound::new(graph)),
        BoundKind::Combined => Box::new(CombinedBound::new(graph)),
    }
}

fn has_triangle(graph: &Graph) -> bool {
    graph.edges().any(|edge| {
        graph
            .neighbors(edge.u())
            .iter()
            .any(|&w| w != edge.v() && graph.has_edge(edge.v(), w))
    })
}

/// Union-find with path halving.
struct DisjointSets {
    parent: Vec<usize>,
}

impl DisjointSets {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra != rb {
            self.parent[ra] = rb;
        }
    }
}

/// Edges of `graph` in insertion order; shared by the bound tests.
#[cfg(test)]
fn order_of(graph: &Graph) -> Vec<planar_common::Edge> {
    graph.edges().collect()
}
