//! Undirected simple graph with a stable, insertion-ordered enumeration.
//!
//! Vertices are string labels mapped to dense [`VertexId`]s in the order they
//! were first seen. Edges are normalized unordered pairs; parallel edges
//! collapse into one and self-loops are rejected. There is no removal: subsets
//! are built as new graphs with [`Graph::spanning_subgraph`].

use std::collections::HashSet;
use std::fmt;

use contracts::*;
use indexmap::IndexSet;

use crate::error::{GraphError, InvalidEdgeReason};

/// Dense index of a vertex inside one [`Graph`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(u32);

impl VertexId {
    /// Wraps a raw vertex index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index as u32)
    }

    /// Returns the raw index, usable for slice lookups.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An undirected edge between two distinct vertices, stored with `u < v`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge {
    u: VertexId,
    v: VertexId,
}

impl Edge {
    /// Normalizes the pair; returns `None` for a self-loop.
    #[must_use]
    pub fn new(a: VertexId, b: VertexId) -> Option<Self> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(Self { u: a, v: b }),
            std::cmp::Ordering::Greater => Some(Self { u: b, v: a }),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// The smaller endpoint.
    #[must_use]
    pub const fn u(self) -> VertexId {
        self.u
    }

    /// The larger endpoint.
    #[must_use]
    pub const fn v(self) -> VertexId {
        self.v
    }

    /// Both endpoints, smaller first.
    #[must_use]
    pub const fn endpoints(self) -> (VertexId, VertexId) {
        (self.u, self.v)
    }

}

/// Undirected simple graph.
///
/// `vertices()` and `edges()` enumerate in insertion order, which is what
/// makes search order (and therefore which of several equally large answers is
/// returned) reproducible.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    labels: IndexSet<String>,
    edges: IndexSet<Edge>,
    adjacency: Vec<Vec<VertexId>>,
}

impl Graph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty graph with room for the given number of vertices and edges.
    #[must_use]
    pub fn with_capacity(vertices: usize, edges: usize) -> Self {
        Self {
            labels: IndexSet::with_capacity(vertices),
            edges: IndexSet::with_capacity(edges),
            adjacency: Vec::with_capacity(vertices),
        }
    }

    /// The complete graph on `n` vertices labelled `0..n`.
    #[must_use]
    pub fn complete(n: usize) -> Self {
        let mut graph = Self::with_capacity(n, n * n.saturating_sub(1) / 2);
        for i in 0..n {
            graph.add_vertex(i.to_string());
        }
        for i in 0..n {
            for j in (i + 1)..n {
                if let Some(edge) = Edge::new(VertexId::new(i), VertexId::new(j)) {
                    graph.insert_edge(edge);
                }
            }
        }
        graph
    }

    /// The complete bipartite graph with sides `0..a` and `a..a+b`.
    #[must_use]
    pub fn complete_bipartite(a: usize, b: usize) -> Self {
        let mut graph = Self::with_capacity(a + b, a * b);
        for i in 0..(a + b) {
            graph.add_vertex(i.to_string());
        }
        for i in 0..a {
            for j in a..(a + b) {
                if let Some(edge) = Edge::new(VertexId::new(i), VertexId::new(j)) {
                    graph.insert_edge(edge);
                }
            }
        }
        graph
    }

    /// Builds a graph from labelled endpoint pairs, creating vertices on demand.
    ///
    /// # Errors
    /// Returns [`GraphError::InvalidEdge`] on the first self-loop.
    pub fn from_edge_labels<'a>(
        pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self, GraphError> {
        let mut graph = Self::new();
        for (a, b) in pairs {
            graph.add_edge_by_label(a, b)?;
        }
        Ok(graph)
    }

    /// Adds a vertex, returning its id. Adding an existing label returns the existing id.
    pub fn add_vertex(&mut self, label: impl Into<String>) -> VertexId {
        let (index, inserted) = self.labels.insert_full(label.into());
        if inserted {
            self.adjacency.push(Vec::new());
        }
        VertexId::new(index)
    }

    /// Adds the edge `u -- v`. Returns `Ok(false)` if it was already present.
    ///
    /// # Errors
    /// Returns [`GraphError::InvalidEdge`] if `u == v` or either endpoint is unknown.
    #[debug_ensures(ret.is_err() || self.has_edge(u, v))]
    pub fn add_edge(&mut self, u: VertexId, v: VertexId) -> Result<bool, GraphError> {
        let known = self.labels.len();
        if u.index() >= known || v.index() >= known {
            return Err(GraphError::invalid_edge(
                self.describe(u),
                self.describe(v),
                InvalidEdgeReason::UnknownEndpoint,
            ));
        }
        let Some(edge) = Edge::new(u, v) else {
            return Err(GraphError::invalid_edge(
                self.describe(u),
                self.describe(v),
                InvalidEdgeReason::SelfLoop,
            ));
        };
        Ok(self.insert_edge(edge))
    }

    /// Adds the edge between two labels, creating missing vertices first.
    ///
    /// # Errors
    /// Returns [`GraphError::InvalidEdge`] if both labels are the same.
    pub fn add_edge_by_label(&mut self, a: &str, b: &str) -> Result<bool, GraphError> {
        if a == b {
            return Err(GraphError::invalid_edge(a, b, InvalidEdgeReason::SelfLoop));
        }
        let u = self.add_vertex(a);
        let v = self.add_vertex(b);
        self.add_edge(u, v)
    }

    fn insert_edge(&mut self, edge: Edge) -> bool {
        if !self.edges.insert(edge) {
            return false;
        }
        let (u, v) = edge.endpoints();
        self.adjacency[u.index()].push(v);
        self.adjacency[v.index()].push(u);
        true
    }

    fn describe(&self, v: VertexId) -> String {
        self.label(v)
            .map_or_else(|| v.to_string(), std::borrow::ToOwned::to_owned)
    }

    /// Whether `u -- v` is an edge. Expected O(1).
    #[must_use]
    pub fn has_edge(&self, u: VertexId, v: VertexId) -> bool {
        Edge::new(u, v).is_some_and(|edge| self.edges.contains(&edge))
    }

    /// Whether the normalized edge is present.
    #[must_use]
    pub fn contains_edge(&self, edge: Edge) -> bool {
        self.edges.contains(&edge)
    }

    /// Number of edges incident to `v`; zero for unknown vertices.
    #[must_use]
    pub fn degree(&self, v: VertexId) -> usize {
        self.adjacency.get(v.index()).map_or(0, Vec::len)
    }

    /// Neighbours of `v` in the order their edges were added.
    #[must_use]
    pub fn neighbors(&self, v: VertexId) -> &[VertexId] {
        self.adjacency.get(v.index()).map_or(&[], Vec::as_slice)
    }

    /// All vertex ids in insertion order.
    pub fn vertices(&self) -> impl ExactSizeIterator<Item = VertexId> {
        (0..self.labels.len()).map(VertexId::new)
    }

    /// All vertex labels in insertion order.
    pub fn labels(&self) -> impl ExactSizeIterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    /// All edges in insertion order.
    pub fn edges(&self) -> impl ExactSizeIterator<Item = Edge> {
        self.edges.iter().copied()
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.labels.len()
    }

    /// Number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Label of `v`, if it belongs to this graph.
    #[must_use]
    pub fn label(&self, v: VertexId) -> Option<&str> {
        self.labels.get_index(v.index()).map(String::as_str)
    }

    /// Id of the vertex with the given label.
    #[must_use]
    pub fn vertex_id(&self, label: &str) -> Option<VertexId> {
        self.labels.get_index_of(label).map(VertexId::new)
    }

    /// Labels of both endpoints of `edge`, if they belong to this graph.
    #[must_use]
    pub fn edge_labels(&self, edge: Edge) -> Option<(&str, &str)> {
        Some((self.label(edge.u())?, self.label(edge.v())?))
    }

    /// A new graph with every vertex of `self` and the edges for which `keep` holds.
    ///
    /// Vertex ids and the relative order of kept edges are preserved.
    #[debug_ensures(ret.vertex_count() == self.vertex_count())]
    #[debug_ensures(ret.edge_count() <= self.edge_count())]
    pub fn spanning_subgraph(&self, mut keep: impl FnMut(Edge) -> bool) -> Self {
        let mut out = Self::with_capacity(self.vertex_count(), self.edge_count());
        for label in &self.labels {
            out.add_vertex(label.clone());
        }
        for edge in self.edges() {
            if keep(edge) {
                out.insert_edge(edge);
            }
        }
        out
    }

    fn labelled_edges(&self) -> HashSet<(&str, &str)> {
        self.edges()
            .filter_map(|edge| self.edge_labels(edge))
            .map(|(a, b)| if a <= b { (a, b) } else { (b, a) })
            .collect()
    }
}

/// Graphs compare by edge-set content, independent of insertion order or ids.
impl PartialEq for Graph {
    fn eq(&self, other: &Self) -> bool {
        self.edge_count() == other.edge_count() && self.labelled_edges() == other.labelled_edges()
    }
}

impl Eq for Graph {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_edge_rejects_self_loop() {
        let mut graph = Graph::new();
        let a = graph.add_vertex("a");
        let err = graph.add_edge(a, a).unwrap_err();
        assert_eq!(
            err,
            GraphError::invalid_edge("a", "a", InvalidEdgeReason::SelfLoop)
        );
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_add_edge_rejects_unknown_endpoint() {
        let mut graph = Graph::new();
        let a = graph.add_vertex("a");
        let err = graph.add_edge(a, VertexId::new(7)).unwrap_err();
        assert!(matches!(
            err,
            GraphError::InvalidEdge {
                reason: InvalidEdgeReason::UnknownEndpoint,
                ..
            }
        ));
    }

    #[test]
    fn test_add_edge_is_idempotent_and_symmetric() {
        let mut graph = Graph::new();
        let a = graph.add_vertex("a");
        let b = graph.add_vertex("b");
        assert!(graph.add_edge(a, b).unwrap());
        assert!(!graph.add_edge(b, a).unwrap());
        assert_eq!(graph.edge_count(), 1);
        assert!(graph.has_edge(a, b));
        assert!(graph.has_edge(b, a));
        assert_eq!(graph.degree(a), 1);
        assert_eq!(graph.degree(b), 1);
    }

    #[test]
    fn test_add_vertex_returns_existing_id() {
        let mut graph = Graph::new();
        let first = graph.add_vertex("x");
        let again = graph.add_vertex("x");
        assert_eq!(first, again);
        assert_eq!(graph.vertex_count(), 1);
    }

    #[test]
    fn test_enumeration_follows_insertion_order() {
        let graph = Graph::from_edge_labels([("c", "a"), ("b", "c"), ("a", "b")]).unwrap();
        let labels: Vec<&str> = graph.labels().collect();
        assert_eq!(labels, vec!["c", "a", "b"]);

        let edges: Vec<(&str, &str)> = graph
            .edges()
            .map(|e| graph.edge_labels(e).unwrap())
            .collect();
        assert_eq!(edges, vec![("c", "a"), ("c", "b"), ("a", "b")]);
    }

    #[test]
    fn test_equality_is_by_edge_content() {
        let left = Graph::from_edge_labels([("1", "2"), ("2", "3")]).unwrap();
        let right = Graph::from_edge_labels([("3", "2"), ("2", "1")]).unwrap();
        let other = Graph::from_edge_labels([("1", "2"), ("1", "3")]).unwrap();
        assert_eq!(left, right);
        assert_ne!(left, other);
    }

    #[test]
    fn test_canonical_graph_sizes() {
        let k5 = Graph::complete(5);
        assert_eq!((k5.vertex_count(), k5.edge_count()), (5, 10));

        let k33 = Graph::complete_bipartite(3, 3);
        assert_eq!((k33.vertex_count(), k33.edge_count()), (6, 9));
        assert!(!k33.has_edge(VertexId::new(0), VertexId::new(1)));
        assert!(k33.has_edge(VertexId::new(0), VertexId::new(5)));
    }

    #[test]
    fn test_spanning_subgraph_keeps_isolated_vertices() {
        let mut graph = Graph::complete(3);
        graph.add_vertex("lonely");
        let sub = graph.spanning_subgraph(|_| false);
        assert_eq!(sub.vertex_count(), 4);
        assert_eq!(sub.edge_count(), 0);
        assert_eq!(sub.vertex_id("lonely"), graph.vertex_id("lonely"));
    }
}
