use std::collections::HashSet;

use contracts::*;
use planar_common::{Edge, Graph};

/// Builds the result graph: every vertex of `input`, and exactly the edges of
/// `incumbent`, in the input's insertion order.
#[debug_requires(incumbent.iter().all(|e| input.contains_edge(*e)))]
#[debug_ensures(ret.vertex_count() == input.vertex_count())]
#[must_use]
pub fn assemble(input: &Graph, incumbent: &[Edge]) -> Graph {
    let keep: HashSet<Edge> = incumbent.iter().copied().collect();
    input.spanning_subgraph(|edge| keep.contains(&edge))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assemble_keeps_isolated_vertices_and_order() {
        let mut input = Graph::from_edge_labels([("a", "b"), ("c", "d"), ("b", "c")]).unwrap();
        input.add_vertex("lonely");
        let edges: Vec<Edge> = input.edges().collect();

        let result = assemble(&input, &[edges[2], edges[0]]);

        assert_eq!(result.vertex_count(), 5);
        assert_eq!(result.edges().collect::<Vec<_>>(), vec![edges[0], edges[2]]);
        assert_eq!(result.label(edges[0].u()), Some("a"));
    }

    #[test]
    fn test_assemble_empty_incumbent() {
        let input = Graph::complete(4);
        let result = assemble(&input, &[]);
        assert_eq!(result.vertex_count(), 4);
        assert_eq!(result.edge_count(), 0);
    }
}
