use contracts::*;
use planar_common::Edge;

/// Position of the search: which edges have been decided and which of those
/// were kept.
///
/// Edges `order[..depth]` are decided, `order[depth..]` are still open. The
/// kept edges form `current`, which is planar at all times.
#[derive(Clone, Debug)]
pub struct SearchState<'a> {
    order: &'a [Edge],
    depth: usize,
    current: Vec<Edge>,
}

impl<'a> SearchState<'a> {
    /// The root state: nothing decided, nothing kept.
    #[must_use]
    pub fn new(order: &'a [Edge]) -> Self {
        Self {
            order,
            depth: 0,
            current: Vec::with_capacity(order.len()),
        }
    }

    /// A state with `order[..depth]` decided and `current` kept.
    #[debug_requires(depth <= order.len())]
    #[debug_requires(current.len() <= depth)]
    pub(crate) fn with_prefix(order: &'a [Edge], depth: usize, current: Vec<Edge>) -> Self {
        Self {
            order,
            depth,
            current,
        }
    }

    /// Number of decided edges.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Edges kept so far.
    #[must_use]
    pub fn current(&self) -> &[Edge] {
        &self.current
    }

    /// Edges not yet decided, in branching order.
    #[must_use]
    pub fn remaining(&self) -> &'a [Edge] {
        &self.order[self.depth.min(self.order.len())..]
    }

    /// The edge to branch on next.
    #[must_use]
    pub fn next_edge(&self) -> Option<Edge> {
        self.order.get(self.depth).copied()
    }

    #[debug_requires(depth <= self.order.len())]
    pub(crate) fn seek(&mut self, depth: usize) {
        self.depth = depth;
    }

    pub(crate) fn include(&mut self, edge: Edge) {
        self.current.push(edge);
    }

    #[debug_requires(!self.current.is_empty())]
    pub(crate) fn retract(&mut self) {
        self.current.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planar_common::Graph;

    #[test]
    fn test_remaining_follows_depth() {
        let graph = Graph::complete(4);
        let order: Vec<Edge> = graph.edges().collect();
        let mut state = SearchState::new(&order);
        assert_eq!(state.remaining().len(), 6);
        assert_eq!(state.next_edge(), Some(order[0]));

        state.include(order[0]);
        state.seek(1);
        assert_eq!(state.current(), &order[..1]);
        assert_eq!(state.remaining(), &order[1..]);

        state.retract();
        state.seek(6);
        assert!(state.current().is_empty());
        assert!(state.remaining().is_empty());
        assert_eq!(state.next_edge(), None);
    }
}
