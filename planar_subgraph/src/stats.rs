use std::fmt;
use std::time::Duration;

/// Counters collected while searching.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Search nodes expanded.
    pub nodes_visited: u64,
    /// Planarity oracle queries.
    pub oracle_calls: u64,
    /// Queries answered "not planar".
    pub oracle_rejections: u64,
    /// Subtrees cut by the bound.
    pub pruned: u64,
    /// Times the incumbent grew.
    pub incumbent_updates: u64,
    /// Wall-clock time of the whole search.
    pub elapsed: Duration,
}

impl SearchStats {
    /// Adds the counters of `other`; elapsed time is left alone since workers overlap.
    pub const fn absorb(&mut self, other: &Self) {
        self.nodes_visited += other.nodes_visited;
        self.oracle_calls += other.oracle_calls;
        self.oracle_rejections += other.oracle_rejections;
        self.pruned += other.pruned;
        self.incumbent_updates += other.incumbent_updates;
    }
}

impl fmt::Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "nodes={} oracle_calls={} rejected={} pruned={} improvements={} elapsed={:?}",
            self.nodes_visited,
            self.oracle_calls,
            self.oracle_rejections,
            self.pruned,
            self.incumbent_updates,
            self.elapsed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absorb_sums_counters() {
        let mut total = SearchStats {
            nodes_visited: 3,
            oracle_calls: 2,
            elapsed: Duration::from_millis(5),
            ..SearchStats::default()
        };
        let worker = SearchStats {
            nodes_visited: 4,
            oracle_calls: 1,
            oracle_rejections: 1,
            pruned: 2,
            incumbent_updates: 1,
            elapsed: Duration::from_millis(50),
        };
        total.absorb(&worker);
        assert_eq!(total.nodes_visited, 7);
        assert_eq!(total.oracle_calls, 3);
        assert_eq!(total.oracle_rejections, 1);
        assert_eq!(total.pruned, 2);
        assert_eq!(total.incumbent_updates, 1);
        assert_eq!(total.elapsed, Duration::from_millis(5));
    }
}
