//! Configuration for the maximum planar subgraph search.
//!
//! The search is exact whatever the configuration says; every knob here only
//! changes how quickly a good incumbent is found, how hard the bound prunes, or
//! when the caller gives up.
//!
//! ```ignore
//! use planar_common::{BoundKind, Config, EdgeOrder};
//! use std::time::Duration;
//!
//! let cfg = Config::builder()
//!     .order(EdgeOrder::Insertion)
//!     .bound(BoundKind::Euler)
//!     .time_limit(Duration::from_secs(30))
//!     .build();
//! ```

use std::time::Duration;

/// Order in which the search decides edges.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EdgeOrder {
    /// Descending by combined endpoint degree in the input graph,
    /// ties broken by insertion order.
    #[default]
    DegreeDescending,
    /// Plain insertion order of the input graph.
    Insertion,
}

/// Which admissible upper bound drives pruning.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BoundKind {
    /// `|current| + |remaining|`.
    Trivial,
    /// Per-component `3n - 6` (or `2n - 4` for triangle-free inputs).
    Euler,
    /// The tighter of [`BoundKind::Trivial`] and [`BoundKind::Euler`].
    #[default]
    Combined,
}

/// Global search configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Branching order.
    pub order: EdgeOrder,
    /// Pruning bound.
    pub bound: BoundKind,
    /// Wall-clock budget; when it runs out the best incumbent is returned as best-effort.
    pub time_limit: Option<Duration>,
    /// Explore independent subtrees concurrently (needs the `rayon` feature of the engine).
    pub parallel: bool,
    /// Number of leading edges decided up front to produce parallel work items.
    pub split_depth: usize,
    /// Refuse oracle queries whose component has more vertices than this.
    pub oracle_vertex_limit: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            order: EdgeOrder::default(),
            bound: BoundKind::default(),
            time_limit: None,
            parallel: false,
            split_depth: 6,
            oracle_vertex_limit: None,
        }
    }
}

impl Config {
    /// Start building a configuration from the defaults.
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for [`Config`].
#[derive(Clone, Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the branching order.
    #[must_use]
    pub const fn order(mut self, order: EdgeOrder) -> Self {
        self.config.order = order;
        self
    }

    /// Set the pruning bound.
    #[must_use]
    pub const fn bound(mut self, bound: BoundKind) -> Self {
        self.config.bound = bound;
        self
    }

    /// Set a wall-clock budget.
    #[must_use]
    pub const fn time_limit(mut self, limit: Duration) -> Self {
        self.config.time_limit = Some(limit);
        self
    }

    /// Set or clear the wall-clock budget.
    #[must_use]
    pub const fn maybe_time_limit(mut self, limit: Option<Duration>) -> Self {
        self.config.time_limit = limit;
        self
    }

    /// Enable or disable parallel exploration.
    #[must_use]
    pub const fn parallel(mut self, parallel: bool) -> Self {
        self.config.parallel = parallel;
        self
    }

    /// Set how many leading edges are decided before work is split.
    #[must_use]
    pub const fn split_depth(mut self, depth: usize) -> Self {
        self.config.split_depth = depth;
        self
    }

    /// Cap the component size the oracle accepts.
    #[must_use]
    pub const fn oracle_vertex_limit(mut self, limit: usize) -> Self {
        self.config.oracle_vertex_limit = Some(limit);
        self
    }

    /// Finish building.
    #[must_use]
    pub fn build(self) -> Config {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults_match_default() {
        assert_eq!(Config::builder().build(), Config::default());
        let cfg = Config::default();
        assert_eq!(cfg.order, EdgeOrder::DegreeDescending);
        assert_eq!(cfg.bound, BoundKind::Combined);
        assert!(cfg.time_limit.is_none());
        assert!(!cfg.parallel);
    }

    #[test]
    fn test_builder_overrides() {
        let cfg = Config::builder()
            .order(EdgeOrder::Insertion)
            .bound(BoundKind::Trivial)
            .time_limit(Duration::from_millis(5))
            .parallel(true)
            .split_depth(3)
            .oracle_vertex_limit(40)
            .build();
        assert_eq!(cfg.order, EdgeOrder::Insertion);
        assert_eq!(cfg.bound, BoundKind::Trivial);
        assert_eq!(cfg.time_limit, Some(Duration::from_millis(5)));
        assert!(cfg.parallel);
        assert_eq!(cfg.split_depth, 3);
        assert_eq!(cfg.oracle_vertex_limit, Some(40));
    }
}
