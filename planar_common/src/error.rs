//! Error types for graph construction.

use std::fmt;

use thiserror::Error;

/// Errors raised while building a [`crate::Graph`].
///
/// Validation happens when the graph is constructed, so these never surface
/// from the search itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// The edge is a self-loop or names a vertex the graph does not contain.
    #[error("invalid edge {u} -- {v}: {reason}")]
    InvalidEdge {
        /// First endpoint as given by the caller.
        u: String,
        /// Second endpoint as given by the caller.
        v: String,
        /// Why the edge was rejected.
        reason: InvalidEdgeReason,
    },
}

impl GraphError {
    /// Create an invalid edge error.
    pub fn invalid_edge(
        u: impl Into<String>,
        v: impl Into<String>,
        reason: InvalidEdgeReason,
    ) -> Self {
        Self::InvalidEdge {
            u: u.into(),
            v: v.into(),
            reason,
        }
    }
}

/// Why an edge was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidEdgeReason {
    /// Both endpoints are the same vertex.
    SelfLoop,
    /// At least one endpoint is not a member of the vertex set.
    UnknownEndpoint,
}

impl fmt::Display for InvalidEdgeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SelfLoop => f.write_str("self-loops are not allowed"),
            Self::UnknownEndpoint => f.write_str("endpoint is not a vertex of the graph"),
        }
    }
}
