//! Kuratowski subdivisions as evidence of non-planarity.

use std::collections::BTreeMap;
use std::fmt;

use planar_common::{Edge, VertexId};
use tracing::debug;

use super::{OracleError, PlanarityOracle};

/// Which forbidden graph a witness subdivides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KuratowskiKind {
    /// Complete graph on five vertices.
    K5,
    /// Complete bipartite graph with three vertices per side.
    K33,
}

impl fmt::Display for KuratowskiKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::K5 => write!(f, "K5"),
            Self::K33 => write!(f, "K3,3"),
        }
    }
}

/// A subdivision of K5 or K3,3 contained in a graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KuratowskiWitness {
    /// The forbidden graph being subdivided.
    pub kind: KuratowskiKind,
    /// The five (K5) or six (K3,3) vertices of degree at least three.
    /// For K3,3 the first three form one side.
    pub branch_vertices: Vec<VertexId>,
    /// Vertex-disjoint paths between branch vertices, one per edge of the
    /// forbidden graph. Each path starts at its smaller branch vertex.
    pub paths: Vec<Vec<VertexId>>,
}

impl KuratowskiWitness {
    /// Edges of the subdivision.
    #[must_use]
    pub fn edges(&self) -> Vec<Edge> {
        self.paths
            .iter()
            .flat_map(|path| path.windows(2).filter_map(|pair| Edge::new(pair[0], pair[1])))
            .collect()
    }

    /// Number of subdivision vertices, i.e. path vertices that are not branch vertices.
    #[must_use]
    pub fn subdivision_vertices(&self) -> usize {
        self.paths
            .iter()
            .map(|path| path.len().saturating_sub(2))
            .sum()
    }
}

/// Finds a Kuratowski subdivision inside `edges`, or `None` if they are planar.
///
/// Edges are dropped one at a time whenever the rest stays non-planar; what
/// is left is a minimal non-planar graph, which is a subdivision of K5 or
/// K3,3.
///
/// # Errors
/// Propagates oracle failures, and returns [`OracleError::WitnessShape`] if
/// the minimal graph cannot be read as a subdivision.
pub fn find_witness<O: PlanarityOracle + ?Sized>(
    oracle: &mut O,
    edges: &[Edge],
) -> Result<Option<KuratowskiWitness>, OracleError> {
    if oracle.is_planar(edges)? {
        return Ok(None);
    }

    let mut minimal = edges.to_vec();
    let mut i = 0;
    while i < minimal.len() {
        let dropped = minimal.remove(i);
        if oracle.is_planar(&minimal)? {
            minimal.insert(i, dropped);
            i += 1;
        }
    }
    debug!(
        "reduced {} edges to a minimal non-planar set of {}",
        edges.len(),
        minimal.len()
    );

    trace_subdivision(&minimal).map(Some)
}

fn trace_subdivision(minimal: &[Edge]) -> Result<KuratowskiWitness, OracleError> {
    let mut adjacency: BTreeMap<VertexId, Vec<VertexId>> = BTreeMap::new();
    for edge in minimal {
        adjacency.entry(edge.u()).or_default().push(edge.v());
        adjacency.entry(edge.v()).or_default().push(edge.u());
    }

    let branch: Vec<VertexId> = adjacency
        .iter()
        .filter(|(_, neighbors)| neighbors.len() >= 3)
        .map(|(&v, _)| v)
        .collect();
    let shape = |paths: usize| OracleError::WitnessShape {
        branch_vertices: branch.len(),
        paths,
    };
    let is_branch = |v: VertexId| branch.binary_search(&v).is_ok();

    let mut paths = Vec::new();
    for &start in &branch {
        for &first in adjacency.get(&start).map_or(&[][..], Vec::as_slice) {
            let mut path = vec![start, first];
            let (mut prev, mut at) = (start, first);
            while !is_branch(at) {
                let next = adjacency
                    .get(&at)
                    .and_then(|ns| ns.iter().copied().find(|&x| x != prev))
                    .ok_or_else(|| shape(paths.len()))?;
                if path.len() > adjacency.len() {
                    return Err(shape(paths.len()));
                }
                prev = at;
                at = next;
                path.push(at);
            }
            if start < at {
                paths.push(path);
            }
        }
    }

    match (branch.len(), paths.len()) {
        (5, 10) => Ok(KuratowskiWitness {
            kind: KuratowskiKind::K5,
            branch_vertices: branch,
            paths,
        }),
        (6, 9) => {
            let anchor = branch[0];
            let linked = |v: VertexId| {
                paths.iter().any(|p| {
                    let ends = (p[0], p[p.len() - 1]);
                    ends == (anchor, v) || ends == (v, anchor)
                })
            };
            let (across, mut side): (Vec<VertexId>, Vec<VertexId>) =
                branch.iter().copied().partition(|&v| linked(v));
            if side.len() != 3 || across.len() != 3 {
                return Err(shape(paths.len()));
            }
            side.extend(across);
            Ok(KuratowskiWitness {
                kind: KuratowskiKind::K33,
                branch_vertices: side,
                paths,
            })
        }
        (_, found) => Err(shape(found)),
    }
}
