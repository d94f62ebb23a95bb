//! Face-by-face embedding of a single biconnected block.
//!
//! Starting from any cycle, the block is grown one path at a time. Each
//! fragment of the unembedded rest (a chord between embedded vertices, or a
//! connected piece of unembedded vertices with its attachments) may only be
//! drawn inside a face containing all of its attachments. A fragment with no
//! such face proves non-planarity. Fragments with a single admissible face
//! are placed first; otherwise any placement is safe.

use std::collections::{BTreeSet, HashSet, VecDeque};

use super::{OracleError, TRIVIAL_EDGES, TRIVIAL_VERTICES, exceeds_euler};

/// Whether the block with vertices `0..n` and `edges` is planar.
///
/// `edges` must form a single biconnected block.
pub(super) fn block_is_planar(n: usize, edges: &[(usize, usize)]) -> Result<bool, OracleError> {
    if edges.len() <= TRIVIAL_EDGES || n <= TRIVIAL_VERTICES {
        return Ok(true);
    }
    if exceeds_euler(edges.len(), n) {
        return Ok(false);
    }

    let mut adjacency = vec![Vec::new(); n];
    for &(a, b) in edges {
        adjacency[a].push(b);
        adjacency[b].push(a);
    }

    let cycle =
        initial_cycle(&adjacency, edges[0]).ok_or(OracleError::NoCycle { edges: edges.len() })?;
    let mut embedding = Embedding::new(n, cycle);

    loop {
        let fragments = embedding.fragments(&adjacency, edges);
        if fragments.is_empty() {
            return Ok(true);
        }
        let Some((index, face)) = embedding.choose(&fragments) else {
            return Ok(false);
        };
        let path = fragments[index].path(&adjacency, &embedding.placed)?;
        embedding.embed(face, &path)?;
    }
}

/// A cycle through `edge`, found as a shortest path between its endpoints
/// that avoids the edge itself.
fn initial_cycle(adjacency: &[Vec<usize>], (a, b): (usize, usize)) -> Option<Vec<usize>> {
    let mut parent = vec![None; adjacency.len()];
    parent[a] = Some(a);
    let mut queue = VecDeque::from([a]);
    while let Some(x) = queue.pop_front() {
        for &y in &adjacency[x] {
            if parent[y].is_some() || (x == a && y == b) {
                continue;
            }
            parent[y] = Some(x);
            if y == b {
                let mut cycle = vec![b];
                let mut at = b;
                while at != a {
                    at = parent[at]?;
                    cycle.push(at);
                }
                return Some(cycle);
            }
            queue.push_back(y);
        }
    }
    None
}

const fn key(a: usize, b: usize) -> (usize, usize) {
    if a < b { (a, b) } else { (b, a) }
}

struct Fragment {
    /// Embedded vertices the fragment attaches to, ascending.
    contacts: Vec<usize>,
    /// Unembedded vertices; empty for a chord.
    interior: Vec<usize>,
}

impl Fragment {
    /// A path through the fragment between two distinct contacts.
    fn path(&self, adjacency: &[Vec<usize>], placed: &[bool]) -> Result<Vec<usize>, OracleError> {
        let degenerate = || OracleError::DegenerateFragment {
            contacts: self.contacts.len(),
        };
        let [a, b, ..] = self.contacts[..] else {
            return Err(degenerate());
        };
        if self.interior.is_empty() {
            return Ok(vec![a, b]);
        }

        let mut inside = vec![false; adjacency.len()];
        for &x in &self.interior {
            inside[x] = true;
        }
        let start = *self
            .interior
            .iter()
            .find(|&&x| adjacency[x].contains(&a))
            .ok_or_else(degenerate)?;

        let mut parent = vec![None; adjacency.len()];
        parent[start] = Some(start);
        let mut queue = VecDeque::from([start]);
        while let Some(x) = queue.pop_front() {
            if let Some(&end) = adjacency[x].iter().find(|&&y| placed[y] && y != a) {
                let mut middle = vec![x];
                let mut at = x;
                while at != start {
                    at = parent[at].ok_or_else(degenerate)?;
                    middle.push(at);
                }
                let mut path = Vec::with_capacity(middle.len() + 2);
                path.push(a);
                path.extend(middle.into_iter().rev());
                path.push(end);
                return Ok(path);
            }
            for &y in &adjacency[x] {
                if inside[y] && parent[y].is_none() {
                    parent[y] = Some(x);
                    queue.push_back(y);
                }
            }
        }
        Err(degenerate())
    }
}

struct Embedding {
    /// Each face as its cyclic boundary walk.
    faces: Vec<Vec<usize>>,
    placed: Vec<bool>,
    placed_edges: HashSet<(usize, usize)>,
}

impl Embedding {
    fn new(n: usize, cycle: Vec<usize>) -> Self {
        let mut placed = vec![false; n];
        for &x in &cycle {
            placed[x] = true;
        }
        let placed_edges = cycle
            .iter()
            .zip(cycle.iter().cycle().skip(1))
            .map(|(&a, &b)| key(a, b))
            .collect();
        Self {
            faces: vec![cycle.clone(), cycle],
            placed,
            placed_edges,
        }
    }

    fn fragments(&self, adjacency: &[Vec<usize>], edges: &[(usize, usize)]) -> Vec<Fragment> {
        let mut out: Vec<Fragment> = edges
            .iter()
            .filter(|&&(a, b)| {
                self.placed[a] && self.placed[b] && !self.placed_edges.contains(&key(a, b))
            })
            .map(|&(a, b)| {
                let (a, b) = key(a, b);
                Fragment {
                    contacts: vec![a, b],
                    interior: Vec::new(),
                }
            })
            .collect();

        let mut seen = vec![false; adjacency.len()];
        for start in 0..adjacency.len() {
            if self.placed[start] || seen[start] || adjacency[start].is_empty() {
                continue;
            }
            seen[start] = true;
            let mut interior = Vec::new();
            let mut contacts = BTreeSet::new();
            let mut queue = VecDeque::from([start]);
            while let Some(x) = queue.pop_front() {
                interior.push(x);
                for &y in &adjacency[x] {
                    if self.placed[y] {
                        contacts.insert(y);
                    } else if !seen[y] {
                        seen[y] = true;
                        queue.push_back(y);
                    }
                }
            }
            out.push(Fragment {
                contacts: contacts.into_iter().collect(),
                interior,
            });
        }
        out
    }

    /// Picks a fragment and a face to draw it in, or `None` if some fragment
    /// fits no face.
    fn choose(&self, fragments: &[Fragment]) -> Option<(usize, usize)> {
        let mut fallback = None;
        for (index, fragment) in fragments.iter().enumerate() {
            let mut admissible = self
                .faces
                .iter()
                .enumerate()
                .filter(|(_, face)| fragment.contacts.iter().all(|c| face.contains(c)))
                .map(|(face, _)| face);
            let first = admissible.next()?;
            if admissible.next().is_none() {
                return Some((index, first));
            }
            fallback.get_or_insert((index, first));
        }
        fallback
    }

    /// Draws `path` inside face `face`, splitting it in two.
    fn embed(&mut self, face: usize, path: &[usize]) -> Result<(), OracleError> {
        let (&a, &b) = path
            .first()
            .zip(path.last())
            .ok_or(OracleError::DegenerateFragment { contacts: 0 })?;
        let walk = &self.faces[face];
        let i = walk
            .iter()
            .position(|&x| x == a)
            .ok_or(OracleError::FaceMismatch { vertex: a })?;
        let j = walk
            .iter()
            .position(|&x| x == b)
            .ok_or(OracleError::FaceMismatch { vertex: b })?;
        let inner = &path[1..path.len() - 1];

        let arc = |from: usize, to: usize| {
            let mut out = Vec::new();
            let mut k = from;
            loop {
                out.push(walk[k]);
                if k == to {
                    break;
                }
                k = (k + 1) % walk.len();
            }
            out
        };

        let mut first = arc(i, j);
        first.extend(inner.iter().rev());
        let mut second = arc(j, i);
        second.extend(inner);

        self.faces[face] = first;
        self.faces.push(second);
        for &x in path {
            self.placed[x] = true;
        }
        for pair in path.windows(2) {
            self.placed_edges.insert(key(pair[0], pair[1]));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete(n: usize) -> Vec<(usize, usize)> {
        (0..n)
            .flat_map(|a| ((a + 1)..n).map(move |b| (a, b)))
            .collect()
    }

    #[test]
    fn test_k5_block_is_not_planar() {
        assert!(!block_is_planar(5, &complete(5)).unwrap());
    }

    #[test]
    fn test_k33_block_is_not_planar() {
        let edges: Vec<(usize, usize)> = (0..3).flat_map(|a| (3..6).map(move |b| (a, b))).collect();
        assert!(!block_is_planar(6, &edges).unwrap());
    }

    #[test]
    fn test_maximal_planar_block_is_planar() {
        // K6 minus a perfect matching is the octahedron with 12 = 3n - 6 edges.
        let edges: Vec<(usize, usize)> = complete(6)
            .into_iter()
            .filter(|&(a, b)| b != a + 3)
            .collect();
        assert_eq!(edges.len(), 12);
        assert!(block_is_planar(6, &edges).unwrap());
    }

    #[test]
    fn test_initial_cycle_avoids_its_edge() {
        let adjacency = vec![vec![1, 3], vec![0, 2], vec![1, 3], vec![2, 0]];
        let cycle = initial_cycle(&adjacency, (0, 1)).unwrap();
        assert_eq!(cycle.len(), 4);
        assert_eq!(cycle.first(), Some(&1));
        assert_eq!(cycle.last(), Some(&0));
    }
}
