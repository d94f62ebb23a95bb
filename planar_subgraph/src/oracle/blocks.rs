//! Biconnected blocks by Tarjan's low-point method, without recursion.

const UNSEEN: usize = usize::MAX;

/// Splits `edges` on vertices `0..n` into biconnected blocks.
///
/// Each block is returned as indices into `edges`. Every edge lands in exactly
/// one block; a bridge forms a block of its own.
pub(super) fn biconnected_blocks(n: usize, edges: &[(usize, usize)]) -> Vec<Vec<usize>> {
    let mut adjacency: Vec<Vec<(usize, usize)>> = vec![Vec::new(); n];
    for (id, &(a, b)) in edges.iter().enumerate() {
        adjacency[a].push((b, id));
        adjacency[b].push((a, id));
    }

    let mut discovered = vec![UNSEEN; n];
    let mut low = vec![0; n];
    let mut clock = 0;
    let mut edge_stack: Vec<usize> = Vec::new();
    let mut blocks = Vec::new();
    // (vertex, tree edge it was reached by, next adjacency slot)
    let mut stack: Vec<(usize, Option<usize>, usize)> = Vec::new();

    for root in 0..n {
        if discovered[root] != UNSEEN || adjacency[root].is_empty() {
            continue;
        }
        discovered[root] = clock;
        low[root] = clock;
        clock += 1;
        stack.push((root, None, 0));

        while let Some(&(v, via, slot)) = stack.last() {
            if let Some(&(w, id)) = adjacency[v].get(slot) {
                if let Some(top) = stack.last_mut() {
                    top.2 += 1;
                }
                if Some(id) == via {
                    continue;
                }
                if discovered[w] == UNSEEN {
                    edge_stack.push(id);
                    discovered[w] = clock;
                    low[w] = clock;
                    clock += 1;
                    stack.push((w, Some(id), 0));
                } else if discovered[w] < discovered[v] {
                    edge_stack.push(id);
                    low[v] = low[v].min(discovered[w]);
                }
                continue;
            }

            stack.pop();
            let (Some(&(parent, _, _)), Some(tree_edge)) = (stack.last(), via) else {
                continue;
            };
            low[parent] = low[parent].min(low[v]);
            if low[v] >= discovered[parent] {
                let mut block = Vec::new();
                while let Some(id) = edge_stack.pop() {
                    block.push(id);
                    if id == tree_edge {
                        break;
                    }
                }
                blocks.push(block);
            }
        }
    }

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(mut blocks: Vec<Vec<usize>>) -> Vec<Vec<usize>> {
        for block in &mut blocks {
            block.sort_unstable();
        }
        blocks.sort();
        blocks
    }

    #[test]
    fn test_path_is_all_bridges() {
        let blocks = biconnected_blocks(4, &[(0, 1), (1, 2), (2, 3)]);
        assert_eq!(sorted(blocks), vec![vec![0], vec![1], vec![2]]);
    }

    #[test]
    fn test_bowtie_splits_at_cut_vertex() {
        // Two triangles sharing vertex 2.
        let edges = [(0, 1), (1, 2), (2, 0), (2, 3), (3, 4), (4, 2)];
        let blocks = biconnected_blocks(5, &edges);
        assert_eq!(sorted(blocks), vec![vec![0, 1, 2], vec![3, 4, 5]]);
    }

    #[test]
    fn test_cycle_with_pendant_and_isolated_vertex() {
        let edges = [(0, 1), (1, 2), (2, 3), (3, 0), (3, 4)];
        let blocks = biconnected_blocks(6, &edges);
        assert_eq!(sorted(blocks), vec![vec![0, 1, 2, 3], vec![4]]);
    }

    #[test]
    fn test_every_edge_in_exactly_one_block() {
        #[rustfmt::skip]
        let edges = [
            (0, 1), (1, 2), (2, 0), (2, 3), (3, 4), (4, 5), (5, 3),
            (5, 6), (7, 8), (8, 9), (9, 7), (6, 0),
        ];
        let blocks = biconnected_blocks(10, &edges);
        let mut all: Vec<usize> = blocks.into_iter().flatten().collect();
        all.sort_unstable();
        assert_eq!(all, (0..edges.len()).collect::<Vec<_>>());
    }
}
