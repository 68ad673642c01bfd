//! Bounded depth-first cycle finder
//!
//! Complements the SCC path by bounding cycle length directly. One traversal
//! with a shared visited set: every back edge onto the active path yields a
//! cycle. Dense graphs contain far more elementary cycles than this reports;
//! exhaustive enumeration is deliberately not attempted.

use petgraph::graph::NodeIndex;

use crate::graph::FileGraph;

/// Find closed cycles of at most `max_length` distinct nodes.
///
/// The active path never grows past `max_length` nodes. A node whose
/// successors were cut off by the bound is left unvisited when it is popped,
/// so a later path or start can explore it again from a shallower depth.
pub fn find_simple_cycles(graph: &FileGraph, max_length: usize) -> Vec<Vec<NodeIndex>> {
    let node_count = graph.node_count();
    let mut visited = vec![false; node_count];
    let mut on_path = vec![false; node_count];
    let mut cycles = Vec::new();

    if max_length == 0 {
        return cycles;
    }

    for start in graph.node_indices() {
        if visited[start.index()] {
            continue;
        }

        let mut path: Vec<NodeIndex> = vec![start];
        // (node, next successor, successors cut off by the bound)
        let mut frames: Vec<(NodeIndex, usize, bool)> = vec![(start, 0, false)];
        visited[start.index()] = true;
        on_path[start.index()] = true;

        while let Some(frame) = frames.last_mut() {
            let (node, next, cut) = *frame;
            let successors = graph.successors(node);

            if next >= successors.len() {
                frames.pop();
                path.pop();
                on_path[node.index()] = false;
                if cut {
                    visited[node.index()] = false;
                }
                continue;
            }

            frame.1 += 1;
            let succ = successors[next];

            if on_path[succ.index()] {
                if let Some(pos) = path.iter().position(|&n| n == succ) {
                    let length = path.len() - pos;
                    if (2..=max_length).contains(&length) {
                        let mut cycle = path[pos..].to_vec();
                        cycle.push(succ);
                        cycles.push(cycle);
                    }
                }
            } else if !visited[succ.index()] {
                if path.len() < max_length {
                    visited[succ.index()] = true;
                    on_path[succ.index()] = true;
                    path.push(succ);
                    frames.push((succ, 0, false));
                } else {
                    frame.2 = true;
                }
            }
        }
    }

    cycles
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::core::Entity;
    use crate::graph::FileGraphBuilder;
    use crate::paths::LexicalNormalizer;

    fn graph(edges: &[(&str, &[&str])]) -> FileGraph {
        let normalizer = LexicalNormalizer::new(Path::new("/"));
        let entities: Vec<Entity> = edges
            .iter()
            .map(|(from, deps)| Entity::new(*from, deps.iter().map(|d| d.to_string()).collect()))
            .collect();
        FileGraphBuilder::new(&normalizer).build(&entities)
    }

    fn ring(n: usize) -> FileGraph {
        let normalizer = LexicalNormalizer::new(Path::new("/"));
        let entities: Vec<Entity> = (0..n)
            .map(|i| Entity::new(format!("f{i}"), vec![format!("f{}", (i + 1) % n)]))
            .collect();
        FileGraphBuilder::new(&normalizer).build(&entities)
    }

    fn paths(graph: &FileGraph, cycle: &[NodeIndex]) -> Vec<String> {
        cycle.iter().map(|&idx| graph.path(idx).to_string()).collect()
    }

    #[test]
    fn test_acyclic_graph_yields_nothing() {
        let g = graph(&[("a", &["b", "c"]), ("b", &["c"]), ("c", &[])]);
        assert!(find_simple_cycles(&g, 10).is_empty());
    }

    #[test]
    fn test_finds_triangle() {
        let g = graph(&[("a", &["b"]), ("b", &["c"]), ("c", &["a"])]);
        let cycles = find_simple_cycles(&g, 10);
        assert_eq!(cycles.len(), 1);
        assert_eq!(paths(&g, &cycles[0]), vec!["/a", "/b", "/c", "/a"]);
    }

    #[test]
    fn test_finds_every_back_edge_cycle() {
        // a <-> b and b -> c -> b share b
        let g = graph(&[("a", &["b"]), ("b", &["a", "c"]), ("c", &["b"])]);
        let cycles: Vec<Vec<String>> = find_simple_cycles(&g, 10)
            .iter()
            .map(|c| paths(&g, c))
            .collect();
        assert_eq!(
            cycles,
            vec![vec!["/a", "/b", "/a"], vec!["/b", "/c", "/b"]]
        );
    }

    #[test]
    fn test_never_exceeds_max_length() {
        let g = ring(12);
        assert!(find_simple_cycles(&g, 10).is_empty());

        let g = ring(5);
        for max in 2..8 {
            for cycle in find_simple_cycles(&g, max) {
                assert!(cycle.len() - 1 <= max);
            }
        }
        assert_eq!(find_simple_cycles(&g, 5).len(), 1);
    }

    #[test]
    fn test_bound_prunes_but_later_starts_continue() {
        // From a, the path a -> b is already at the bound, so c is cut off
        // and b is left unvisited; b is then explored again as a start.
        let g = graph(&[("a", &["b"]), ("b", &["c"]), ("c", &["b"])]);
        let cycles = find_simple_cycles(&g, 2);
        assert_eq!(cycles.len(), 1);
        assert_eq!(paths(&g, &cycles[0]), vec!["/b", "/c", "/b"]);
    }
}
