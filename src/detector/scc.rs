//! Tarjan's strongly connected components algorithm
//!
//! Iterative formulation over integer node indices: an explicit call stack
//! of `(node, next successor)` frames replaces recursion, so arbitrarily
//! long dependency chains cannot overflow the thread stack.

use petgraph::graph::NodeIndex;

use crate::graph::FileGraph;

/// Per-node bookkeeping, scoped to one traversal
struct TarjanState {
    index: Vec<Option<usize>>,
    lowlink: Vec<usize>,
    on_stack: Vec<bool>,
    stack: Vec<NodeIndex>,
    next_index: usize,
    components: Vec<Vec<NodeIndex>>,
}

impl TarjanState {
    fn new(node_count: usize) -> Self {
        Self {
            index: vec![None; node_count],
            lowlink: vec![0; node_count],
            on_stack: vec![false; node_count],
            stack: Vec::new(),
            next_index: 0,
            components: Vec::new(),
        }
    }

    fn discover(&mut self, node: NodeIndex) {
        let i = node.index();
        self.index[i] = Some(self.next_index);
        self.lowlink[i] = self.next_index;
        self.next_index += 1;
        self.stack.push(node);
        self.on_stack[i] = true;
    }

    fn visit(&mut self, graph: &FileGraph, root: NodeIndex) {
        self.discover(root);
        let mut frames: Vec<(NodeIndex, usize)> = vec![(root, 0)];

        while let Some(frame) = frames.last_mut() {
            let (node, next) = *frame;
            let successors = graph.successors(node);

            if next < successors.len() {
                frame.1 += 1;
                let succ = successors[next];
                match self.index[succ.index()] {
                    None => {
                        self.discover(succ);
                        frames.push((succ, 0));
                    }
                    Some(succ_index) if self.on_stack[succ.index()] => {
                        let low = &mut self.lowlink[node.index()];
                        *low = (*low).min(succ_index);
                    }
                    Some(_) => {}
                }
                continue;
            }

            frames.pop();
            let node_low = self.lowlink[node.index()];
            if let Some(&(parent, _)) = frames.last() {
                let low = &mut self.lowlink[parent.index()];
                *low = (*low).min(node_low);
            }

            if Some(node_low) == self.index[node.index()] {
                self.emit_component(node);
            }
        }
    }

    fn emit_component(&mut self, root: NodeIndex) {
        let mut component = Vec::new();
        while let Some(member) = self.stack.pop() {
            self.on_stack[member.index()] = false;
            component.push(member);
            if member == root {
                break;
            }
        }
        // Discovery order reads more naturally than pop order
        component.reverse();
        self.components.push(component);
    }
}

/// Find every strongly connected component with more than one member.
///
/// Traversals start from each undiscovered node in insertion order, so the
/// result is reproducible for a given graph. Components are returned in the
/// order Tarjan's algorithm completes them, members in discovery order.
pub fn find_sccs(graph: &FileGraph) -> Vec<Vec<NodeIndex>> {
    let mut state = TarjanState::new(graph.node_count());

    for node in graph.node_indices() {
        if state.index[node.index()].is_none() {
            state.visit(graph, node);
        }
    }

    state
        .components
        .into_iter()
        .filter(|component| component.len() > 1)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::path::Path;

    use petgraph::algo::tarjan_scc;

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

    fn names(graph: &FileGraph, sccs: &[Vec<NodeIndex>]) -> Vec<BTreeSet<String>> {
        let mut sets: Vec<BTreeSet<String>> = sccs
            .iter()
            .map(|scc| scc.iter().map(|&idx| graph.path(idx).to_string()).collect())
            .collect();
        sets.sort();
        sets
    }

    #[test]
    fn test_acyclic_graph_has_no_components() {
        let g = graph(&[("a", &["b"]), ("b", &["c"]), ("c", &[])]);
        assert!(find_sccs(&g).is_empty());
    }

    #[test]
    fn test_single_cycle() {
        let g = graph(&[("a", &["b"]), ("b", &["c"]), ("c", &["a"])]);
        let sccs = find_sccs(&g);
        assert_eq!(sccs.len(), 1);
        assert_eq!(sccs[0].len(), 3);
        assert_eq!(g.path(sccs[0][0]), "/a");
    }

    #[test]
    fn test_disconnected_components_are_all_found() {
        let g = graph(&[
            ("a", &["b"]),
            ("b", &["a"]),
            ("x", &["y"]),
            ("y", &["z"]),
            ("z", &["x"]),
            ("lonely", &[]),
        ]);
        let sccs = find_sccs(&g);
        assert_eq!(sccs.len(), 2);

        let expected: Vec<BTreeSet<String>> = vec![
            ["/a", "/b"].iter().map(|s| s.to_string()).collect(),
            ["/x", "/y", "/z"].iter().map(|s| s.to_string()).collect(),
        ];
        assert_eq!(names(&g, &sccs), expected);
    }

    #[test]
    fn test_matches_petgraph_on_tangled_graph() {
        let g = graph(&[
            ("a", &["b", "e"]),
            ("b", &["c"]),
            ("c", &["a", "d"]),
            ("d", &["e"]),
            ("e", &["f"]),
            ("f", &["d", "g"]),
            ("g", &[]),
            ("h", &["a", "h"]),
        ]);

        let ours = find_sccs(&g);
        let reference: Vec<Vec<NodeIndex>> = tarjan_scc(g.inner())
            .into_iter()
            .filter(|scc| scc.len() > 1)
            .collect();

        assert_eq!(names(&g, &ours), names(&g, &reference));
    }

    #[test]
    fn test_long_chain_does_not_overflow() {
        let n = 100_000;
        let normalizer = LexicalNormalizer::new(Path::new("/"));
        let entities: Vec<Entity> = (0..n)
            .map(|i| Entity::new(format!("f{i}"), vec![format!("f{}", (i + 1) % n)]))
            .collect();
        let g = FileGraphBuilder::new(&normalizer).build(&entities);

        let sccs = find_sccs(&g);
        assert_eq!(sccs.len(), 1);
        assert_eq!(sccs[0].len(), n);
    }
}
