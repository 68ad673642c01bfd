//! Representative cycle extraction for strongly connected components
//!
//! A component can contain exponentially many elementary cycles. One
//! representative is enough to flag it; the full membership still feeds
//! impact scoring through related-cycle links.

use std::collections::HashSet;

use petgraph::graph::NodeIndex;

use crate::graph::FileGraph;

/// Extract one closed elementary cycle from `scc`.
///
/// Each member is tried as a start until a depth-first walk restricted to
/// the component revisits a node on its active path. If no start yields a
/// cycle, the whole membership (closed) is returned instead; that fallback is
/// not guaranteed to be a simple cycle.
pub fn extract_cycle(graph: &FileGraph, scc: &[NodeIndex]) -> Vec<NodeIndex> {
    let members: HashSet<NodeIndex> = scc.iter().copied().collect();

    for &start in scc {
        if let Some(cycle) = walk_from(graph, &members, start) {
            return cycle;
        }
    }

    let mut fallback = scc.to_vec();
    if let Some(&first) = scc.first() {
        fallback.push(first);
    }
    fallback
}

fn walk_from(
    graph: &FileGraph,
    members: &HashSet<NodeIndex>,
    start: NodeIndex,
) -> Option<Vec<NodeIndex>> {
    let mut visited: HashSet<NodeIndex> = HashSet::from([start]);
    let mut path: Vec<NodeIndex> = vec![start];
    let mut frames: Vec<(NodeIndex, usize)> = vec![(start, 0)];

    while let Some(frame) = frames.last_mut() {
        let (node, next) = *frame;
        let successors = graph.successors(node);

        if next >= successors.len() {
            frames.pop();
            path.pop();
            continue;
        }

        frame.1 += 1;
        let succ = successors[next];
        if !members.contains(&succ) {
            continue;
        }

        if let Some(pos) = path.iter().position(|&n| n == succ) {
            let mut cycle = path[pos..].to_vec();
            cycle.push(succ);
            return Some(cycle);
        }

        if visited.insert(succ) {
            path.push(succ);
            frames.push((succ, 0));
        }
    }

    None
}
