//! Core graph types
//!
//! This module contains the fundamental data structures used in the file
//! dependency graph.

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};

/// A source file in the dependency graph, keyed by its normalized path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileNode {
    path: String,
}

impl FileNode {
    pub fn new<S: Into<String>>(path: S) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Aggregated dependency references from one file to another
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DependencyEdge {
    pub weight: usize,
}

impl Default for DependencyEdge {
    fn default() -> Self {
        Self { weight: 1 }
    }
}

/// Directed, weighted file dependency graph.
///
/// Built once per run by [`super::FileGraphBuilder`] and immutable
/// afterwards. Node indices follow insertion order, and so do the successor
/// lists, which keeps every traversal over the graph reproducible.
#[derive(Debug, Clone, Default)]
pub struct FileGraph {
    pub(super) graph: DiGraph<FileNode, DependencyEdge>,
    pub(super) node_indices: HashMap<String, NodeIndex>,
    pub(super) successors: Vec<Vec<NodeIndex>>,
}

impl FileGraph {
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Node indices in insertion order
    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    pub fn path(&self, idx: NodeIndex) -> &str {
        self.graph[idx].path()
    }

    pub fn index_of(&self, path: &str) -> Option<NodeIndex> {
        self.node_indices.get(path).copied()
    }

    /// Successors of `idx` in the order their edges were first added
    pub fn successors(&self, idx: NodeIndex) -> &[NodeIndex] {
        self.successors
            .get(idx.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn weight(&self, from: NodeIndex, to: NodeIndex) -> Option<usize> {
        self.graph
            .find_edge(from, to)
            .and_then(|edge| self.graph.edge_weight(edge))
            .map(|edge| edge.weight)
    }

    /// Edge weight looked up by normalized paths
    pub fn weight_between(&self, from: &str, to: &str) -> Option<usize> {
        let from = self.index_of(from)?;
        let to = self.index_of(to)?;
        self.weight(from, to)
    }

    /// Access the underlying petgraph graph
    pub fn inner(&self) -> &DiGraph<FileNode, DependencyEdge> {
        &self.graph
    }
}

/// Last path segment, or the whole path when it has no separator
pub fn base_name(path: &str) -> &str {
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|name| !name.is_empty())
        .unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_name() {
        assert_eq!(base_name("/repo/src/a.ts"), "a.ts");
        assert_eq!(base_name("a.ts"), "a.ts");
        assert_eq!(base_name("/repo/src/"), "src");
        assert_eq!(base_name("/"), "/");
    }

    #[test]
    fn test_file_node_path() {
        let node = FileNode::new("/repo/src/utils/format.ts");
        assert_eq!(node.path(), "/repo/src/utils/format.ts");
    }

    #[test]
    fn test_empty_graph() {
        let graph = FileGraph::default();
        assert!(graph.is_empty());
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.successors(NodeIndex::new(3)).is_empty());
        assert_eq!(graph.weight_between("/a", "/b"), None);
    }
}
