use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use tracing::debug;

use super::types::{DependencyEdge, FileGraph, FileNode};
use crate::core::Entity;
use crate::paths::PathNormalizer;

/// Builder for constructing file dependency graphs
///
/// Every entity becomes a node keyed by its normalized path. Dependencies
/// that resolve to another known node become weighted edges; anything else
/// (third-party packages, files outside the analyzed set, self references)
/// is ignored.
pub struct FileGraphBuilder<'a> {
    normalizer: &'a dyn PathNormalizer,
    graph: DiGraph<FileNode, DependencyEdge>,
    node_indices: HashMap<String, NodeIndex>,
    successors: Vec<Vec<NodeIndex>>,
}

impl<'a> FileGraphBuilder<'a> {
    pub fn new(normalizer: &'a dyn PathNormalizer) -> Self {
        Self {
            normalizer,
            graph: DiGraph::new(),
            node_indices: HashMap::new(),
            successors: Vec::new(),
        }
    }

    /// Build the graph for one analysis run
    pub fn build(mut self, entities: &[Entity]) -> FileGraph {
        // Register every file first so forward references resolve
        let sources: Vec<NodeIndex> = entities
            .iter()
            .map(|entity| {
                let path = self.normalizer.normalize(&entity.file_path);
                self.intern(path)
            })
            .collect();

        for (entity, &from) in entities.iter().zip(&sources) {
            for dependency in &entity.dependencies {
                let target = self.normalizer.normalize(dependency);
                let Some(&to) = self.node_indices.get(&target) else {
                    continue;
                };
                if to != from {
                    self.add_reference(from, to);
                }
            }
        }

        debug!(
            nodes = self.graph.node_count(),
            edges = self.graph.edge_count(),
            "built file dependency graph"
        );

        FileGraph {
            graph: self.graph,
            node_indices: self.node_indices,
            successors: self.successors,
        }
    }

    fn intern(&mut self, path: String) -> NodeIndex {
        if let Some(&idx) = self.node_indices.get(&path) {
            return idx;
        }
        let idx = self.graph.add_node(FileNode::new(path.clone()));
        self.node_indices.insert(path, idx);
        self.successors.push(Vec::new());
        idx
    }

    fn add_reference(&mut self, from: NodeIndex, to: NodeIndex) {
        if let Some(edge) = self.graph.find_edge(from, to) {
            self.graph[edge].weight += 1;
        } else {
            self.graph.add_edge(from, to, DependencyEdge::default());
            self.successors[from.index()].push(to);
        }
    }
}
