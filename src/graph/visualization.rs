//! Node/edge export of detected cycles for visualization tools

use std::collections::HashSet;

use serde::Serialize;

use super::types::base_name;
use crate::core::Severity;
use crate::detector::DependencyCycle;

/// Edge kind emitted for every cycle edge
pub const CIRCULAR_EDGE: &str = "circular";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisualizationNode {
    /// Normalized file path
    pub id: String,
    /// Base name of the file
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisualizationEdge {
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub severity: Severity,
    /// Weight of the cycle the edge belongs to
    pub weight: usize,
}

/// Files and edges taking part in at least one cycle
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VisualizationGraph {
    pub nodes: Vec<VisualizationNode>,
    pub edges: Vec<VisualizationEdge>,
}

impl VisualizationGraph {
    /// Nodes appear once, in order of first appearance across `cycles`.
    /// Each cycle contributes one edge per consecutive pair of its closed
    /// walk, so an edge shared by two cycles appears twice.
    pub fn from_cycles(cycles: &[DependencyCycle]) -> Self {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut graph = Self::default();

        for cycle in cycles {
            for file in cycle.files() {
                if seen.insert(file.as_str()) {
                    graph.nodes.push(VisualizationNode {
                        id: file.clone(),
                        label: base_name(file).to_string(),
                    });
                }
            }

            graph
                .edges
                .extend(cycle.cycle().windows(2).map(|pair| VisualizationEdge {
                    source: pair[0].clone(),
                    target: pair[1].clone(),
                    kind: CIRCULAR_EDGE,
                    severity: cycle.severity(),
                    weight: cycle.weight(),
                }));
        }

        graph
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::core::Entity;
    use crate::detector::CycleDetector;
    use crate::graph::FileGraphBuilder;
    use crate::paths::LexicalNormalizer;

    fn detect(entities: &[Entity]) -> Vec<DependencyCycle> {
        let normalizer = LexicalNormalizer::new(Path::new("/repo"));
        let graph = FileGraphBuilder::new(&normalizer).build(entities);
        let mut detector = CycleDetector::default();
        detector.detect_cycles(&graph, Path::new("/repo")).unwrap();
        detector.cycles().to_vec()
    }

    #[test]
    fn test_empty() {
        let graph = VisualizationGraph::from_cycles(&[]);
        assert!(graph.is_empty());
        assert!(graph.edges.is_empty());
    }

    #[test]
    fn test_pair_cycle() {
        let cycles = detect(&[
            Entity::new("src/a.ts", vec!["src/b.ts".into()]),
            Entity::new("src/b.ts", vec!["src/a.ts".into()]),
        ]);
        let graph = VisualizationGraph::from_cycles(&cycles);

        assert_eq!(
            graph.nodes,
            vec![
                VisualizationNode {
                    id: "/repo/src/a.ts".into(),
                    label: "a.ts".into()
                },
                VisualizationNode {
                    id: "/repo/src/b.ts".into(),
                    label: "b.ts".into()
                },
            ]
        );
        let pairs: Vec<(&str, &str)> = graph
            .edges
            .iter()
            .map(|e| (e.source.as_str(), e.target.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("/repo/src/a.ts", "/repo/src/b.ts"),
                ("/repo/src/b.ts", "/repo/src/a.ts")
            ]
        );
        assert!(graph.edges.iter().all(|e| e.kind == "circular"));
        assert!(graph.edges.iter().all(|e| e.weight == 2));
        assert!(graph.edges.iter().all(|e| e.severity == Severity::Low));
    }

    #[test]
    fn test_shared_nodes_are_listed_once() {
        let cycles = detect(&[
            Entity::new("a.ts", vec!["b.ts".into()]),
            Entity::new("b.ts", vec!["a.ts".into(), "c.ts".into()]),
            Entity::new("c.ts", vec!["b.ts".into()]),
        ]);
        assert_eq!(cycles.len(), 2);

        let graph = VisualizationGraph::from_cycles(&cycles);
        assert_eq!(graph.nodes.len(), 3);
        assert_eq!(graph.edges.len(), 4);
    }

    #[test]
    fn test_serialized_shape() {
        let cycles = detect(&[
            Entity::new("a.ts", vec!["b.ts".into()]),
            Entity::new("b.ts", vec!["a.ts".into()]),
        ]);
        let json = serde_json::to_value(VisualizationGraph::from_cycles(&cycles)).unwrap();

        assert_eq!(json["nodes"][0]["label"], "a.ts");
        assert_eq!(json["edges"][0]["type"], "circular");
        assert_eq!(json["edges"][0]["severity"], "low");
        assert_eq!(json["edges"][0]["weight"], 2);
    }
}
