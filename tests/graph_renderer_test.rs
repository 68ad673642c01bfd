//! Tests for rendering detected cycles as graphs

use std::path::Path;

use cycle_radar::config::AnalysisConfig;
use cycle_radar::core::Entity;
use cycle_radar::detector::CycleDetector;
use cycle_radar::graph::{CIRCULAR_EDGE, FileGraphBuilder, GraphRenderer, VisualizationGraph};
use cycle_radar::paths::LexicalNormalizer;
use predicates::prelude::*;

/// Two cycles sharing `b.ts`: a <-> b and b <-> c
fn detect_overlapping_cycles() -> CycleDetector {
    let entities = vec![
        Entity::new("/app/a.ts", vec!["/app/b.ts".to_string()]),
        Entity::new(
            "/app/b.ts",
            vec!["/app/a.ts".to_string(), "/app/c.ts".to_string()],
        ),
        Entity::new("/app/c.ts", vec!["/app/b.ts".to_string()]),
    ];
    let normalizer = LexicalNormalizer::new(Path::new("/app"));
    let graph = FileGraphBuilder::new(&normalizer).build(&entities);

    let mut detector = CycleDetector::new(AnalysisConfig::default());
    detector.detect_cycles(&graph, Path::new("/app")).unwrap();
    detector
}

type RenderFn = fn(&GraphRenderer, &VisualizationGraph, &mut Vec<u8>) -> miette::Result<()>;

fn render(f: RenderFn) -> String {
    let detector = detect_overlapping_cycles();
    let graph = VisualizationGraph::from_cycles(detector.cycles());
    let mut output = Vec::new();
    f(&GraphRenderer::default(), &graph, &mut output).unwrap();
    String::from_utf8(output).unwrap()
}

#[test]
fn test_visualization_graph_from_detected_cycles() {
    let detector = detect_overlapping_cycles();
    let graph = VisualizationGraph::from_cycles(detector.cycles());

    // Shared files appear once
    let ids: Vec<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["/app/a.ts", "/app/b.ts", "/app/c.ts"]);
    assert_eq!(graph.nodes[1].label, "b.ts");

    // Each cycle contributes its own closed edge list
    assert_eq!(graph.edges.len(), 4);
    assert!(graph.edges.iter().all(|e| e.kind == CIRCULAR_EDGE));
    assert!(
        graph
            .edges
            .iter()
            .any(|e| e.source == "/app/c.ts" && e.target == "/app/b.ts")
    );
}

#[test]
fn test_json_graph_output() {
    let output = render(|r, g, out| r.render_json(g, out));
    let json: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(json["nodes"].as_array().unwrap().len(), 3);
    let edge = &json["edges"][0];
    assert_eq!(edge["type"], "circular");
    assert_eq!(edge["severity"], "low");
    assert_eq!(edge["weight"], 2);
}

#[test]
fn test_mermaid_graph_output() {
    let output = render(|r, g, out| r.render_mermaid(g, out));

    let expected = predicate::str::starts_with("graph LR")
        .and(predicate::str::contains(r#"n1["b.ts"]"#))
        .and(predicate::str::contains("n0 -->|low w2| n1"))
        .and(predicate::str::contains("Cycle Severity"));
    assert!(expected.eval(output.as_str()));
    assert!(output.contains("linkStyle 3 "));
    assert!(!output.contains("linkStyle 4 "));
}

#[test]
fn test_dot_graph_output() {
    let output = render(|r, g, out| r.render_dot(g, out));

    assert!(output.starts_with("digraph circular_dependencies {"));
    assert!(output.contains(r#""/app/b.ts" -> "/app/c.ts" [label="low w2""#));
    assert_eq!(output.matches(" -> ").count(), 4);
    assert!(output.trim_end().ends_with('}'));
}

#[test]
fn test_no_cycles_renders_empty_graph() {
    let graph = VisualizationGraph::from_cycles(&[]);
    assert!(graph.is_empty());

    let mut output = Vec::new();
    GraphRenderer::default()
        .render_dot(&graph, &mut output)
        .unwrap();
    let output = String::from_utf8(output).unwrap();
    assert!(!output.contains("->"));
    assert!(!output.contains("cluster_legend"));
}
