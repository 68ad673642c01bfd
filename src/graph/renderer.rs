use std::collections::HashMap;
use std::io::Write;

use miette::Result;

use super::visualization::{VisualizationEdge, VisualizationGraph};
use crate::core::Severity;
use crate::error::CycleRadarError;

// Blue-Orange Accessible Palette, with severity ramped from grey to red
mod colors {
    pub const NODE_FILL: &str = "#FFF3E0"; // Light orange
    pub const NODE_STROKE: &str = "#F57C00"; // Vibrant orange
    pub const LOW_EDGE: &str = "#90A4AE"; // Blue-grey
    pub const MEDIUM_EDGE: &str = "#FFB300"; // Amber
    pub const HIGH_EDGE: &str = "#FF6500"; // Deep orange
    pub const CRITICAL_EDGE: &str = "#D32F2F"; // Red
    pub const LEGEND_BG: &str = "#FAFAFA"; // Off-white background
}

// Helper macro for write operations that converts IO errors
macro_rules! writeln_out {
    ($dst:expr) => {
        writeln!($dst).map_err(CycleRadarError::from)
    };
    ($dst:expr, $($arg:tt)*) => {
        writeln!($dst, $($arg)*).map_err(CycleRadarError::from)
    };
}

/// Renders a [`VisualizationGraph`] as JSON, Mermaid or Graphviz DOT
#[derive(Debug, Clone, Copy)]
pub struct GraphRenderer {
    show_legend: bool,
}

impl Default for GraphRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

impl GraphRenderer {
    pub fn new(show_legend: bool) -> Self {
        Self { show_legend }
    }

    pub fn render_json(&self, graph: &VisualizationGraph, output: &mut dyn Write) -> Result<()> {
        serde_json::to_writer_pretty(&mut *output, graph).map_err(CycleRadarError::from)?;
        writeln_out!(output)?;
        Ok(())
    }

    pub fn render_mermaid(&self, graph: &VisualizationGraph, output: &mut dyn Write) -> Result<()> {
        writeln_out!(output, "graph LR")?;

        if graph.is_empty() {
            writeln_out!(output, "    empty[\"No circular dependencies\"]")?;
            return Ok(());
        }

        // Ids come from node position; distinct paths can sanitize alike
        let node_ids: HashMap<&str, String> = graph
            .nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (node.id.as_str(), format!("n{index}")))
            .collect();

        for (index, node) in graph.nodes.iter().enumerate() {
            let node_id = format!("n{index}");
            writeln_out!(
                output,
                "    {}[\"{}\"]",
                node_id,
                mermaid_escape(&node.label)
            )?;
            writeln_out!(
                output,
                "    click {} \"{}\"",
                node_id,
                mermaid_escape(&node.id)
            )?;
            writeln_out!(
                output,
                "    style {} fill:{},stroke:{},stroke-width:2px",
                node_id,
                colors::NODE_FILL,
                colors::NODE_STROKE
            )?;
        }

        writeln_out!(output)?;

        let mut link_style_index = 0;
        for edge in &graph.edges {
            let (Some(source), Some(target)) = (
                node_ids.get(edge.source.as_str()),
                node_ids.get(edge.target.as_str()),
            ) else {
                continue;
            };
            writeln_out!(
                output,
                "    {} -->|{}| {}",
                source,
                edge_label(edge),
                target
            )?;
            writeln_out!(
                output,
                "    linkStyle {} stroke:{},stroke-width:{}px",
                link_style_index,
                severity_color(edge.severity),
                stroke_width(edge.severity)
            )?;
            link_style_index += 1;
        }

        if self.show_legend {
            writeln_out!(output)?;
            writeln_out!(output, "    subgraph Legend[\"Cycle Severity\"]")?;
            for severity in present_severities(graph) {
                let id = format!("L_{severity}");
                writeln_out!(output, "        {}[\"{}\"]", id, severity)?;
                writeln_out!(
                    output,
                    "        style {} fill:{},stroke:{},color:#fff",
                    id,
                    severity_color(severity),
                    severity_color(severity)
                )?;
            }
            writeln_out!(
                output,
                "        style Legend fill:{},stroke:#ddd,stroke-width:1px",
                colors::LEGEND_BG
            )?;
            writeln_out!(output, "    end")?;
        }

        Ok(())
    }

    pub fn render_dot(&self, graph: &VisualizationGraph, output: &mut dyn Write) -> Result<()> {
        writeln_out!(output, "digraph circular_dependencies {{")?;
        writeln_out!(output, "    rankdir=LR;")?;
        writeln_out!(output, "    node [shape=box, style=rounded];")?;
        writeln_out!(output)?;

        for node in &graph.nodes {
            writeln_out!(
                output,
                r#"    "{}" [label="{}", tooltip="{}", style="rounded,filled", fillcolor="{}", color="{}", penwidth=2];"#,
                dot_escape(&node.id),
                dot_escape(&node.label),
                dot_escape(&node.id),
                colors::NODE_FILL,
                colors::NODE_STROKE
            )?;
        }

        if !graph.edges.is_empty() {
            writeln_out!(output)?;
        }

        for edge in &graph.edges {
            writeln_out!(
                output,
                r#"    "{}" -> "{}" [label="{}", color="{}", penwidth={}];"#,
                dot_escape(&edge.source),
                dot_escape(&edge.target),
                edge_label(edge),
                severity_color(edge.severity),
                stroke_width(edge.severity)
            )?;
        }

        if self.show_legend && !graph.is_empty() {
            writeln_out!(output)?;
            writeln_out!(output, "    subgraph cluster_legend {{")?;
            writeln_out!(output, "        label=\"Cycle Severity\";")?;
            writeln_out!(output, "        style=filled;")?;
            writeln_out!(output, "        fillcolor=\"{}\";", colors::LEGEND_BG)?;
            for severity in present_severities(graph) {
                writeln_out!(
                    output,
                    r#"        "legend_{}" [label="{}", style=filled, fillcolor="{}", fontcolor="white"];"#,
                    severity,
                    severity,
                    severity_color(severity)
                )?;
            }
            writeln_out!(output, "    }}")?;
        }

        writeln_out!(output, "}}")?;
        Ok(())
    }

    /// Render a short per-severity tally, used when writing a graph file so
    /// the terminal still gets a summary
    pub fn render_summary(&self, graph: &VisualizationGraph, output: &mut dyn Write) -> Result<()> {
        let mut counts: HashMap<Severity, usize> = HashMap::new();
        for edge in &graph.edges {
            *counts.entry(edge.severity).or_insert(0) += 1;
        }

        writeln_out!(
            output,
            "{} files, {} cycle edges",
            graph.nodes.len(),
            graph.edges.len()
        )?;
        for severity in present_severities(graph) {
            writeln_out!(
                output,
                "  {}: {} edges",
                severity,
                counts.get(&severity).copied().unwrap_or(0)
            )?;
        }
        Ok(())
    }
}

fn edge_label(edge: &VisualizationEdge) -> String {
    format!("{} w{}", edge.severity, edge.weight)
}

fn severity_color(severity: Severity) -> &'static str {
    match severity {
        Severity::Low => colors::LOW_EDGE,
        Severity::Medium => colors::MEDIUM_EDGE,
        Severity::High => colors::HIGH_EDGE,
        Severity::Critical => colors::CRITICAL_EDGE,
    }
}

fn stroke_width(severity: Severity) -> u8 {
    match severity {
        Severity::Low | Severity::Medium => 2,
        Severity::High | Severity::Critical => 3,
    }
}

/// Severities that occur in the graph, most severe first
fn present_severities(graph: &VisualizationGraph) -> Vec<Severity> {
    [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
    ]
    .into_iter()
    .filter(|severity| graph.edges.iter().any(|edge| edge.severity == *severity))
    .collect()
}

fn dot_escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

fn mermaid_escape(text: &str) -> String {
    text.replace('"', "#quot;")
}
