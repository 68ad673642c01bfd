//! # Graph Construction and Rendering Module
//!
//! This module builds the file dependency graph the detectors run on and
//! exports detected cycles for visualization.
//!
//! ## Components
//!
//! ### Graph Building
//! - **FileGraphBuilder**: Interns normalized file paths and accumulates
//!   dependency references into weighted edges
//! - **FileNode**: A file in the graph
//! - **DependencyEdge**: How many times one file references another
//!
//! ### Visualization
//! - **VisualizationGraph**: Node/edge list of the files and edges involved
//!   in cycles
//! - **GraphRenderer**: Renders a visualization graph as JSON, Mermaid or DOT,
//!   coloring edges by cycle severity
//!
//! ## Example
//!
//! ```
//! use std::path::Path;
//!
//! use cycle_radar::core::Entity;
//! use cycle_radar::graph::FileGraphBuilder;
//! use cycle_radar::paths::LexicalNormalizer;
//!
//! let normalizer = LexicalNormalizer::new(Path::new("/repo"));
//! let graph = FileGraphBuilder::new(&normalizer).build(&[
//!     Entity::new("src/app.ts", vec!["./src/util.ts".to_string(), "src/util.ts".to_string()]),
//!     Entity::new("src/util.ts", vec!["lodash".to_string()]),
//! ]);
//!
//! assert_eq!(graph.node_count(), 2);
//! assert_eq!(graph.edge_count(), 1);
//! assert_eq!(graph.weight_between("/repo/src/app.ts", "/repo/src/util.ts"), Some(2));
//! ```

mod builder;
mod renderer;
mod types;
mod visualization;

pub use builder::FileGraphBuilder;
pub use renderer::GraphRenderer;
pub use types::{DependencyEdge, FileGraph, FileNode, base_name};
pub use visualization::{CIRCULAR_EDGE, VisualizationEdge, VisualizationGraph, VisualizationNode};
