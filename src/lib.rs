//! # cycle-radar - Detect and Rank Circular File Dependencies
//!
//! cycle-radar finds circular dependencies between source files. It takes
//! already-extracted entities (a file and the files it references), builds a
//! weighted dependency graph and finds cycles with two complementary
//! algorithms, optionally alongside an external detector. Cycles are
//! deduplicated across sources and scored for severity, refactoring effort
//! and the cheapest places to break them.
//!
//! ## Main Components
//!
//! - **Analyzer**: Loads entity manifests and applies exclude patterns
//! - **Graph**: Builds the file graph and renders cycle visualizations
//! - **Detector**: Tarjan SCC extraction, bounded DFS, deduplication and
//!   scoring
//! - **External**: Optional subprocess cycle detector with a hard timeout
//! - **Reports**: Human, JSON and GitHub Actions reports
//!
//! ## Usage
//!
//! ### Example: Checking a Set of Entities
//!
//! ```
//! use std::path::Path;
//!
//! use cycle_radar::config::AnalysisConfig;
//! use cycle_radar::core::{Entity, Severity};
//! use cycle_radar::detector::CycleDetector;
//! use cycle_radar::graph::FileGraphBuilder;
//! use cycle_radar::paths::LexicalNormalizer;
//! use cycle_radar::reports::{JsonReportGenerator, ReportGenerator};
//!
//! # fn main() -> miette::Result<()> {
//! let entities = vec![
//!     Entity::new("/repo/a.ts", vec!["/repo/b.ts".to_string()]),
//!     Entity::new("/repo/b.ts", vec!["/repo/c.ts".to_string()]),
//!     Entity::new("/repo/c.ts", vec!["/repo/a.ts".to_string()]),
//! ];
//!
//! let normalizer = LexicalNormalizer::new(Path::new("/repo"));
//! let graph = FileGraphBuilder::new(&normalizer).build(&entities);
//!
//! let mut detector = CycleDetector::new(AnalysisConfig::default());
//! detector.detect_cycles(&graph, Path::new("/repo"))?;
//!
//! let cycle = &detector.cycles()[0];
//! assert_eq!(cycle.depth(), 3);
//! assert_eq!(cycle.weight(), 3);
//! assert_eq!(cycle.severity(), Severity::Medium);
//!
//! let json = JsonReportGenerator::new().generate_report(&detector)?;
//! assert!(json.contains("\"breakPoints\""));
//! # Ok(())
//! # }
//! ```
//!
//! ### Example: Visualizing the Cycles
//!
//! ```no_run
//! use std::path::Path;
//!
//! use cycle_radar::config::AnalysisConfig;
//! use cycle_radar::executors::run_analysis;
//! use cycle_radar::graph::{GraphRenderer, VisualizationGraph};
//! use miette::IntoDiagnostic;
//!
//! # fn main() -> miette::Result<()> {
//! let detector = run_analysis(
//!     &["entities.json".into()],
//!     Path::new("."),
//!     &AnalysisConfig::default(),
//!     None,
//! )?;
//!
//! let graph = VisualizationGraph::from_cycles(detector.cycles());
//! let mut mermaid_output = Vec::new();
//! GraphRenderer::default().render_mermaid(&graph, &mut mermaid_output)?;
//!
//! std::fs::write("cycles.mmd", mermaid_output).into_diagnostic()?;
//! # Ok(())
//! # }
//! ```

// Private modules
mod constants;
mod progress;
mod utils;

// Public modules
pub mod analyzer;
pub mod cli;
pub mod commands;
pub mod common;
pub mod config;
pub mod core;
pub mod detector;
pub mod error;
pub mod executors;
pub mod external;
pub mod graph;
pub mod paths;
pub mod reports;

// Main entry point for the library
pub fn run() -> miette::Result<()> {
    use clap::Parser;

    use crate::cli::Cli;
    use crate::commands::execute_command;

    init_tracing();

    let cli = Cli::parse();
    execute_command(cli.command)
}

/// Engine diagnostics go to stderr so they never mix with report output
fn init_tracing() {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = EnvFilter::try_from_env(constants::LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new("cycle_radar=warn"));

    // A subscriber may already be installed when embedded in another binary
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .try_init();
}
