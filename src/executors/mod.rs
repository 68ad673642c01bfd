//! Command executors that handle the actual logic for each command

pub mod check;
pub mod graph;

use std::path::{Path, PathBuf};

use console::style;
use miette::{IntoDiagnostic, Result, WrapErr};

use crate::analyzer::EntityAnalyzer;
use crate::config::AnalysisConfig;
use crate::detector::CycleDetector;
use crate::graph::FileGraphBuilder;
use crate::paths::LexicalNormalizer;
use crate::progress::ProgressReporter;

/// Trait for command executors
pub trait CommandExecutor {
    type Config;

    /// Execute the command with the given configuration
    fn execute(config: Self::Config) -> Result<()>;
}

/// Load manifests, build the file graph and run every enabled detector.
///
/// Shared by all commands; the returned detector holds the scored cycles.
pub fn run_analysis(
    paths: &[PathBuf],
    root: &Path,
    analysis: &AnalysisConfig,
    mut progress: Option<&mut ProgressReporter>,
) -> Result<CycleDetector> {
    let root = std::path::absolute(root)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to resolve project root '{}'", root.display()))?;

    let mut analyzer = EntityAnalyzer::new().with_exclude(analysis.exclude_patterns()?);
    analyzer
        .load_entities(paths, progress.as_deref_mut())
        .wrap_err("Failed to load entity manifests")?;

    if analyzer.entities().is_empty() && progress.is_some() {
        eprintln!("{} No entities found to analyze", style("ℹ").blue());
    }

    let normalizer = LexicalNormalizer::new(&root);
    let graph = FileGraphBuilder::new(&normalizer).build(analyzer.entities());

    if let Some(p) = progress.as_mut() {
        p.start_cycle_detection(graph.node_count(), graph.edge_count());
    }

    let mut detector =
        CycleDetector::new(analysis.clone()).with_normalizer(Box::new(normalizer));
    detector
        .detect_cycles(&graph, &root)
        .wrap_err("Failed to detect dependency cycles")?;

    if let Some(p) = progress.as_mut() {
        p.finish_cycle_detection(detector.cycle_count());
    }

    Ok(detector)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_run_analysis_resolves_relative_entities_against_root() {
        let temp = TempDir::new().unwrap();
        let manifest = temp.path().join("entities.json");
        fs::write(
            &manifest,
            r#"[
                {"filePath": "src/a.ts", "dependencies": ["./src/b.ts"]},
                {"filePath": "src/b.ts", "dependencies": ["src/./a.ts"]}
            ]"#,
        )
        .unwrap();

        let detector = run_analysis(
            &[manifest],
            temp.path(),
            &AnalysisConfig::default(),
            None,
        )
        .unwrap();

        assert_eq!(detector.cycle_count(), 1);
        let cycle = &detector.cycles()[0];
        assert_eq!(cycle.depth(), 2);
        assert!(cycle.files().iter().all(|f| f.ends_with(".ts")));
    }

    #[test]
    fn test_run_analysis_applies_excludes() {
        let temp = TempDir::new().unwrap();
        let manifest = temp.path().join("entities.json");
        fs::write(
            &manifest,
            r#"[
                {"filePath": "/p/a.ts", "dependencies": ["/p/gen/b.ts"]},
                {"filePath": "/p/gen/b.ts", "dependencies": ["/p/a.ts"]}
            ]"#,
        )
        .unwrap();

        let analysis = AnalysisConfig {
            exclude: vec!["**/gen/**".to_string()],
            ..AnalysisConfig::default()
        };
        let detector = run_analysis(&[manifest], temp.path(), &analysis, None).unwrap();
        assert!(!detector.has_cycles());
    }
}
