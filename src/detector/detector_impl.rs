use std::path::Path;

use miette::Result;
use petgraph::graph::NodeIndex;
use tracing::{debug, warn};

use super::cycle::{DependencyCycle, RawCycle};
use super::dedup::CycleDeduplicator;
use super::extractor::extract_cycle;
use super::scc::find_sccs;
use super::scorer::CycleScorer;
use super::simple::find_simple_cycles;
use crate::config::AnalysisConfig;
use crate::core::CycleSource;
use crate::error::CycleRadarError;
use crate::external::{ExternalCycleSource, ExternalToolCommand};
use crate::graph::FileGraph;
use crate::paths::{LexicalNormalizer, PathNormalizer};

/// Runs every enabled detection source over a graph and keeps the merged,
/// scored result of the most recent run.
pub struct CycleDetector {
    config: AnalysisConfig,
    external: Option<Box<dyn ExternalCycleSource>>,
    normalizer: Box<dyn PathNormalizer>,
    cycles: Vec<DependencyCycle>,
}

impl std::fmt::Debug for CycleDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CycleDetector")
            .field("config", &self.config)
            .field("has_external", &self.external.is_some())
            .field("cycles", &self.cycles)
            .finish_non_exhaustive()
    }
}

impl Default for CycleDetector {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}

impl CycleDetector {
    /// Create a detector. When the configuration enables the external tool,
    /// the subprocess source is set up from its `external_tool` section.
    pub fn new(config: AnalysisConfig) -> Self {
        let external: Option<Box<dyn ExternalCycleSource>> = if config.enable_external_tool {
            Some(Box::new(ExternalToolCommand::from_config(
                &config.external_tool,
            )))
        } else {
            None
        };

        Self {
            config,
            external,
            normalizer: Box::new(LexicalNormalizer::default()),
            cycles: Vec::new(),
        }
    }

    /// Replace the external source. It is only consulted when
    /// `enable_external_tool` is set.
    pub fn with_external_source(mut self, source: Box<dyn ExternalCycleSource>) -> Self {
        self.external = Some(source);
        self
    }

    /// Normalizer applied to paths reported by the external source. It
    /// must agree with the one the graph was built with.
    pub fn with_normalizer(mut self, normalizer: Box<dyn PathNormalizer>) -> Self {
        self.normalizer = normalizer;
        self
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Detect, deduplicate, filter and score the cycles in `graph`.
    ///
    /// `root` is the directory handed to the external source. Results from
    /// any earlier run are replaced. External failures are logged and
    /// treated as "no cycles from that source".
    pub fn detect_cycles(&mut self, graph: &FileGraph, root: &Path) -> Result<()> {
        if self.config.max_cycle_length < crate::constants::analysis::MIN_CYCLE_LENGTH {
            return Err(CycleRadarError::ConfigurationError {
                message: format!(
                    "max_cycle_length must be at least {}, got {}",
                    crate::constants::analysis::MIN_CYCLE_LENGTH,
                    self.config.max_cycle_length
                ),
            }
            .into());
        }

        let (external, (scc, dfs)) = rayon::join(
            || self.run_external(root),
            || self.run_internal(graph),
        );
        debug!(
            external = external.len(),
            scc = scc.len(),
            dfs = dfs.len(),
            "collected raw cycles"
        );

        let merged = CycleDeduplicator::new(self.config.equivalence).merge(vec![external, scc, dfs]);
        let unique = merged.len();

        let scorer = CycleScorer::new(graph);
        let threshold = self.config.weight_threshold;
        let reportable: Vec<RawCycle> = merged
            .into_iter()
            .filter(|cycle| scorer.weight(cycle) >= threshold)
            .collect();
        debug!(
            unique,
            reported = reportable.len(),
            weight_threshold = threshold,
            "deduplicated cycles"
        );

        self.cycles = scorer.score(reportable);
        Ok(())
    }

    fn run_external(&self, root: &Path) -> Vec<RawCycle> {
        if !self.config.enable_external_tool {
            return Vec::new();
        }
        let Some(source) = &self.external else {
            return Vec::new();
        };

        match source.find_cycles(root, self.normalizer.as_ref()) {
            Ok(cycles) => cycles,
            Err(err) => {
                warn!(tool = source.name(), error = %err, "external cycle detection failed, continuing without it");
                Vec::new()
            }
        }
    }

    fn run_internal(&self, graph: &FileGraph) -> (Vec<RawCycle>, Vec<RawCycle>) {
        if !self.config.enable_internal_analysis {
            return (Vec::new(), Vec::new());
        }

        let to_paths = |walk: Vec<NodeIndex>, source: CycleSource| {
            let nodes = walk
                .into_iter()
                .map(|idx| graph.path(idx).to_string())
                .collect();
            RawCycle::new(nodes, source)
        };

        let scc: Vec<RawCycle> = find_sccs(graph)
            .iter()
            .map(|component| to_paths(extract_cycle(graph, component), CycleSource::Scc))
            .collect();

        let dfs: Vec<RawCycle> = find_simple_cycles(graph, self.config.max_cycle_length)
            .into_iter()
            .map(|walk| to_paths(walk, CycleSource::Dfs))
            .collect();

        (scc, dfs)
    }

    /// Get all detected cycles
    pub fn cycles(&self) -> &[DependencyCycle] {
        &self.cycles
    }

    /// Check if any cycles were detected
    pub fn has_cycles(&self) -> bool {
        !self.cycles.is_empty()
    }

    /// Get the number of detected cycles
    pub fn cycle_count(&self) -> usize {
        self.cycles.len()
    }
}
