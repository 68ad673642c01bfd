//! Report generation modules for different output formats
//!
//! This module contains report generators for various output formats:
//! - human: Human-readable console output
//! - json: JSON format for programmatic use
//! - github: GitHub Actions workflow annotations

pub mod github;
pub mod human;
pub mod json;

use crate::detector::CycleDetector;
use crate::error::CycleRadarError;

/// Common trait for all report generators
pub trait ReportGenerator {
    /// Generate a report from cycle detection results
    fn generate_report(&self, detector: &CycleDetector) -> Result<String, CycleRadarError>;
}

// Re-export for convenience
pub use github::GitHubReportGenerator;
pub use human::HumanReportGenerator;
pub use json::JsonReportGenerator;

#[cfg(test)]
pub(crate) mod test_support {
    use std::path::Path;

    use crate::core::Entity;
    use crate::detector::CycleDetector;
    use crate::graph::FileGraphBuilder;
    use crate::paths::LexicalNormalizer;

    /// Run the default detector over `(file, dependencies)` pairs rooted at
    /// `/repo`
    pub fn detector(files: &[(&str, &[&str])]) -> CycleDetector {
        let normalizer = LexicalNormalizer::new(Path::new("/repo"));
        let entities: Vec<Entity> = files
            .iter()
            .map(|(file, deps)| Entity::new(*file, deps.iter().map(|d| d.to_string()).collect()))
            .collect();
        let graph = FileGraphBuilder::new(&normalizer).build(&entities);

        let mut detector = CycleDetector::default();
        detector
            .detect_cycles(&graph, Path::new("/repo"))
            .expect("detection should succeed");
        detector
    }
}
