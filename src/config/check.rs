//! Check command configuration

use std::path::PathBuf;

use super::AnalysisConfig;
use crate::cli::OutputFormat;
use crate::error::CycleRadarError;

/// Configuration for the check command
///
/// This struct contains all options for detecting and reporting dependency
/// cycles across a set of entity manifests.
#[derive(Debug, Clone)]
pub struct CheckCyclesConfig {
    /// Entity manifests (files or directories) to load
    pub paths: Vec<PathBuf>,
    /// Project root handed to the external tool and used to resolve
    /// relative paths
    pub root: PathBuf,
    /// Output format for the report
    pub format: OutputFormat,
    /// Whether to exit with error code if cycles are found
    pub error_on_cycles: bool,
    /// Maximum number of cycles to report (None = all)
    pub max_cycles: Option<usize>,
    /// Engine settings
    pub analysis: AnalysisConfig,
}

impl CheckCyclesConfig {
    pub fn builder() -> CheckCyclesConfigBuilder {
        CheckCyclesConfigBuilder::new()
    }
}

#[derive(Default)]
pub struct CheckCyclesConfigBuilder {
    paths: Option<Vec<PathBuf>>,
    root: Option<PathBuf>,
    format: Option<OutputFormat>,
    error_on_cycles: Option<bool>,
    max_cycles: Option<Option<usize>>,
    analysis: Option<AnalysisConfig>,
}

impl CheckCyclesConfigBuilder {
    pub fn new() -> Self {
        Self {
            paths: None,
            root: None,
            format: None,
            error_on_cycles: None,
            max_cycles: None,
            analysis: None,
        }
    }

    pub fn with_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.paths = Some(paths);
        self
    }

    pub fn with_root(mut self, root: PathBuf) -> Self {
        self.root = Some(root);
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_error_on_cycles(mut self, error_on_cycles: bool) -> Self {
        self.error_on_cycles = Some(error_on_cycles);
        self
    }

    pub fn with_max_cycles(mut self, max_cycles: Option<usize>) -> Self {
        self.max_cycles = Some(max_cycles);
        self
    }

    pub fn with_analysis(mut self, analysis: AnalysisConfig) -> Self {
        self.analysis = Some(analysis);
        self
    }
}

impl crate::common::ConfigBuilder for CheckCyclesConfigBuilder {
    type Config = CheckCyclesConfig;

    fn build(self) -> Result<Self::Config, CycleRadarError> {
        let paths = self
            .paths
            .ok_or_else(|| CycleRadarError::ConfigurationError {
                message: "Missing required field: paths".to_string(),
            })?;
        if paths.is_empty() {
            return Err(CycleRadarError::ConfigurationError {
                message: "At least one entity manifest is required".to_string(),
            });
        }

        let analysis = self.analysis.unwrap_or_default();
        analysis.validate()?;

        Ok(CheckCyclesConfig {
            paths,
            root: self.root.unwrap_or_else(|| PathBuf::from(".")),
            format: self
                .format
                .ok_or_else(|| CycleRadarError::ConfigurationError {
                    message: "Missing required field: format".to_string(),
                })?,
            error_on_cycles: self.error_on_cycles.unwrap_or(false),
            max_cycles: self.max_cycles.unwrap_or(None),
            analysis,
        })
    }
}
