//! Graph command configuration

use std::path::PathBuf;

use super::AnalysisConfig;
use crate::cli::GraphFormat;
use crate::error::CycleRadarError;

#[derive(Debug, Clone)]
pub struct GraphOptions {
    pub paths: Vec<PathBuf>,
    pub root: PathBuf,
    pub format: GraphFormat,
    pub output: Option<PathBuf>,
    pub analysis: AnalysisConfig,
}

impl GraphOptions {
    pub fn builder() -> GraphOptionsBuilder {
        GraphOptionsBuilder::new()
    }
}

#[derive(Default)]
pub struct GraphOptionsBuilder {
    paths: Option<Vec<PathBuf>>,
    root: Option<PathBuf>,
    format: Option<GraphFormat>,
    output: Option<Option<PathBuf>>,
    analysis: Option<AnalysisConfig>,
}

impl GraphOptionsBuilder {
    pub fn new() -> Self {
        Self {
            paths: None,
            root: None,
            format: None,
            output: None,
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

    pub fn with_format(mut self, format: GraphFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_output(mut self, output: Option<PathBuf>) -> Self {
        self.output = Some(output);
        self
    }

    pub fn with_analysis(mut self, analysis: AnalysisConfig) -> Self {
        self.analysis = Some(analysis);
        self
    }
}

impl crate::common::ConfigBuilder for GraphOptionsBuilder {
    type Config = GraphOptions;

    fn build(self) -> Result<Self::Config, CycleRadarError> {
        let analysis = self.analysis.unwrap_or_default();
        analysis.validate()?;

        Ok(GraphOptions {
            paths: self
                .paths
                .ok_or_else(|| CycleRadarError::ConfigurationError {
                    message: "Missing required field: paths".to_string(),
                })?,
            root: self.root.unwrap_or_else(|| PathBuf::from(".")),
            format: self
                .format
                .ok_or_else(|| CycleRadarError::ConfigurationError {
                    message: "Missing required field: format".to_string(),
                })?,
            output: self.output.unwrap_or(None),
            analysis,
        })
    }
}
