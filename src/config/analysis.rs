//! Engine configuration shared by every command

use std::path::Path;

use miette::{NamedSource, Result, SourceSpan};
use serde::Deserialize;

use crate::constants::{analysis, external};
use crate::detector::EquivalenceMode;
use crate::error::{CycleRadarError, TomlParseError};

/// Settings for one analysis run.
///
/// Loaded from a TOML file, assembled by the builder, or both: the CLI
/// starts from the file (if any) and overrides individual fields from flags.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Run the external cycle detector alongside internal analysis
    pub enable_external_tool: bool,
    /// Run the SCC and bounded DFS detectors
    pub enable_internal_analysis: bool,
    /// Longest cycle the bounded DFS detector reports
    pub max_cycle_length: usize,
    /// Cycles lighter than this are not reported
    pub weight_threshold: usize,
    /// How cycles from different detectors are matched up
    pub equivalence: EquivalenceMode,
    /// Glob patterns; matching entities are dropped before graph building
    pub exclude: Vec<String>,
    pub external_tool: ExternalToolConfig,
}

/// How to invoke the external cycle detector
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExternalToolConfig {
    pub program: String,
    pub args: Vec<String>,
    pub timeout_secs: u64,
}

impl Default for ExternalToolConfig {
    fn default() -> Self {
        Self {
            program: external::DEFAULT_PROGRAM.to_string(),
            args: external::DEFAULT_ARGS.iter().map(|s| s.to_string()).collect(),
            timeout_secs: external::DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            enable_external_tool: false,
            enable_internal_analysis: true,
            max_cycle_length: analysis::DEFAULT_MAX_CYCLE_LENGTH,
            weight_threshold: analysis::DEFAULT_WEIGHT_THRESHOLD,
            equivalence: EquivalenceMode::default(),
            exclude: Vec::new(),
            external_tool: ExternalToolConfig::default(),
        }
    }
}

impl AnalysisConfig {
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder::new()
    }

    /// Load a configuration file. Missing keys take their defaults.
    pub fn from_toml_file(path: &Path) -> Result<Self, CycleRadarError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| CycleRadarError::FileReadError {
                path: path.to_path_buf(),
                source: e,
            })?;

        let config = Self::parse_toml(&content, &path.display().to_string())?;
        config.validate()?;
        Ok(config)
    }

    fn parse_toml(content: &str, name: &str) -> Result<Self, CycleRadarError> {
        toml::from_str(content).map_err(|e| {
            let span = e
                .span()
                .map(|span| SourceSpan::new(span.start.into(), span.end - span.start));

            CycleRadarError::TomlParseError(Box::new(TomlParseError {
                file: name.to_string(),
                source_code: NamedSource::new(name, content.to_string()),
                span,
                source: e,
            }))
        })
    }

    /// Check values that deserialization alone cannot rule out
    pub fn validate(&self) -> Result<(), CycleRadarError> {
        if self.max_cycle_length < analysis::MIN_CYCLE_LENGTH {
            return Err(CycleRadarError::ConfigurationError {
                message: format!(
                    "max_cycle_length must be at least {}, got {}",
                    analysis::MIN_CYCLE_LENGTH,
                    self.max_cycle_length
                ),
            });
        }
        if self.enable_external_tool && self.external_tool.program.trim().is_empty() {
            return Err(CycleRadarError::ConfigurationError {
                message: "external_tool.program must not be empty".to_string(),
            });
        }
        self.exclude_patterns()?;
        Ok(())
    }

    /// Compile the exclude globs
    pub fn exclude_patterns(&self) -> Result<Vec<glob::Pattern>, CycleRadarError> {
        self.exclude
            .iter()
            .map(|pattern| {
                glob::Pattern::new(pattern).map_err(|source| CycleRadarError::InvalidGlob {
                    pattern: pattern.clone(),
                    source,
                })
            })
            .collect()
    }
}

#[derive(Default)]
pub struct AnalysisConfigBuilder {
    config: AnalysisConfig,
}

impl AnalysisConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration, e.g. one loaded from a file
    pub fn from_config(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn with_external_tool(mut self, enabled: bool) -> Self {
        self.config.enable_external_tool = enabled;
        self
    }

    pub fn with_internal_analysis(mut self, enabled: bool) -> Self {
        self.config.enable_internal_analysis = enabled;
        self
    }

    pub fn with_max_cycle_length(mut self, max_cycle_length: usize) -> Self {
        self.config.max_cycle_length = max_cycle_length;
        self
    }

    pub fn with_weight_threshold(mut self, weight_threshold: usize) -> Self {
        self.config.weight_threshold = weight_threshold;
        self
    }

    pub fn with_equivalence(mut self, equivalence: EquivalenceMode) -> Self {
        self.config.equivalence = equivalence;
        self
    }

    pub fn with_exclude(mut self, exclude: Vec<String>) -> Self {
        self.config.exclude = exclude;
        self
    }

    pub fn with_external_tool_config(mut self, external_tool: ExternalToolConfig) -> Self {
        self.config.external_tool = external_tool;
        self
    }
}

impl crate::common::ConfigBuilder for AnalysisConfigBuilder {
    type Config = AnalysisConfig;

    fn build(self) -> Result<Self::Config, CycleRadarError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
