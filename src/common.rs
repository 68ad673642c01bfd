//! Common functionality shared across commands

use std::path::PathBuf;

use clap::Args;

use crate::config::AnalysisConfig;
use crate::config::analysis::AnalysisConfigBuilder;
use crate::detector::EquivalenceMode;
use crate::error::CycleRadarError;

/// Common arguments shared by multiple commands
#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// Entity manifests, or directories searched for `*.json` manifests
    #[arg(required = true, value_name = "MANIFEST")]
    pub paths: Vec<PathBuf>,

    /// Project root; relative entity paths resolve against it and the
    /// external tool is run on it
    #[arg(long, value_name = "DIR", env = "CYCLE_RADAR_ROOT")]
    pub root: Option<PathBuf>,

    /// TOML configuration file; flags override its values
    #[arg(long, value_name = "FILE", env = "CYCLE_RADAR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Longest cycle reported by the bounded search
    #[arg(long, value_name = "N", env = "CYCLE_RADAR_MAX_CYCLE_LENGTH")]
    pub max_cycle_length: Option<usize>,

    /// Only report cycles at least this heavy
    #[arg(long, value_name = "N", env = "CYCLE_RADAR_WEIGHT_THRESHOLD")]
    pub weight_threshold: Option<usize>,

    /// Treat a cycle and its reverse as different cycles
    #[arg(long, env = "CYCLE_RADAR_STRICT_DIRECTION")]
    pub strict_direction: bool,

    /// Also run the external cycle detector
    #[arg(long, env = "CYCLE_RADAR_EXTERNAL_TOOL")]
    pub external_tool: bool,

    /// Skip the built-in graph analysis
    #[arg(long, env = "CYCLE_RADAR_NO_INTERNAL")]
    pub no_internal: bool,

    /// Glob patterns for files to leave out of the graph
    #[arg(
        long,
        value_name = "GLOB",
        value_delimiter = ',',
        env = "CYCLE_RADAR_EXCLUDE"
    )]
    pub exclude: Vec<String>,
}

/// Common output format arguments
#[derive(Args, Debug, Clone)]
pub struct FormatArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = crate::constants::output::DEFAULT_FORMAT, env = "CYCLE_RADAR_FORMAT")]
    pub format: crate::cli::OutputFormat,
}

/// Common cycle display arguments
#[derive(Args, Debug, Clone)]
pub struct CycleDisplayArgs {
    /// Maximum number of cycles to display (shows all by default)
    #[arg(long, env = "CYCLE_RADAR_MAX_CYCLES")]
    pub max_cycles: Option<usize>,
}

impl CommonArgs {
    /// Project root, defaulting to the current directory
    pub fn get_root(&self) -> PathBuf {
        self.root
            .clone()
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    }

    /// Start from the config file (or defaults) and apply flag overrides.
    /// Flags only ever switch things on relative to the file, so an unset
    /// flag leaves the file's value alone.
    pub fn resolve_analysis_config(&self) -> Result<AnalysisConfig, CycleRadarError> {
        let base = match &self.config {
            Some(path) => AnalysisConfig::from_toml_file(path)?,
            None => AnalysisConfig::default(),
        };

        let mut builder = AnalysisConfigBuilder::from_config(base.clone());
        if let Some(max_cycle_length) = self.max_cycle_length {
            builder = builder.with_max_cycle_length(max_cycle_length);
        }
        if let Some(weight_threshold) = self.weight_threshold {
            builder = builder.with_weight_threshold(weight_threshold);
        }
        if self.strict_direction {
            builder = builder.with_equivalence(EquivalenceMode::RotationOnly);
        }
        if self.external_tool {
            builder = builder.with_external_tool(true);
        }
        if self.no_internal {
            builder = builder.with_internal_analysis(false);
        }
        if !self.exclude.is_empty() {
            let mut exclude = base.exclude;
            exclude.extend(self.exclude.iter().cloned());
            builder = builder.with_exclude(exclude);
        }

        builder.build()
    }
}

/// Generic builder trait for configuration objects
pub trait ConfigBuilder: Sized {
    type Config;

    /// Build the configuration, returning an error if validation fails
    fn build(self) -> Result<Self::Config, CycleRadarError>;
}

/// Trait for configurations that can be created from CLI commands
pub trait FromCommand: Sized {
    /// The command variant that this config can be created from
    fn from_command(command: crate::cli::Commands) -> Result<Self, CycleRadarError>;
}

/// Macro to implement `TryFrom<Commands>` using [`FromCommand`] trait
#[macro_export]
macro_rules! impl_try_from_command {
    ($config:ty) => {
        impl std::convert::TryFrom<$crate::cli::Commands> for $config {
            type Error = $crate::error::CycleRadarError;

            fn try_from(command: $crate::cli::Commands) -> Result<Self, Self::Error> {
                <$config as $crate::common::FromCommand>::from_command(command)
            }
        }
    };
}
