//! # Configuration Module
//!
//! Configuration structures for the engine and for each cycle-radar
//! command. Every command config embeds an [`AnalysisConfig`], which can be
//! loaded from a TOML file and then overridden by CLI flags.
//!
//! ## Example
//!
//! ```
//! use cycle_radar::cli::OutputFormat;
//! use cycle_radar::common::ConfigBuilder;
//! use cycle_radar::config::{AnalysisConfig, CheckCyclesConfig};
//!
//! let analysis = AnalysisConfig::builder()
//!     .with_max_cycle_length(6)
//!     .build()
//!     .unwrap();
//!
//! let config = CheckCyclesConfig::builder()
//!     .with_paths(vec!["entities.json".into()])
//!     .with_format(OutputFormat::Human)
//!     .with_error_on_cycles(true)
//!     .with_analysis(analysis)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.analysis.max_cycle_length, 6);
//! ```

pub mod analysis;
pub mod check;
pub mod graph;

pub use analysis::{AnalysisConfig, ExternalToolConfig};
pub use check::CheckCyclesConfig;
pub use graph::GraphOptions;
