//! # External Cycle Detection
//!
//! An optional, best-effort second opinion from a third-party cycle detector
//! run as a subprocess. Its results are merged with the internal analysis
//! but never required: any failure means "no cycles from this source".
//!
//! [`ExternalCycleSource`] is the seam; [`ExternalToolCommand`] is the
//! subprocess implementation used by the CLI.

mod command;

use std::path::Path;

pub use command::ExternalToolCommand;

use crate::detector::RawCycle;
use crate::error::ExternalToolError;
use crate::paths::PathNormalizer;

/// A detector outside the engine that reports cycles for a directory
pub trait ExternalCycleSource: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Report cycles for the files under `root`, with every path normalized
    fn find_cycles(
        &self,
        root: &Path,
        normalizer: &dyn PathNormalizer,
    ) -> Result<Vec<RawCycle>, ExternalToolError>;
}
