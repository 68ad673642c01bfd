//! # Cycle Detection Module
//!
//! Finds circular dependencies between files and turns them into
//! reportable, scored cycles.
//!
//! ## Pipeline
//!
//! Up to three sources contribute raw cycles for one graph:
//!
//! - **external tool**: an optional subprocess, run concurrently with the
//!   internal analysis and bounded by a timeout
//! - **scc**: Tarjan's strongly connected components, one representative
//!   cycle per non-trivial component
//! - **dfs**: a bounded depth-first finder that respects `max_cycle_length`
//!
//! The lists are merged in that order by [`CycleDeduplicator`] (rotations,
//! and by default reversals, count as the same cycle), filtered by
//! `weight_threshold` and enriched by [`CycleScorer`].
//!
//! ## Example
//!
//! ```
//! use std::path::Path;
//!
//! use cycle_radar::config::AnalysisConfig;
//! use cycle_radar::core::Entity;
//! use cycle_radar::detector::CycleDetector;
//! use cycle_radar::graph::FileGraphBuilder;
//! use cycle_radar::paths::LexicalNormalizer;
//!
//! # fn main() -> miette::Result<()> {
//! let entities = vec![
//!     Entity::new("src/a.ts", vec!["src/b.ts".to_string()]),
//!     Entity::new("src/b.ts", vec!["src/a.ts".to_string()]),
//! ];
//!
//! let normalizer = LexicalNormalizer::new(Path::new("/repo"));
//! let graph = FileGraphBuilder::new(&normalizer).build(&entities);
//!
//! let mut detector = CycleDetector::new(AnalysisConfig::default());
//! detector.detect_cycles(&graph, Path::new("/repo"))?;
//!
//! assert!(detector.has_cycles());
//! assert_eq!(detector.cycle_count(), 1);
//! assert_eq!(detector.cycles()[0].depth(), 2);
//! # Ok(())
//! # }
//! ```

mod cycle;
mod dedup;
mod detector_impl;
mod extractor;
mod scc;
mod scorer;
mod simple;

pub use cycle::{BreakPoint, CycleId, DependencyCycle, Impact, RawCycle, strip_closing};
pub use dedup::{CycleDeduplicator, EquivalenceMode};
pub use detector_impl::CycleDetector;
pub use extractor::extract_cycle;
pub use scc::find_sccs;
pub use scorer::CycleScorer;
pub use simple::find_simple_cycles;
