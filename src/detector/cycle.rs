//! Cycle representations
//!
//! [`RawCycle`] is what each detection source produces; [`DependencyCycle`]
//! is the enriched, reportable form produced by the scorer.

use std::collections::HashSet;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use crate::core::{BuildTimeImprovement, CycleSource, Difficulty, Severity};

static NEXT_CYCLE_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque cycle identifier, unique within the process
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CycleId(String);

impl CycleId {
    pub fn next() -> Self {
        let n = NEXT_CYCLE_ID.fetch_add(1, Ordering::Relaxed);
        Self(format!("cycle-{n}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CycleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A closed walk of normalized file paths as reported by one detector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCycle {
    nodes: Vec<String>,
    source: CycleSource,
}

impl RawCycle {
    /// Create a cycle, appending the first node again if the walk is open
    pub fn new(mut nodes: Vec<String>, source: CycleSource) -> Self {
        if let (Some(first), Some(last)) = (nodes.first(), nodes.last())
            && (nodes.len() == 1 || first != last)
        {
            let first = first.clone();
            nodes.push(first);
        }
        Self { nodes, source }
    }

    /// Closed node sequence: the first node is repeated at the end
    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    /// Node sequence without the closing duplicate
    pub fn open_nodes(&self) -> &[String] {
        strip_closing(&self.nodes)
    }

    pub fn source(&self) -> CycleSource {
        self.source
    }

    /// Number of distinct files in the cycle
    pub fn len(&self) -> usize {
        self.files().len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Distinct files in order of first appearance
    pub fn files(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.open_nodes()
            .iter()
            .filter(|node| seen.insert(node.as_str()))
            .cloned()
            .collect()
    }

    /// Consecutive (from, to) pairs, including the wrap-around pair
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        let open = self.open_nodes();
        let n = open.len();
        (0..n).map(move |i| (open[i].as_str(), open[(i + 1) % n].as_str()))
    }
}

/// Drop a trailing node equal to the first one
pub fn strip_closing(nodes: &[String]) -> &[String] {
    match (nodes.first(), nodes.last()) {
        (Some(first), Some(last)) if nodes.len() > 1 && first == last => {
            &nodes[..nodes.len() - 1]
        }
        _ => nodes,
    }
}

/// Estimated consequences of leaving a cycle in place
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Impact {
    pub affected_files: usize,
    pub estimated_refactoring_hours: usize,
    pub risk_level: Severity,
    pub build_time_improvement: BuildTimeImprovement,
}

/// An edge of a cycle that is a candidate for removal
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakPoint {
    pub from: String,
    pub to: String,
    pub weight: usize,
    pub difficulty: Difficulty,
    pub suggestion: String,
}

/// A unique, scored dependency cycle
///
/// Fields are only populated by the scorer, so severity and impact always
/// agree with the cycle's length and weight.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyCycle {
    id: CycleId,
    cycle: Vec<String>,
    severity: Severity,
    depth: usize,
    files: Vec<String>,
    suggestions: Vec<String>,
    source: CycleSource,
    weight: usize,
    impact: Impact,
    break_points: Vec<BreakPoint>,
    related_cycles: Vec<CycleId>,
}

impl DependencyCycle {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        id: CycleId,
        raw: &RawCycle,
        weight: usize,
        suggestions: Vec<String>,
        impact: Impact,
        break_points: Vec<BreakPoint>,
        related_cycles: Vec<CycleId>,
    ) -> Self {
        let files = raw.files();
        let depth = files.len();
        Self {
            id,
            cycle: raw.nodes().to_vec(),
            severity: Severity::classify(depth, weight),
            depth,
            files,
            suggestions,
            source: raw.source(),
            weight,
            impact,
            break_points,
            related_cycles,
        }
    }

    pub fn id(&self) -> &CycleId {
        &self.id
    }

    /// Closed path list
    pub fn cycle(&self) -> &[String] {
        &self.cycle
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn files(&self) -> &[String] {
        &self.files
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn source(&self) -> CycleSource {
        self.source
    }

    pub fn weight(&self) -> usize {
        self.weight
    }

    pub fn impact(&self) -> &Impact {
        &self.impact
    }

    pub fn break_points(&self) -> &[BreakPoint] {
        &self.break_points
    }

    pub fn related_cycles(&self) -> &[CycleId] {
        &self.related_cycles
    }
}
