//! Cycle enrichment: weight, severity, impact, break points and links
//! between cycles that share files.

use std::collections::HashSet;

use rayon::prelude::*;

use super::cycle::{BreakPoint, CycleId, DependencyCycle, Impact, RawCycle};
use crate::core::{BuildTimeImprovement, Difficulty, Severity};
use crate::graph::FileGraph;

const GENERIC_SUGGESTIONS: &[&str] = &[
    "Extract shared functionality into a separate module that both sides can depend on",
    "Apply dependency inversion: depend on an abstraction instead of the concrete module",
    "Move shared types and interfaces into a dedicated types module",
    "Review each import in the cycle and remove the ones that are not needed",
];

const LONG_CYCLE_SUGGESTION: &str =
    "Introduce intermediate abstraction layers to shorten the dependency chain";

const MUTUAL_PAIR_SUGGESTIONS: &[&str] = &[
    "Consider merging the two modules if they always change together",
    "Extract the code both modules need into a third module",
];

const EASY_BREAK: &str = "Extract an interface or move the shared types to break this edge";
const HARD_BREAK: &str = "Consider architectural refactoring to remove this dependency";

/// Computes every derived attribute of a cycle from the graph it came from
pub struct CycleScorer<'g> {
    graph: &'g FileGraph,
}

impl<'g> CycleScorer<'g> {
    pub fn new(graph: &'g FileGraph) -> Self {
        Self { graph }
    }

    /// Weight of a single edge; edges unknown to the graph count as 1
    pub fn edge_weight(&self, from: &str, to: &str) -> usize {
        self.graph.weight_between(from, to).unwrap_or(1)
    }

    /// Sum of edge weights around the cycle, wrap-around pair included
    pub fn weight(&self, cycle: &RawCycle) -> usize {
        cycle
            .pairs()
            .map(|(from, to)| self.edge_weight(from, to))
            .sum()
    }

    pub fn suggestions(length: usize) -> Vec<String> {
        let mut suggestions: Vec<String> =
            GENERIC_SUGGESTIONS.iter().map(|s| s.to_string()).collect();
        if length > 4 {
            suggestions.push(LONG_CYCLE_SUGGESTION.to_string());
        }
        if length == 2 {
            suggestions.extend(MUTUAL_PAIR_SUGGESTIONS.iter().map(|s| s.to_string()));
        }
        suggestions
    }

    pub fn impact(length: usize, weight: usize) -> Impact {
        Impact {
            affected_files: length,
            estimated_refactoring_hours: (length * 2).max(2),
            risk_level: Severity::classify(length, weight),
            build_time_improvement: if weight > 5 {
                BuildTimeImprovement::Significant
            } else {
                BuildTimeImprovement::Moderate
            },
        }
    }

    /// Candidate edges to sever, lightest first
    pub fn break_points(&self, cycle: &RawCycle) -> Vec<BreakPoint> {
        let mut points: Vec<BreakPoint> = cycle
            .pairs()
            .map(|(from, to)| {
                let weight = self.edge_weight(from, to);
                BreakPoint {
                    from: from.to_string(),
                    to: to.to_string(),
                    weight,
                    difficulty: Difficulty::from_weight(weight),
                    suggestion: (if weight == 1 { EASY_BREAK } else { HARD_BREAK }).to_string(),
                }
            })
            .collect();
        points.sort_by_key(|point| point.weight);
        points
    }

    /// Assign ids and enrich every unique cycle.
    ///
    /// Ids are handed out up front so each cycle can reference the others;
    /// the per-cycle work is independent and runs in parallel.
    pub fn score(&self, cycles: Vec<RawCycle>) -> Vec<DependencyCycle> {
        let ids: Vec<CycleId> = cycles.iter().map(|_| CycleId::next()).collect();
        let members: Vec<HashSet<&str>> = cycles
            .iter()
            .map(|cycle| cycle.open_nodes().iter().map(String::as_str).collect())
            .collect();

        cycles
            .par_iter()
            .enumerate()
            .map(|(i, cycle)| {
                let weight = self.weight(cycle);
                let length = cycle.len();
                let related: Vec<CycleId> = members
                    .iter()
                    .enumerate()
                    .filter(|&(j, other)| j != i && !members[i].is_disjoint(other))
                    .map(|(j, _)| ids[j].clone())
                    .collect();

                DependencyCycle::new(
                    ids[i].clone(),
                    cycle,
                    weight,
                    Self::suggestions(length),
                    Self::impact(length, weight),
                    self.break_points(cycle),
                    related,
                )
            })
            .collect()
    }
}
