//! Cross-source cycle deduplication

use serde::{Deserialize, Serialize};

use super::cycle::{RawCycle, strip_closing};

/// When two node sequences describe the same cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EquivalenceMode {
    /// Rotations, and rotations of the reversed walk, are equivalent
    #[default]
    RotationOrReversal,
    /// Only rotations are equivalent; direction matters
    RotationOnly,
}

/// Merges cycle lists from several detectors into one unique list
#[derive(Debug, Clone, Copy, Default)]
pub struct CycleDeduplicator {
    mode: EquivalenceMode,
}

impl CycleDeduplicator {
    pub fn new(mode: EquivalenceMode) -> Self {
        Self { mode }
    }

    /// Whether `a` and `b` describe the same cycle. Closed and open walks
    /// compare equal.
    pub fn is_equivalent(&self, a: &[String], b: &[String]) -> bool {
        let a = strip_closing(a);
        let b = strip_closing(b);
        if a.len() != b.len() {
            return false;
        }
        if is_rotation(a, b) {
            return true;
        }
        match self.mode {
            EquivalenceMode::RotationOnly => false,
            EquivalenceMode::RotationOrReversal => {
                let reversed: Vec<String> = b.iter().rev().cloned().collect();
                is_rotation(a, &reversed)
            }
        }
    }

    /// Merge sources in priority order.
    ///
    /// The first non-empty source is taken as-is, without checking it
    /// against itself. Every later cycle is kept only if it is not
    /// equivalent to a cycle already accepted, so the earliest source wins
    /// ties.
    ///
    /// When the external source is empty the SCC list is the one taken
    /// unfiltered. That is sound because each SCC yields one cycle over
    /// its own members and SCCs are disjoint, so no two of its cycles are
    /// equivalent.
    pub fn merge(&self, sources: Vec<Vec<RawCycle>>) -> Vec<RawCycle> {
        let mut accepted: Vec<RawCycle> = Vec::new();

        for source in sources {
            if accepted.is_empty() {
                accepted = source;
                continue;
            }
            for cycle in source {
                let duplicate = accepted
                    .iter()
                    .any(|kept| self.is_equivalent(kept.nodes(), cycle.nodes()));
                if !duplicate {
                    accepted.push(cycle);
                }
            }
        }

        accepted
    }
}

fn is_rotation(a: &[String], b: &[String]) -> bool {
    let n = a.len();
    if n != b.len() {
        return false;
    }
    let Some(head) = a.first() else {
        return true;
    };

    (0..n)
        .filter(|&offset| &b[offset] == head)
        .any(|offset| (0..n).all(|i| a[i] == b[(offset + i) % n]))
}
