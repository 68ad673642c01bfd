//! Core type definitions
//!
//! This module contains the basic data structures used throughout the
//! application, with minimal logic - focusing on data representation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A source file together with the raw dependency paths extracted from it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub file_path: String,
    #[serde(default)]
    pub dependencies: Vec<String>,
}

impl Entity {
    pub fn new<S: Into<String>>(file_path: S, dependencies: Vec<String>) -> Self {
        Self {
            file_path: file_path.into(),
            dependencies,
        }
    }
}

/// Which detector reported a cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CycleSource {
    ExternalTool,
    Scc,
    Dfs,
}

impl fmt::Display for CycleSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CycleSource::ExternalTool => write!(f, "external-tool"),
            CycleSource::Scc => write!(f, "scc"),
            CycleSource::Dfs => write!(f, "dfs"),
        }
    }
}

/// Coarse risk tier of a cycle
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Classify a cycle by its length and accumulated weight.
    ///
    /// Tiers are checked from the top down and the first match wins.
    pub fn classify(length: usize, weight: usize) -> Self {
        if length > 6 || weight > 10 {
            Severity::Critical
        } else if length > 4 || weight > 5 {
            Severity::High
        } else if length > 2 || weight > 2 {
            Severity::Medium
        } else {
            Severity::Low
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Low => write!(f, "low"),
            Severity::Medium => write!(f, "medium"),
            Severity::High => write!(f, "high"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}

/// How hard it is to remove a single edge of a cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn from_weight(weight: usize) -> Self {
        if weight < 2 {
            Difficulty::Easy
        } else if weight < 5 {
            Difficulty::Medium
        } else {
            Difficulty::Hard
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

/// Expected build-time gain from breaking a cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildTimeImprovement {
    Moderate,
    Significant,
}

impl fmt::Display for BuildTimeImprovement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildTimeImprovement::Moderate => write!(f, "moderate"),
            BuildTimeImprovement::Significant => write!(f, "significant"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_tiers() {
        assert_eq!(Severity::classify(2, 2), Severity::Low);
        assert_eq!(Severity::classify(3, 3), Severity::Medium);
        assert_eq!(Severity::classify(2, 3), Severity::Medium);
        assert_eq!(Severity::classify(5, 5), Severity::High);
        assert_eq!(Severity::classify(2, 6), Severity::High);
        assert_eq!(Severity::classify(7, 7), Severity::Critical);
        assert_eq!(Severity::classify(2, 11), Severity::Critical);
    }

    #[test]
    fn test_severity_boundaries_are_exclusive() {
        assert_eq!(Severity::classify(6, 10), Severity::High);
        assert_eq!(Severity::classify(4, 5), Severity::Medium);
        assert_eq!(Severity::classify(2, 2), Severity::Low);
    }

    #[test]
    fn test_difficulty_from_weight() {
        assert_eq!(Difficulty::from_weight(1), Difficulty::Easy);
        assert_eq!(Difficulty::from_weight(2), Difficulty::Medium);
        assert_eq!(Difficulty::from_weight(4), Difficulty::Medium);
        assert_eq!(Difficulty::from_weight(5), Difficulty::Hard);
    }

    #[test]
    fn test_entity_deserializes_camel_case() {
        let entity: Entity =
            serde_json::from_str(r#"{"filePath": "src/a.ts", "dependencies": ["src/b.ts"]}"#)
                .unwrap();
        assert_eq!(entity.file_path, "src/a.ts");
        assert_eq!(entity.dependencies, vec!["src/b.ts".to_string()]);

        let bare: Entity = serde_json::from_str(r#"{"filePath": "src/c.ts"}"#).unwrap();
        assert!(bare.dependencies.is_empty());
    }

    #[test]
    fn test_source_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_string(&CycleSource::ExternalTool).unwrap(),
            "\"external-tool\""
        );
        assert_eq!(CycleSource::Scc.to_string(), "scc");
        assert_eq!(CycleSource::Dfs.to_string(), "dfs");
    }
}
