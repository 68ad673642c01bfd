use std::path::{Path, PathBuf};

use console::style;
use miette::{Result, WrapErr};
use rayon::prelude::*;
use tracing::debug;
use walkdir::WalkDir;

use crate::core::Entity;
use crate::error::CycleRadarError;
use crate::progress::ProgressReporter;

/// Directories never searched for manifests
const SKIPPED_DIRS: &[&str] = &[".git", "node_modules", "target"];

/// Loads entity manifests and applies exclude patterns
#[derive(Debug, Clone, Default)]
pub struct EntityAnalyzer {
    exclude: Vec<glob::Pattern>,
    entities: Vec<Entity>,
    manifests: Vec<PathBuf>,
    excluded: usize,
}

impl EntityAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entities whose file path matches any of `patterns` are dropped
    pub fn with_exclude(mut self, patterns: Vec<glob::Pattern>) -> Self {
        self.exclude = patterns;
        self
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Manifest files read by the last load
    pub fn manifests(&self) -> &[PathBuf] {
        &self.manifests
    }

    /// Number of entities dropped by exclude patterns in the last load
    pub fn excluded_count(&self) -> usize {
        self.excluded
    }

    /// Load every manifest under `paths`.
    ///
    /// A path is either a manifest file or a directory searched recursively
    /// for `*.json` files. Manifests are parsed in parallel; entities keep
    /// the order of their manifests and of their position inside them.
    pub fn load_entities(
        &mut self,
        paths: &[PathBuf],
        mut progress: Option<&mut ProgressReporter>,
    ) -> Result<()> {
        if let Some(p) = progress.as_mut() {
            p.start_loading();
        }

        let manifests = discover_manifests(paths)?;
        if let Some(p) = progress.as_deref() {
            for manifest in &manifests {
                p.loading_manifest(manifest);
            }
        }

        let parsed: Vec<Result<Vec<Entity>>> = manifests
            .par_iter()
            .map(|manifest| {
                parse_manifest(manifest)
                    .wrap_err_with(|| format!("Failed to load '{}'", manifest.display()))
            })
            .collect();

        let mut entities = Vec::new();
        for result in parsed {
            entities.extend(result?);
        }

        let total = entities.len();
        entities.retain(|entity| !self.is_excluded(entity));
        self.excluded = total - entities.len();
        self.entities = entities;
        self.manifests = manifests;

        debug!(
            manifests = self.manifests.len(),
            entities = self.entities.len(),
            excluded = self.excluded,
            "loaded entities"
        );

        if let Some(p) = progress.as_mut() {
            p.finish_loading(self.entities.len(), self.manifests.len());
        }
        if self.excluded > 0 && progress.is_some() {
            eprintln!(
                "{} Excluded {} file{} by pattern",
                style("ℹ").blue(),
                style(self.excluded).bold(),
                if self.excluded == 1 { "" } else { "s" }
            );
        }

        Ok(())
    }

    fn is_excluded(&self, entity: &Entity) -> bool {
        let path = entity.file_path.replace('\\', "/");
        self.exclude.iter().any(|pattern| pattern.matches(&path))
    }
}

/// Expand `paths` into a sorted, de-duplicated list of manifest files
pub fn discover_manifests(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut manifests = Vec::new();

    for path in paths {
        let metadata = std::fs::metadata(path).map_err(|e| CycleRadarError::FileReadError {
            path: path.clone(),
            source: e,
        })?;

        if metadata.is_file() {
            manifests.push(path.clone());
            continue;
        }

        let mut found: Vec<PathBuf> = WalkDir::new(path)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| {
                let name = e.file_name();
                !SKIPPED_DIRS.iter().any(|skipped| name == *skipped)
            })
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "json"))
            .map(|e| e.into_path())
            .collect();
        manifests.append(&mut found);
    }

    let mut seen = std::collections::HashSet::new();
    manifests.retain(|manifest| seen.insert(manifest.clone()));
    Ok(manifests)
}

fn parse_manifest(path: &Path) -> Result<Vec<Entity>> {
    let content = std::fs::read_to_string(path).map_err(|e| CycleRadarError::FileReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    let entities = serde_json::from_str(&content).map_err(|e| {
        CycleRadarError::EntityParseError {
            path: path.to_path_buf(),
            source: e,
        }
    })?;
    Ok(entities)
}
