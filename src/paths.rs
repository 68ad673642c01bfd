//! Path normalization
//!
//! Graph nodes are keyed by normalized path strings, so every path that
//! enters the engine (entity paths, dependency targets, external tool output)
//! goes through a [`PathNormalizer`] first.

use std::path::Path;

/// Maps any path spelling onto one canonical, separator-independent,
/// absolute key. Two spellings of the same file must normalize identically.
pub trait PathNormalizer: Send + Sync {
    fn normalize(&self, path: &str) -> String;
}

/// Purely lexical normalizer: no filesystem access, symlinks are not
/// resolved.
#[derive(Debug, Clone)]
pub struct LexicalNormalizer {
    base: String,
}

impl LexicalNormalizer {
    /// Relative paths are resolved against `base`.
    pub fn new(base: &Path) -> Self {
        let raw = base.to_string_lossy().replace('\\', "/");
        let base = if is_absolute(&raw) {
            collapse(&raw)
        } else {
            collapse(&format!("/{raw}"))
        };
        Self { base }
    }

    pub fn base(&self) -> &str {
        &self.base
    }
}

impl Default for LexicalNormalizer {
    fn default() -> Self {
        let cwd = std::env::current_dir().unwrap_or_else(|_| "/".into());
        Self::new(&cwd)
    }
}

impl PathNormalizer for LexicalNormalizer {
    fn normalize(&self, path: &str) -> String {
        let unified = path.trim().replace('\\', "/");
        if is_absolute(&unified) {
            collapse(&unified)
        } else {
            collapse(&format!("{}/{}", self.base, unified))
        }
    }
}

fn is_absolute(path: &str) -> bool {
    path.starts_with('/') || has_drive_prefix(path)
}

fn has_drive_prefix(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

/// Resolve `.`, `..` and repeated separators in an absolute path.
fn collapse(path: &str) -> String {
    let (prefix, rest) = if has_drive_prefix(path) {
        (path[..2].to_ascii_uppercase(), &path[2..])
    } else {
        (String::new(), path)
    };

    let mut parts: Vec<&str> = Vec::new();
    for segment in rest.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            other => parts.push(other),
        }
    }

    format!("{prefix}/{}", parts.join("/"))
}
