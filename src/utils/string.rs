//! String manipulation utilities

/// Pluralize a word based on count
pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}

/// Shorten `path` to at most `max` characters, keeping the end, which is
/// the part that identifies a file
pub fn truncate_path(path: &str, max: usize) -> String {
    let count = path.chars().count();
    if count <= max || max < 2 {
        return path.to_string();
    }
    let tail: String = path.chars().skip(count - (max - 1)).collect();
    format!("…{tail}")
}
