//! Name list input for batch lookups.

use std::fs;
use std::io;
use std::path::Path;

/// Parse a name list: one name per line, blank lines and `#` comments
/// ignored, surrounding whitespace trimmed.
pub fn parse_names(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Read a name list file.
pub fn read_names(path: &Path) -> io::Result<Vec<String>> {
    fs::read_to_string(path).map(|text| parse_names(&text))
}

/// Names given on the command line followed by names from an optional file.
pub fn collect_names(inline: &[String], file: Option<&Path>) -> io::Result<Vec<String>> {
    let mut names: Vec<String> = inline
        .iter()
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect();
    if let Some(path) = file {
        names.extend(read_names(path)?);
    }
    Ok(names)
}
