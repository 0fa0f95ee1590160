//! Identifier lists: one page identifier per line.

use std::io::Write;
use std::path::Path;

use crate::error::OutputError;

/// Read an identifier list. Blank lines and `#` comments are skipped and
/// surrounding whitespace is trimmed; order is preserved.
pub fn read_identifiers(path: &Path) -> Result<Vec<String>, OutputError> {
    let contents = std::fs::read_to_string(path)?;
    Ok(parse_identifiers(&contents))
}

pub fn parse_identifiers(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Write one identifier per line, replacing the file.
pub fn write_identifiers(path: &Path, identifiers: &[String]) -> Result<(), OutputError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = std::io::BufWriter::new(std::fs::File::create(path)?);
    for id in identifiers {
        writeln!(file, "{id}")?;
    }
    file.flush()?;
    Ok(())
}
