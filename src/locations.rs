//! Loading origin and destination lists from plain-text files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{Result, TravelTimeError};

/// Trims a raw input line down to a location identifier.
///
/// Strips surrounding whitespace (including the line terminator) and then any
/// surrounding double quotes. Internal whitespace is kept; the request encoder
/// removes it later.
pub fn clean_line(line: &str) -> &str {
    line.trim().trim_matches('"')
}

/// Parses file contents into an ordered list of identifiers, dropping blanks.
pub fn parse_locations(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(clean_line)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

/// Reads a location list from `path`, one identifier per line.
///
/// # Errors
///
/// Returns [`TravelTimeError::Input`] if the file cannot be read.
pub fn load_locations(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| TravelTimeError::Input {
        path: path.to_path_buf(),
        source,
    })?;

    let locations = parse_locations(&contents);
    debug!(path = %path.display(), count = locations.len(), "Loaded locations");
    Ok(locations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_clean_line_strips_quotes_and_whitespace() {
        assert_eq!(clean_line("  \"SW1A 1AA\"  \n"), "SW1A 1AA");
        assert_eq!(clean_line("51.5,-0.12\r\n"), "51.5,-0.12");
        assert_eq!(clean_line("\"\""), "");
    }

    #[test]
    fn test_parse_locations_drops_blank_lines() {
        let contents = "A\n\n  \n\"B\"\nC\n\"\"\n";
        assert_eq!(parse_locations(contents), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_parse_locations_preserves_order() {
        let contents = "E1 6AN\nN1 9GU\nE1 6AN\n";
        assert_eq!(parse_locations(contents), vec!["E1 6AN", "N1 9GU", "E1 6AN"]);
    }

    #[test]
    fn test_load_locations_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "\"EC1A 1BB\"").unwrap();
        writeln!(file).unwrap();
        writeln!(file, " W1A 0AX ").unwrap();

        let locations = load_locations(file.path()).unwrap();
        assert_eq!(locations, vec!["EC1A 1BB", "W1A 0AX"]);
    }

    #[test]
    fn test_load_locations_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_locations(dir.path().join("missing.csv")).unwrap_err();
        assert!(matches!(err, TravelTimeError::Input { .. }));
    }
}
