//! Per-file metadata helpers.
//!
//! Reads file lines for separator inference and row counting, and formats
//! byte sizes for display.

use crate::constants::SIZE_UNITS;
use crate::error::{AfesError, Result};
use std::fs;
use std::path::Path;

/// Read every line of a file, without line terminators
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected.
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let bytes = fs::read(path).map_err(|source| AfesError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(String::from_utf8_lossy(&bytes)
        .lines()
        .map(str::to_string)
        .collect())
}

/// Format a byte count with binary units, e.g. `1.5 KiB`
pub fn human_readable_size(size: f64) -> String {
    let mut size = size;
    let mut unit_index = 0;

    while size.abs() >= 1024.0 && unit_index < SIZE_UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    format!("{:.1} {}", size, SIZE_UNITS[unit_index])
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_human_readable_size_units() {
        let expected = ["B", "KiB", "MiB", "GiB", "TiB", "PiB", "EiB", "ZiB"];
        assert_eq!(human_readable_size(1.0), "1.0 B");
        for (power, unit) in expected.iter().enumerate() {
            let size = 1024f64.powi(power as i32);
            assert_eq!(human_readable_size(size), format!("1.0 {}", unit));
        }
    }

    #[test]
    fn test_human_readable_size_fractions() {
        assert_eq!(human_readable_size(0.0), "0.0 B");
        assert_eq!(human_readable_size(1023.0), "1023.0 B");
        assert_eq!(human_readable_size(1536.0), "1.5 KiB");
        // Beyond the largest unit the value keeps growing in ZiB
        assert_eq!(human_readable_size(1024f64.powi(8)), "1024.0 ZiB");
    }

    #[test]
    fn test_read_lines_strips_terminators() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data.csv");
        fs::write(&path, "a,b\r\n1,2\n3,4").unwrap();

        let lines = read_lines(&path).unwrap();
        assert_eq!(lines, vec!["a,b", "1,2", "3,4"]);
    }

    #[test]
    fn test_read_lines_invalid_utf8() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("latin1.txt");
        fs::write(&path, b"caf\xe9;x\n1;2\n").unwrap();

        let lines = read_lines(&path).unwrap();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(";x"));
    }

    #[test]
    fn test_read_lines_counts_rows() {
        let temp_dir = TempDir::new().unwrap();

        let trailing = temp_dir.path().join("trailing.csv");
        fs::write(&trailing, "a\nb\nc\n").unwrap();
        assert_eq!(read_lines(&trailing).unwrap().len(), 3);

        let no_trailing = temp_dir.path().join("no_trailing.csv");
        fs::write(&no_trailing, "a\nb\nc").unwrap();
        assert_eq!(read_lines(&no_trailing).unwrap().len(), 3);

        let empty = temp_dir.path().join("empty.csv");
        fs::write(&empty, "").unwrap();
        assert!(read_lines(&empty).unwrap().is_empty());
    }

    #[test]
    fn test_read_lines_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.csv");

        match read_lines(&missing).unwrap_err() {
            AfesError::FileRead { path, .. } => assert_eq!(path, missing),
            other => panic!("Expected FileRead error, got {:?}", other),
        }
    }
}
