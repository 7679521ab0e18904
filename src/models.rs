//! Core data structures for file exploration.
//!
//! Defines the per-file description produced by the explorer and the
//! statistics reported at the end of a run.

use crate::constants::{is_plain_format, is_spreadsheet_format};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Metadata of one explored file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileDescription {
    pub path: PathBuf,
    /// File stem
    pub name: String,
    /// Lower-cased extension with its leading dot, e.g. `.csv`
    pub extension: String,
    /// Size in bytes
    pub size: u64,
    pub human_readable: String,
    /// Line count, for plain-text formats only
    pub rows: Option<usize>,
    /// Inferred separator name, for plain-text formats only
    pub separator: Option<String>,
}

impl FileDescription {
    pub fn is_plain(&self) -> bool {
        is_plain_format(&self.extension)
    }

    pub fn is_spreadsheet(&self) -> bool {
        is_spreadsheet_format(&self.extension)
    }

    /// True when the file has at least one counted row
    pub fn has_rows(&self) -> bool {
        self.rows.is_some_and(|rows| rows > 0)
    }
}

/// Lower-cased extension of a path with a leading dot, or empty
pub fn dotted_extension(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}

/// File stem of a path as a string
pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Statistics of one exploration run
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExplorationStats {
    /// Regular files found under the explored path
    pub files_discovered: usize,
    /// Files with a supported extension that were described
    pub files_described: usize,
    /// Files skipped because of their extension
    pub files_skipped: usize,
    /// Files that could not be read
    pub files_failed: usize,
    /// Directory entries skipped during discovery (unreadable, broken links)
    pub traversal_errors: usize,
    /// Plain files where the comma fallback was applied
    pub separator_fallbacks: usize,
    pub elapsed: Duration,
}

/// Result of exploring a path: described files in discovery order
#[derive(Debug, Clone, Default, Serialize)]
pub struct Exploration {
    pub files: Vec<FileDescription>,
    pub stats: ExplorationStats,
}

impl Exploration {
    /// Described files that are delimited plain text
    pub fn plain_files(&self) -> impl Iterator<Item = &FileDescription> {
        self.files.iter().filter(|f| f.is_plain())
    }
}
