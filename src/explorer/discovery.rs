//! File discovery for exploration runs
//!
//! Collects every regular file under the explored path, recursively and in
//! a stable (name-sorted) order, following symbolic links. A single file path
//! is explored on its own. Entries that cannot be read (unreadable
//! directories, broken links) are logged and skipped.

use crate::error::{AfesError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Files found under a path
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveredFiles {
    pub files: Vec<PathBuf>,
    /// Entries skipped because they could not be read
    pub traversal_errors: usize,
}

/// File discovery component
#[derive(Debug)]
pub struct FileDiscovery {
    root: PathBuf,
    file_count: usize,
    traversal_errors: usize,
}

impl FileDiscovery {
    /// Create a new file discovery instance
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            file_count: 0,
            traversal_errors: 0,
        }
    }

    /// Number of files found by the last discovery
    pub fn file_count(&self) -> usize {
        self.file_count
    }

    /// Number of entries skipped by the last discovery
    pub fn traversal_errors(&self) -> usize {
        self.traversal_errors
    }

    /// Discover all regular files below the root
    ///
    /// ```text
    /// root/
    ///   iris.csv          -> found
    ///   nested/
    ///     wine.txt        -> found
    ///     deeper/
    ///       cars.dat      -> found
    /// ```
    pub fn discover_files(&mut self) -> Result<Vec<PathBuf>> {
        let discovered = get_files(&self.root)?;
        self.file_count = discovered.files.len();
        self.traversal_errors = discovered.traversal_errors;
        debug!(
            "Found {} files under {} ({} unreadable entries)",
            self.file_count,
            self.root.display(),
            self.traversal_errors
        );
        Ok(discovered.files)
    }
}

/// Every file under `path`, or `path` itself when it is a file
pub fn get_files(path: &Path) -> Result<DiscoveredFiles> {
    if path.is_file() {
        return Ok(DiscoveredFiles {
            files: vec![path.to_path_buf()],
            traversal_errors: 0,
        });
    }

    if !path.is_dir() {
        return Err(AfesError::PathNotFound {
            path: path.to_path_buf(),
        });
    }

    let mut discovered = DiscoveredFiles::default();
    for entry in WalkDir::new(path).follow_links(true).sort_by_file_name() {
        match entry {
            Ok(entry) if entry.file_type().is_file() => discovered.files.push(entry.into_path()),
            Ok(_) => {}
            Err(source) => {
                let error = AfesError::DirectoryTraversal {
                    path: source.path().unwrap_or(path).to_path_buf(),
                    source,
                };
                warn!("Skipping entry: {}", error);
                discovered.traversal_errors += 1;
            }
        }
    }

    Ok(discovered)
}
