//! Exploration engine.
//!
//! Discovers files under a path and describes every file with a supported
//! extension: size, human-readable size, and for delimited plain-text files
//! the row count and inferred field separator. Files are described
//! independently on blocking worker tasks; one unreadable file is logged and
//! counted without stopping the rest of the run.

pub mod discovery;

#[cfg(test)]
pub mod tests;

use self::discovery::FileDiscovery;

use crate::config::ExplorerConfig;
use crate::constants::{is_plain_format, is_supported_format};
use crate::error::{AfesError, Result};
use crate::metadata::{human_readable_size, read_lines};
use crate::models::{Exploration, ExplorationStats, FileDescription, dotted_extension, file_stem};
use crate::progress::create_progress_bar;
use crate::separator::{DEFAULT_SEPARATOR, InferenceError, detect_separator};

use futures::stream::{self, StreamExt};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio::task;
use tracing::{debug, error, info, warn};

/// What happened to a single discovered file
#[derive(Debug, Clone, PartialEq)]
pub enum FileOutcome {
    /// Supported file, with the inference failure if the comma fallback was used
    Described {
        description: FileDescription,
        fallback: Option<InferenceError>,
    },
    /// Extension not in the supported list
    Skipped,
}

/// Describe one file, or skip it when its extension is not supported
pub fn describe_file(path: &Path, has_header: bool) -> Result<FileOutcome> {
    let extension = dotted_extension(path);
    if !is_supported_format(&extension) {
        return Ok(FileOutcome::Skipped);
    }

    let size = fs::metadata(path)
        .map_err(|source| AfesError::FileRead {
            path: path.to_path_buf(),
            source,
        })?
        .len();

    let (rows, separator, fallback) = if is_plain_format(&extension) {
        let lines = read_lines(path)?;
        let detection = detect_separator(&lines, has_header);
        (
            Some(lines.len()),
            Some(detection.name.to_string()),
            detection.fallback,
        )
    } else {
        (None, None, None)
    };

    Ok(FileOutcome::Described {
        description: FileDescription {
            path: path.to_path_buf(),
            name: file_stem(path),
            extension,
            size,
            human_readable: human_readable_size(size as f64),
            rows,
            separator,
        },
        fallback,
    })
}

/// Explorer for a directory tree (or a single file)
#[derive(Debug)]
pub struct FileExplorer {
    root: PathBuf,
    config: ExplorerConfig,
    discovery: FileDiscovery,
}

impl FileExplorer {
    /// Create an explorer for an existing path
    pub fn new(root: PathBuf) -> Result<Self> {
        if !root.exists() {
            return Err(AfesError::PathNotFound { path: root });
        }

        Ok(Self {
            discovery: FileDiscovery::new(root.clone()),
            root,
            config: ExplorerConfig::default(),
        })
    }

    /// Configure the explorer
    pub fn with_config(mut self, config: ExplorerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    /// Discover and describe every file under the root
    pub async fn explore(&mut self) -> Result<Exploration> {
        let start_time = Instant::now();
        self.config.validate()?;

        info!("Exploring {}", self.root.display());
        let paths = self.discovery.discover_files()?;

        let mut stats = ExplorationStats {
            files_discovered: paths.len(),
            traversal_errors: self.discovery.traversal_errors(),
            ..Default::default()
        };

        let pb = create_progress_bar(
            paths.len() as u64,
            "Exploring files",
            self.config.show_progress,
        );
        let has_header = self.config.has_header;

        let outcomes: Vec<_> = stream::iter(paths)
            .map(move |path| {
                task::spawn_blocking(move || {
                    let outcome = describe_file(&path, has_header);
                    (path, outcome)
                })
            })
            .buffered(self.config.workers)
            .inspect(|_| pb.inc(1))
            .collect()
            .await;

        pb.finish_and_clear();

        let mut files = Vec::new();
        for joined in outcomes {
            match joined {
                Ok((path, Ok(FileOutcome::Described {
                    description,
                    fallback,
                }))) => {
                    if let Some(reason) = fallback {
                        warn!(
                            "{}: {}, using {}",
                            path.display(),
                            reason,
                            DEFAULT_SEPARATOR
                        );
                        stats.separator_fallbacks += 1;
                    }
                    debug!(
                        "Described {} ({}, {:?} rows, separator {:?})",
                        path.display(),
                        description.human_readable,
                        description.rows,
                        description.separator
                    );
                    stats.files_described += 1;
                    files.push(description);
                }
                Ok((path, Ok(FileOutcome::Skipped))) => {
                    debug!("Skipping unsupported file {}", path.display());
                    stats.files_skipped += 1;
                }
                Ok((path, Err(e))) => {
                    warn!("Failed to describe {}: {}", path.display(), e);
                    stats.files_failed += 1;
                }
                Err(e) => {
                    error!("File description task failed: {}", e);
                    stats.files_failed += 1;
                }
            }
        }

        if stats.traversal_errors > 0 {
            warn!(
                "Skipped {} unreadable entries under {}",
                stats.traversal_errors,
                self.root.display()
            );
        }

        stats.elapsed = start_time.elapsed();
        info!(
            "Explored {} files: {} described, {} skipped, {} failed",
            stats.files_discovered, stats.files_described, stats.files_skipped, stats.files_failed
        );

        Ok(Exploration { files, stats })
    }
}

/// Explore a path with the given configuration
pub async fn explore_files(path: &Path, config: ExplorerConfig) -> Result<Exploration> {
    FileExplorer::new(path.to_path_buf())?
        .with_config(config)
        .explore()
        .await
}
