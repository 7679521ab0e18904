//! Configuration for exploration and profiling runs.
//!
//! Defaults match the behaviour of the command line tool; the CLI layer
//! overrides individual settings through the `with_*` builders.

use crate::constants::{BIG_FILE, DEFAULT_INFER_SCHEMA_LENGTH};
use crate::error::{AfesError, Result};
use serde::{Deserialize, Serialize};

/// Global configuration for file exploration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplorerConfig {
    /// Treat the first line of plain files as a header (excluded from inference)
    pub has_header: bool,

    /// Number of files described concurrently
    pub workers: usize,

    /// Files larger than this (bytes) are profiled in minimal mode
    pub big_file_threshold: u64,

    /// Rows polars reads to infer column types when loading a table
    pub infer_schema_length: usize,

    /// Show progress bars on stderr
    pub show_progress: bool,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            has_header: true,
            workers: num_cpus::get().max(1),
            big_file_threshold: BIG_FILE,
            infer_schema_length: DEFAULT_INFER_SCHEMA_LENGTH,
            show_progress: true,
        }
    }
}

impl ExplorerConfig {
    /// Set whether plain files carry a header line
    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    /// Set the number of concurrent workers
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Set the minimal-profile size threshold
    pub fn with_big_file_threshold(mut self, bytes: u64) -> Self {
        self.big_file_threshold = bytes;
        self
    }

    /// Set the schema inference length used when loading tables
    pub fn with_infer_schema_length(mut self, rows: usize) -> Self {
        self.infer_schema_length = rows;
        self
    }

    /// Disable progress bars
    pub fn without_progress(mut self) -> Self {
        self.show_progress = false;
        self
    }

    /// Check the configuration for values the explorer cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(AfesError::configuration(
                "Number of workers must be greater than 0",
            ));
        }

        if self.workers > 256 {
            return Err(AfesError::configuration(
                "Number of workers cannot exceed 256",
            ));
        }

        if self.infer_schema_length == 0 {
            return Err(AfesError::configuration(
                "Schema inference length must be greater than 0",
            ));
        }

        Ok(())
    }
}
