//! AFES: automatic file exploration.
//!
//! A library for exploring directories of tabular data files:
//! - Discovering supported files and describing their size and row count
//! - Inferring the field separator of delimited plain-text files from
//!   per-line character count statistics
//! - Generating loader code (pandas or polars) for the explored files
//! - Writing statistical profile reports for every loadable table

pub mod codegen;
pub mod config;
pub mod constants;
pub mod error;
pub mod explorer;
pub mod metadata;
pub mod models;
pub mod profile;
pub mod progress;
pub mod separator;
pub mod stats;

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use codegen::{CodeTarget, generate_code, generate_loader_code, write_loader_code};
pub use config::ExplorerConfig;
pub use error::{AfesError, Result};
pub use explorer::{FileExplorer, explore_files};
pub use metadata::{human_readable_size, read_lines};
pub use models::{Exploration, ExplorationStats, FileDescription};
pub use profile::{ProfileSummary, ReportFormat, profile_files};
pub use separator::{
    DEFAULT_SEPARATOR, InferenceError, SeparatorDetection, detect_separator, infer_separator,
    separator_char,
};
