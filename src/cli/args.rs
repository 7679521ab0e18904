//! Command-line argument definitions for afes
//!
//! This module defines the CLI interface using the clap derive API.

use crate::codegen::CodeTarget;
use crate::config::ExplorerConfig;
use crate::constants::{DEFAULT_CODE_FILE, DEFAULT_REPORT_DIR};
use crate::error::{AfesError, Result};
use crate::profile::ReportFormat;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the file explorer
///
/// Explores directories of tabular data files, infers the field separator of
/// delimited text files, and generates loader code or profile reports.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "afes",
    version,
    about = "Explore tabular data files: sizes, rows and inferred separators",
    long_about = "Walks a directory (or a single file), describes every supported data file \
                  and infers the field separator of delimited plain-text files from how \
                  consistently each candidate character occurs per line. The results can be \
                  turned into ready-to-run loader code or per-table profile reports."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        global = true,
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Also hides progress bars.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Describe every supported file and infer separators
    Explore(ExploreArgs),
    /// Generate loader code for the explored files
    Generate(GenerateArgs),
    /// Write a profile report for every loadable table
    Profile(ProfileArgs),
}

/// Options shared by every subcommand
#[derive(Debug, Clone, clap::Args)]
pub struct InputArgs {
    /// Directory (or single file) to explore
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Plain files have no header line
    ///
    /// By default the first line of each file is a header and is left out of
    /// separator inference.
    #[arg(long = "no-header", help = "Treat the first line of plain files as data")]
    pub no_header: bool,

    /// Number of files described concurrently
    #[arg(
        short = 'j',
        long = "workers",
        value_name = "COUNT",
        help = "Number of parallel workers (default: number of CPUs)"
    )]
    pub workers: Option<usize>,
}

/// Arguments for the explore command
#[derive(Debug, Clone, clap::Args)]
pub struct ExploreArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Output format for the exploration results
    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        help = "Output format for results"
    )]
    pub output_format: OutputFormat,
}

/// Arguments for the generate command
#[derive(Debug, Clone, clap::Args)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// File the loader code is written to
    #[arg(
        short = 'o',
        long = "output-file",
        value_name = "FILE",
        default_value = DEFAULT_CODE_FILE,
        help = "File to write the generated code to"
    )]
    pub output_file: PathBuf,

    /// Language of the generated code
    #[arg(
        short = 't',
        long = "target",
        value_enum,
        default_value = "pandas",
        help = "Loader code flavour"
    )]
    pub target: CodeTarget,
}

/// Arguments for the profile command
#[derive(Debug, Clone, clap::Args)]
pub struct ProfileArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Directory the reports are written to
    #[arg(
        short = 'o',
        long = "output-path",
        value_name = "PATH",
        default_value = DEFAULT_REPORT_DIR,
        help = "Directory for the profile reports"
    )]
    pub output_path: PathBuf,

    /// Report format
    #[arg(
        long = "format",
        value_enum,
        default_value = "html",
        help = "Report format"
    )]
    pub format: ReportFormat,

    /// Size in bytes above which only a minimal profile is computed
    #[arg(
        long = "big-file-threshold",
        value_name = "BYTES",
        help = "Files larger than this get a minimal profile (default: 100 MiB)"
    )]
    pub big_file_threshold: Option<u64>,
}

/// Output format options for exploration results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Human,
    /// JSON format for scripting
    Json,
}

impl Args {
    /// Get the log level based on verbosity
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }

        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    /// Whether progress bars should be drawn
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

impl InputArgs {
    /// Validate the input arguments
    pub fn validate(&self) -> Result<()> {
        if !self.path.exists() {
            return Err(AfesError::PathNotFound {
                path: self.path.clone(),
            });
        }

        if self.workers == Some(0) {
            return Err(AfesError::configuration(
                "Number of workers must be greater than 0",
            ));
        }

        Ok(())
    }

    /// Build the explorer configuration from the arguments
    pub fn to_config(&self, show_progress: bool) -> ExplorerConfig {
        let mut config = ExplorerConfig::default().with_header(!self.no_header);
        if let Some(workers) = self.workers {
            config = config.with_workers(workers);
        }
        if !show_progress {
            config = config.without_progress();
        }
        config
    }
}

impl ProfileArgs {
    /// Build the configuration, including the profiling threshold
    pub fn to_config(&self, show_progress: bool) -> ExplorerConfig {
        let config = self.input.to_config(show_progress);
        match self.big_file_threshold {
            Some(bytes) => config.with_big_file_threshold(bytes),
            None => config,
        }
    }
}
