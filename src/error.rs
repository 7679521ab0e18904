//! Error handling for file exploration operations.
//!
//! Provides error types with context for file discovery, separator
//! inference, table loading, and report generation failures.

use crate::separator::InferenceError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AfesError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Path not valid: {path}")]
    PathNotFound { path: PathBuf },

    #[error("Failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory traversal failed under {path}: {source}")]
    DirectoryTraversal {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Separator inference failed for file: {path} - {source}")]
    Inference {
        path: PathBuf,
        #[source]
        source: InferenceError,
    },

    #[error("Unsupported format '{extension}' for file: {path}")]
    UnsupportedFormat { path: PathBuf, extension: String },

    #[error("Report generation failed for {name}: {reason}")]
    Report { name: String, reason: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Processing interrupted: {reason}")]
    Interrupted { reason: String },
}

impl AfesError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a report error
    pub fn report(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Report {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create an interrupted error
    pub fn interrupted(reason: impl Into<String>) -> Self {
        Self::Interrupted {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AfesError>;
