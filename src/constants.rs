//! Application constants for the file explorer
//!
//! File format lists, size units, thresholds and defaults used throughout
//! the crate.

// =============================================================================
// File Formats
// =============================================================================

/// Extensions the explorer lists; everything else is skipped
pub const SUPPORTED_FORMATS: &[&str] = &[
    ".txt", ".csv", ".tab", ".dat", ".json", ".arff", ".xml", ".xlsx",
];

/// Delimited plain-text formats: rows are counted and a separator inferred
pub const PLAIN_FORMATS: &[&str] = &[".txt", ".csv", ".tab", ".dat"];

/// Supported spreadsheet formats: listed with size only, loaded with `pd.read_excel`
pub const SPREADSHEET_FORMATS: &[&str] = &[".xlsx"];

// =============================================================================
// Sizes
// =============================================================================

/// Binary size units for human-readable file sizes
pub const SIZE_UNITS: &[&str] = &["B", "KiB", "MiB", "GiB", "TiB", "PiB", "EiB", "ZiB"];

/// Files above this size are profiled in minimal mode (100 MiB)
pub const BIG_FILE: u64 = 104_857_600;

// =============================================================================
// Defaults
// =============================================================================

/// Default file the loader code is written to
pub const DEFAULT_CODE_FILE: &str = "code.txt";

/// Default folder for profiling reports
pub const DEFAULT_REPORT_DIR: &str = ".";

/// Rows polars scans to infer column types while profiling
pub const DEFAULT_INFER_SCHEMA_LENGTH: usize = 1000;

/// Check whether an extension (with leading dot) is listed by the explorer
pub fn is_supported_format(extension: &str) -> bool {
    SUPPORTED_FORMATS.contains(&extension)
}

/// Check whether an extension (with leading dot) is a delimited text format
pub fn is_plain_format(extension: &str) -> bool {
    PLAIN_FORMATS.contains(&extension)
}

/// Check whether an extension (with leading dot) is a spreadsheet format
pub fn is_spreadsheet_format(extension: &str) -> bool {
    SPREADSHEET_FORMATS.contains(&extension)
}
