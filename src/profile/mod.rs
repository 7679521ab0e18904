//! Table profiling.
//!
//! Loads every explored plain-text table with its inferred separator and
//! writes one statistical profile report per file. Files are profiled
//! smallest first; files above the big-file threshold get a minimal profile.
//! A file that fails to load or profile is logged and the run continues.

pub mod loader;
pub mod report;

pub use loader::load_table;
pub use report::{ColumnProfile, ReportFormat, TableProfile, profile_table, render};

use crate::config::ExplorerConfig;
use crate::error::Result;
use crate::models::FileDescription;
use crate::progress::create_progress_bar;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// Outcome of a profiling run
#[derive(Debug, Clone, Default)]
pub struct ProfileSummary {
    /// Report files written, in profiling order
    pub reports: Vec<PathBuf>,
    /// Files without rows or not in a loadable format
    pub files_skipped: usize,
    pub files_failed: usize,
}

/// Load, profile and write a report for one table
pub fn profile_file(
    description: &FileDescription,
    report_path: &Path,
    format: ReportFormat,
    config: &ExplorerConfig,
) -> Result<TableProfile> {
    let df = load_table(description, config)?;
    let minimal = description.size > config.big_file_threshold;
    let profile = profile_table(&description.name, &description.path, &df, minimal)?;

    fs::write(report_path, render(&profile, format)?)?;
    Ok(profile)
}

/// Profile every loadable file and write reports into `output_dir`
pub fn profile_files(
    descriptions: &[FileDescription],
    output_dir: &Path,
    format: ReportFormat,
    config: &ExplorerConfig,
) -> Result<ProfileSummary> {
    fs::create_dir_all(output_dir)?;

    let mut ordered: Vec<&FileDescription> = descriptions.iter().collect();
    ordered.sort_by_key(|d| d.size);

    info!(
        "Profiling {} files, reports in {}",
        ordered.len(),
        output_dir.display()
    );

    let pb = create_progress_bar(ordered.len() as u64, "Profiling", config.show_progress);
    let mut summary = ProfileSummary::default();
    let mut used_names: HashMap<String, usize> = HashMap::new();

    for description in ordered {
        pb.inc(1);

        if !description.is_plain() || !description.has_rows() {
            debug!("Skipping {}: nothing to profile", description.path.display());
            summary.files_skipped += 1;
            continue;
        }

        pb.set_message(format!(
            "Profiling {} ({} records)",
            description.name,
            description.rows.unwrap_or_default()
        ));

        let report_name = unique_name(&mut used_names, &description.name);
        let report_path = output_dir.join(format.file_name(&report_name));

        match profile_file(description, &report_path, format, config) {
            Ok(profile) => {
                debug!(
                    "Profiled {}: {} rows x {} columns",
                    description.name, profile.rows, profile.columns
                );
                summary.reports.push(report_path);
            }
            Err(e) => {
                error!("Error profiling {}: {}", description.path.display(), e);
                summary.files_failed += 1;
            }
        }
    }

    pb.finish_and_clear();
    info!(
        "Wrote {} reports ({} skipped, {} failed)",
        summary.reports.len(),
        summary.files_skipped,
        summary.files_failed
    );

    Ok(summary)
}

/// `name`, or `name_2`, `name_3`, ... when it was already used in this run
fn unique_name(used: &mut HashMap<String, usize>, name: &str) -> String {
    let seen = used.entry(name.to_string()).or_insert(0);
    *seen += 1;
    if *seen == 1 {
        name.to_string()
    } else {
        format!("{}_{}", name, seen)
    }
}
