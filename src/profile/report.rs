//! Statistical profiles of loaded tables and their report renderings.

use crate::error::{AfesError, Result};
use crate::stats::Summary;
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use polars::prelude::{Column, DataFrame, DataType, Series};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write as _};
use std::path::{Path, PathBuf};

/// Report output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum ReportFormat {
    /// Standalone HTML page
    #[default]
    Html,
    /// Pretty-printed JSON document
    Json,
}

impl ReportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ReportFormat::Html => "html",
            ReportFormat::Json => "json",
        }
    }

    /// Report file name for a table, e.g. `iris_profile.html`
    pub fn file_name(self, table_name: &str) -> String {
        format!("{}_profile.{}", table_name, self.extension())
    }
}

/// Profile of a single column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnProfile {
    pub name: String,
    pub dtype: String,
    /// Non-null values
    pub count: usize,
    pub null_count: usize,
    /// Distinct values; not computed in minimal mode
    pub n_unique: Option<usize>,
    /// Descriptive statistics, numeric columns only
    pub summary: Option<Summary>,
}

/// Profile of a whole table
#[derive(Debug, Clone, Serialize)]
pub struct TableProfile {
    pub name: String,
    pub source: PathBuf,
    pub rows: usize,
    pub columns: usize,
    /// Minimal profiles skip distinct-value counts
    pub minimal: bool,
    pub generated_at: DateTime<Utc>,
    pub column_profiles: Vec<ColumnProfile>,
}

fn is_numeric(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Descriptive statistics of a numeric series, `None` when every value is null
fn numeric_summary(series: &Series) -> Result<Option<Summary>> {
    let values = series.cast(&DataType::Float64)?;
    let count = values.len() - values.null_count();
    if count == 0 {
        return Ok(None);
    }

    let summary = match (
        values.mean(),
        values.std(0),
        values.var(0),
        values.min::<f64>()?,
        values.max::<f64>()?,
        values.median(),
    ) {
        (Some(mean), Some(std), Some(var), Some(min), Some(max), Some(median)) => Some(Summary {
            count,
            mean,
            std,
            var,
            min,
            max,
            median,
        }),
        _ => None,
    };

    Ok(summary)
}

fn profile_column(column: &Column, minimal: bool) -> Result<ColumnProfile> {
    let null_count = column.null_count();

    let n_unique = if minimal {
        None
    } else {
        Some(column.n_unique()?)
    };

    let summary = if is_numeric(column.dtype()) {
        numeric_summary(column.as_materialized_series())?
    } else {
        None
    };

    Ok(ColumnProfile {
        name: column.name().to_string(),
        dtype: column.dtype().to_string(),
        count: column.len() - null_count,
        null_count,
        n_unique,
        summary,
    })
}

/// Profile every column of a table
pub fn profile_table(
    name: &str,
    source: &Path,
    df: &DataFrame,
    minimal: bool,
) -> Result<TableProfile> {
    let column_profiles = df
        .get_columns()
        .iter()
        .map(|column| profile_column(column, minimal))
        .collect::<Result<Vec<_>>>()?;

    Ok(TableProfile {
        name: name.to_string(),
        source: source.to_path_buf(),
        rows: df.height(),
        columns: df.width(),
        minimal,
        generated_at: Utc::now(),
        column_profiles,
    })
}

/// Render a profile in the requested format
pub fn render(profile: &TableProfile, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Html => render_html(profile),
        ReportFormat::Json => serde_json::to_string_pretty(profile)
            .map_err(|e| AfesError::report(&profile.name, e.to_string())),
    }
}

fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn format_stat(value: Option<f64>) -> String {
    value.map_or_else(String::new, |v| format!("{:.4}", v))
}

/// Render a profile as a standalone HTML page
pub fn render_html(profile: &TableProfile) -> Result<String> {
    let mut html = String::new();
    write_html(&mut html, profile).map_err(|e| AfesError::report(&profile.name, e.to_string()))?;
    Ok(html)
}

fn write_html(html: &mut String, profile: &TableProfile) -> fmt::Result {
    let title = escape_html(&profile.name);

    writeln!(html, "<!DOCTYPE html>")?;
    writeln!(html, "<html><head><meta charset=\"utf-8\">")?;
    writeln!(html, "<title>{} profile</title>", title)?;
    writeln!(
        html,
        "<style>body{{font-family:sans-serif}}table{{border-collapse:collapse}}\
         td,th{{border:1px solid #ccc;padding:4px 8px;text-align:right}}\
         td:first-child,th:first-child{{text-align:left}}</style>"
    )?;
    writeln!(html, "</head><body>")?;
    writeln!(html, "<h1>{}</h1>", title)?;
    writeln!(
        html,
        "<p>Source: <code>{}</code><br>{} rows &times; {} columns{}<br>Generated {}</p>",
        escape_html(&profile.source.display().to_string()),
        profile.rows,
        profile.columns,
        if profile.minimal { " (minimal)" } else { "" },
        profile.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    )?;

    writeln!(
        html,
        "<table><tr><th>column</th><th>type</th><th>count</th><th>missing</th>\
         <th>distinct</th><th>mean</th><th>std</th><th>min</th><th>median</th><th>max</th></tr>"
    )?;
    for column in &profile.column_profiles {
        let summary = column.summary.as_ref();
        writeln!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td>\
             <td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape_html(&column.name),
            escape_html(&column.dtype),
            column.count,
            column.null_count,
            column.n_unique.map_or_else(String::new, |n| n.to_string()),
            format_stat(summary.map(|s| s.mean)),
            format_stat(summary.map(|s| s.std)),
            format_stat(summary.map(|s| s.min)),
            format_stat(summary.map(|s| s.median)),
            format_stat(summary.map(|s| s.max)),
        )?;
    }
    writeln!(html, "</table>")?;
    writeln!(html, "</body></html>")?;

    Ok(())
}
