//! Loader code generation for explored files.
//!
//! Emits one loader statement per file that can be loaded (delimited plain
//! text with its inferred separator, or a spreadsheet for pandas) and saves
//! the result as plain text. Separators are written as escaped literals so
//! a tab never ends up as a raw whitespace byte in the generated source.

use crate::error::{AfesError, Result};
use crate::models::FileDescription;
use crate::separator::{DEFAULT_SEPARATOR, escaped_separator};
use clap::ValueEnum;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use tracing::{debug, info};

static NON_IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9_]+").expect("identifier pattern is valid"));

/// Language of the generated loader code
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum CodeTarget {
    /// Python with pandas (`pd.read_csv` / `pd.read_excel`)
    #[default]
    Pandas,
    /// Rust with polars (`CsvReadOptions`)
    Polars,
}

impl CodeTarget {
    fn preamble(self) -> &'static str {
        match self {
            CodeTarget::Pandas => "import pandas as pd\n",
            CodeTarget::Polars => "use polars::prelude::*;\n",
        }
    }
}

/// Variable name for a loaded table, e.g. `df_wine_quality`
pub fn variable_name(name: &str) -> String {
    let lowered = name.to_lowercase();
    let cleaned = NON_IDENTIFIER.replace_all(&lowered, "_");
    let trimmed = cleaned.trim_matches('_');

    if trimmed.is_empty() {
        "df".to_string()
    } else {
        format!("df_{}", trimmed)
    }
}

/// Escape a value for use inside a double-quoted string literal
pub fn escape_string_literal(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Loader code for a single file, or an empty string when it cannot be loaded
///
/// Plain files without rows get no loader. With `has_header` false the
/// loader reads the first line as data.
pub fn generate_code(
    description: &FileDescription,
    target: CodeTarget,
    has_header: bool,
) -> String {
    if description.is_plain() && !description.has_rows() {
        return String::new();
    }

    let variable = variable_name(&description.name);
    let path = escape_string_literal(&description.path.display().to_string());
    let separator = escaped_separator(
        description
            .separator
            .as_deref()
            .unwrap_or(DEFAULT_SEPARATOR),
    );

    match target {
        CodeTarget::Pandas if description.is_plain() => {
            let header = if has_header { "" } else { ", header=None" };
            format!("{variable} = pd.read_csv(\"{path}\", sep=\"{separator}\"{header})\n")
        }
        CodeTarget::Pandas if description.is_spreadsheet() => {
            let header = if has_header { "" } else { ", header=None" };
            format!("{variable} = pd.read_excel(\"{path}\"{header})\n")
        }
        CodeTarget::Polars if description.is_plain() => format!(
            "let {variable} = CsvReadOptions::default()\n    \
             .with_has_header({has_header})\n    \
             .map_parse_options(|opts| opts.with_separator(b'{separator}'))\n    \
             .try_into_reader_with_file_path(Some(\"{path}\".into()))?\n    \
             .finish()?;\n"
        ),
        _ => String::new(),
    }
}

/// Loader code for every loadable file, preceded by the target's import
pub fn generate_loader_code(
    descriptions: &[FileDescription],
    target: CodeTarget,
    has_header: bool,
) -> String {
    let snippets: Vec<String> = descriptions
        .iter()
        .map(|description| generate_code(description, target, has_header))
        .filter(|code| !code.is_empty())
        .collect();

    debug!(
        "Generated {} loaders for {} files",
        snippets.len(),
        descriptions.len()
    );

    let mut code = String::from(target.preamble());
    for snippet in snippets {
        code.push('\n');
        code.push_str(&snippet);
    }
    code
}

/// Generate loader code and save it to `output_file`
///
/// `has_header` must match how the files were explored. Returns the number of loaders written. With `verbose` the code is also
/// printed to stdout.
pub fn write_loader_code(
    descriptions: &[FileDescription],
    target: CodeTarget,
    has_header: bool,
    output_file: &Path,
    verbose: bool,
) -> Result<usize> {
    let loaders = descriptions
        .iter()
        .filter(|d| !generate_code(d, target, has_header).is_empty())
        .count();
    let code = generate_loader_code(descriptions, target, has_header);

    if let Some(parent) = output_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(output_file, &code).map_err(|e| {
        AfesError::report(
            output_file.display().to_string(),
            format!("failed to write loader code: {}", e),
        )
    })?;

    if verbose {
        println!("{}", code);
    }

    info!(
        "Saved {} loaders to {}",
        loaders,
        output_file.display()
    );
    Ok(loaders)
}
