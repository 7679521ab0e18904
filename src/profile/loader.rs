//! Table loading with polars using the inferred separator.

use crate::config::ExplorerConfig;
use crate::error::{AfesError, Result};
use crate::models::FileDescription;
use crate::separator::{DEFAULT_SEPARATOR, separator_char};
use polars::prelude::*;
use tracing::debug;

/// Load a delimited plain-text file into a DataFrame
///
/// Only plain formats can be loaded; the separator falls back to comma when
/// the description carries none.
pub fn load_table(description: &FileDescription, config: &ExplorerConfig) -> Result<DataFrame> {
    if !description.is_plain() {
        return Err(AfesError::UnsupportedFormat {
            path: description.path.clone(),
            extension: description.extension.clone(),
        });
    }

    let name = description.separator.as_deref().unwrap_or(DEFAULT_SEPARATOR);
    let separator = u8::try_from(separator_char(name)).unwrap_or(b',');

    debug!(
        "Loading {} with separator {:?}",
        description.path.display(),
        separator as char
    );

    let df = CsvReadOptions::default()
        .with_has_header(config.has_header)
        .with_infer_schema_length(Some(config.infer_schema_length))
        .map_parse_options(|opts| opts.with_separator(separator))
        .try_into_reader_with_file_path(Some(description.path.clone()))?
        .finish()?;

    Ok(df)
}
