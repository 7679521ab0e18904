//! Field separator inference for delimited text files.
//!
//! Counts how often each candidate character appears on every line of a
//! sample, summarises those counts per candidate, and picks the candidate
//! that occurs on every line (mean above zero) with the most consistent
//! count (lowest standard deviation). A real separator shows up
//! `columns - 1` times on each well-formed row, so its count barely varies.
//!
//! Counting is a plain character frequency: quoted fields that contain the
//! separator are counted like any other occurrence.

use crate::error::{AfesError, Result};
use crate::metadata::read_lines;
use crate::stats::Summary;
use serde::Serialize;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

/// One candidate field separator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    /// The literal character
    pub character: char,
    /// Stable human-readable name
    pub name: &'static str,
    /// The character as it must be written inside a generated string literal
    pub escaped: &'static str,
}

/// Number of candidate separators
pub const CANDIDATE_COUNT: usize = 5;

/// The closed set of candidate separators, in tie-break order
pub static CANDIDATES: [Candidate; CANDIDATE_COUNT] = [
    Candidate {
        character: '\t',
        name: "tab",
        escaped: "\\t",
    },
    Candidate {
        character: ' ',
        name: "space",
        escaped: " ",
    },
    Candidate {
        character: ',',
        name: "comma",
        escaped: ",",
    },
    Candidate {
        character: ';',
        name: "semi_colon",
        escaped: ";",
    },
    Candidate {
        character: '|',
        name: "pipe",
        escaped: "|",
    },
];

/// Separator name callers fall back to when inference has no answer
pub const DEFAULT_SEPARATOR: &str = "comma";

/// Why a sample produced no separator
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InferenceError {
    #[error("no lines left to sample after removing the header")]
    EmptySample,

    #[error("none of the candidate separators occur in the sample")]
    NoCandidateFound,
}

/// Statistics of one candidate's per-line counts
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeparatorMeasures {
    pub name: &'static str,
    pub mean: f64,
    pub std: f64,
    pub var: f64,
    pub min: f64,
    pub max: f64,
    pub median: f64,
}

/// Outcome of separator detection on a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeparatorDetection {
    /// The chosen separator name (always one of the candidate names)
    pub name: &'static str,
    /// Set when inference failed and [`DEFAULT_SEPARATOR`] was used instead
    pub fallback: Option<InferenceError>,
}

impl SeparatorDetection {
    pub fn is_fallback(&self) -> bool {
        self.fallback.is_some()
    }
}

/// Number of times `character` occurs in `line`
pub fn count_character(line: &str, character: char) -> usize {
    line.chars().filter(|&c| c == character).count()
}

/// Per-line occurrence counts of every candidate, in candidate order
pub fn compute_counters<S: AsRef<str>>(lines: &[S]) -> Vec<[usize; CANDIDATE_COUNT]> {
    lines
        .iter()
        .map(|line| {
            let line = line.as_ref();
            CANDIDATES.map(|candidate| count_character(line, candidate.character))
        })
        .collect()
}

/// Summarise every candidate column of the counter matrix
pub fn compute_measures(
    counters: &[[usize; CANDIDATE_COUNT]],
) -> std::result::Result<Vec<SeparatorMeasures>, InferenceError> {
    CANDIDATES
        .iter()
        .enumerate()
        .map(|(index, candidate)| {
            let column: Vec<f64> = counters.iter().map(|row| row[index] as f64).collect();
            let summary = Summary::from_values(&column).ok_or(InferenceError::EmptySample)?;

            Ok(SeparatorMeasures {
                name: candidate.name,
                mean: summary.mean,
                std: summary.std,
                var: summary.var,
                min: summary.min,
                max: summary.max,
                median: summary.median,
            })
        })
        .collect()
}

/// Pick the candidate with mean above zero and the lowest standard deviation
///
/// Equal deviations keep candidate table order.
pub fn select_separator(
    measures: &[SeparatorMeasures],
) -> std::result::Result<&'static str, InferenceError> {
    let mut present: Vec<&SeparatorMeasures> = measures.iter().filter(|m| m.mean > 0.0).collect();
    present.sort_by(|a, b| a.std.total_cmp(&b.std));

    present
        .first()
        .map(|m| m.name)
        .ok_or(InferenceError::NoCandidateFound)
}

/// Infer the separator name of a sample of lines
///
/// With `has_header` the first line is dropped before counting.
pub fn infer_separator<S: AsRef<str>>(
    lines: &[S],
    has_header: bool,
) -> std::result::Result<&'static str, InferenceError> {
    let sample = if has_header {
        lines.get(1..).unwrap_or_default()
    } else {
        lines
    };

    if sample.is_empty() {
        return Err(InferenceError::EmptySample);
    }

    let counters = compute_counters(sample);
    let measures = compute_measures(&counters)?;

    for m in &measures {
        debug!(
            "{:>10}: mean={:.3} std={:.3} min={} max={} median={}",
            m.name, m.mean, m.std, m.min, m.max, m.median
        );
    }

    select_separator(&measures)
}

/// Infer the separator, recording whether [`DEFAULT_SEPARATOR`] had to be used
pub fn detect_separator<S: AsRef<str>>(lines: &[S], has_header: bool) -> SeparatorDetection {
    match infer_separator(lines, has_header) {
        Ok(name) => SeparatorDetection {
            name,
            fallback: None,
        },
        Err(reason) => SeparatorDetection {
            name: DEFAULT_SEPARATOR,
            fallback: Some(reason),
        },
    }
}

/// Infer the separator, falling back to [`DEFAULT_SEPARATOR`] on failure
pub fn infer_separator_or_default<S: AsRef<str>>(lines: &[S], has_header: bool) -> &'static str {
    let detection = detect_separator(lines, has_header);
    if let Some(reason) = detection.fallback {
        warn!("{}, using {}", reason, DEFAULT_SEPARATOR);
    }
    detection.name
}

/// Read a file and detect its separator, applying the comma fallback
pub fn detect_file_separator(path: &Path, has_header: bool) -> Result<SeparatorDetection> {
    let lines = read_lines(path)?;
    let detection = detect_separator(&lines, has_header);

    if let Some(reason) = detection.fallback {
        warn!(
            "{}: {}, using {}",
            path.display(),
            reason,
            DEFAULT_SEPARATOR
        );
    }

    Ok(detection)
}

/// Read a file and infer its separator without any fallback
pub fn infer_file_separator(path: &Path, has_header: bool) -> Result<&'static str> {
    let lines = read_lines(path)?;
    infer_separator(&lines, has_header).map_err(|source| AfesError::Inference {
        path: path.to_path_buf(),
        source,
    })
}

/// Look up a candidate by name
pub fn candidate(name: &str) -> Option<&'static Candidate> {
    CANDIDATES.iter().find(|c| c.name == name)
}

/// Literal character of a separator name; unknown names map to `,`
pub fn separator_char(name: &str) -> char {
    candidate(name).map_or(',', |c| c.character)
}

/// Name of a candidate character, if it is one
pub fn separator_name(character: char) -> Option<&'static str> {
    CANDIDATES
        .iter()
        .find(|c| c.character == character)
        .map(|c| c.name)
}

/// Separator as written inside generated source text; unknown names map to `,`
pub fn escaped_separator(name: &str) -> &'static str {
    candidate(name).map_or(",", |c| c.escaped)
}
