//! Descriptive statistics over numeric samples.
//!
//! Shared by separator inference (per-candidate counts) and table profiling
//! (numeric columns). Variance and standard deviation are population
//! statistics (divide by `n`, no Bessel correction).

use serde::{Deserialize, Serialize};

/// Summary statistics of a non-empty sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub var: f64,
    pub min: f64,
    pub max: f64,
    pub median: f64,
}

impl Summary {
    /// Summarise a sample, or `None` when there is nothing to summarise
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let count = values.len();
        let n = count as f64;
        let mean = values.iter().sum::<f64>() / n;
        let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let mid = count / 2;
        let median = if count % 2 == 0 {
            (sorted[mid - 1] + sorted[mid]) / 2.0
        } else {
            sorted[mid]
        };

        Some(Self {
            count,
            mean,
            std: var.sqrt(),
            var,
            min: sorted[0],
            max: sorted[count - 1],
            median,
        })
    }
}
