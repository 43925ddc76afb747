//! Descriptive statistics shared by every analysis stage
//!
//! One standard deviation convention holds crate-wide: the sample standard
//! deviation (divisor `n - 1`), which is NaN for a single observation.

use serde::Serialize;

/// Location/scale summary of a set of observations
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    /// Number of observations
    pub count: usize,
    /// Arithmetic mean (NaN when `count == 0`)
    pub mean: f64,
    /// Sample standard deviation (NaN when `count < 2`)
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

impl Summary {
    /// Summarize a slice of observations
    pub fn of(values: &[f64]) -> Self {
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Self {
            count: values.len(),
            mean: mean(values).unwrap_or(f64::NAN),
            std: sample_std(values).unwrap_or(f64::NAN),
            min: if values.is_empty() { f64::NAN } else { min },
            max: if values.is_empty() { f64::NAN } else { max },
        }
    }
}

/// Arithmetic mean, `None` for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (Bessel-corrected), `None` below two observations
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let mean = mean(values)?;
    let sum_sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    Some((sum_sq / (values.len() - 1) as f64).sqrt())
}
