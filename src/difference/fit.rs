// Ordinary least-squares line fit
//
// Fewer than two points (or no spread in x) give no slope; that outcome is a
// value callers must check, not an error.

use serde::Serialize;

/// Linear trend `y ≈ slope·x + intercept`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TrendFit {
    Linear { slope: f64, intercept: f64 },
    /// Not enough distinct x positions to determine a line
    Degenerate { points: usize },
}

impl TrendFit {
    /// Fitted value at `x`, `None` for a degenerate fit
    pub fn predict(&self, x: f64) -> Option<f64> {
        match self {
            TrendFit::Linear { slope, intercept } => Some(slope * x + intercept),
            TrendFit::Degenerate { .. } => None,
        }
    }

    pub fn coefficients(&self) -> Option<(f64, f64)> {
        match self {
            TrendFit::Linear { slope, intercept } => Some((*slope, *intercept)),
            TrendFit::Degenerate { .. } => None,
        }
    }
}

/// Fit `y = a·x + b` by least squares; `None` for an empty point set
///
/// # Example
/// ```
/// use latdiff::difference::{fit_linear, TrendFit};
///
/// let fit = fit_linear(&[(0.0, 1.0), (1.0, 2.0), (2.0, 3.0)]).unwrap();
/// assert_eq!(fit, TrendFit::Linear { slope: 1.0, intercept: 1.0 });
/// ```
pub fn fit_linear(points: &[(f64, f64)]) -> Option<TrendFit> {
    if points.is_empty() {
        return None;
    }

    let n = points.len() as f64;
    let x_mean = points.iter().map(|(x, _)| x).sum::<f64>() / n;
    let y_mean = points.iter().map(|(_, y)| y).sum::<f64>() / n;

    let (sxx, sxy) = points.iter().fold((0.0, 0.0), |(sxx, sxy), (x, y)| {
        let dx = x - x_mean;
        (sxx + dx * dx, sxy + dx * (y - y_mean))
    });

    if points.len() < 2 || sxx == 0.0 {
        return Some(TrendFit::Degenerate {
            points: points.len(),
        });
    }

    let slope = sxy / sxx;
    Some(TrendFit::Linear {
        slope,
        intercept: y_mean - slope * x_mean,
    })
}
