// Paired baseline/enforce comparison with a linear trend over function order
//
// For every function measured in both modes the enforce samples are paired
// positionally with the baseline samples and subtracted. One point per common
// function (position in the global function order, mean difference) feeds an
// ordinary least-squares line, which shows whether the enforcement overhead
// grows along the workflow.

mod analyzer;
mod fit;

pub use analyzer::{analyze, analyze_application, DifferenceAnalysis, DifferenceRecord};
pub use fit::{fit_linear, TrendFit};
