//! Analysis report: the tables and series handed to renderers
//!
//! A report is assembled once from the catalog and/or the invocation trace and
//! can then be emitted as text, JSON or CSV.

use crate::aggregate::{latency_table, pivot_by_mode, PivotRow};
use crate::catalog::ExperimentCatalog;
use crate::difference::{analyze_application, DifferenceAnalysis, TrendFit};
use crate::invocation::InvocationSummary;
use crate::model::{Application, Function, Mode};
use crate::stats::Summary;
use serde::Serialize;
use std::fmt::Write as _;

/// Applications shown as function × mode bar charts
pub const PIVOT_APPLICATIONS: [Application; 2] = [Application::Refund, Application::Valve];

/// Applications shown as difference point plots with a trend line
pub const TREND_APPLICATIONS: [Application; 2] =
    [Application::LongSequence, Application::LongParallel];

/// Latency summary of one (application, function, mode)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LatencyRow {
    pub application: Application,
    pub function: Function,
    pub mode: Mode,
    #[serde(flatten)]
    pub summary: Summary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplicationPivot {
    pub application: Application,
    pub rows: Vec<PivotRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplicationDifference {
    pub application: Application,
    #[serde(flatten)]
    pub analysis: DifferenceAnalysis,
}

/// Everything a rendering collaborator consumes
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnalysisReport {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub latencies: Vec<LatencyRow>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub pivots: Vec<ApplicationPivot>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub differences: Vec<ApplicationDifference>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub invocations: Vec<InvocationSummary>,
}

impl AnalysisReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add latency tables, per-application pivots and difference trends
    pub fn with_catalog(mut self, catalog: &ExperimentCatalog) -> Self {
        self.latencies = latency_table(catalog.records())
            .into_iter()
            .map(|((function, application, mode), summary)| LatencyRow {
                application,
                function,
                mode,
                summary,
            })
            .collect();

        self.pivots = PIVOT_APPLICATIONS
            .into_iter()
            .map(|application| ApplicationPivot {
                application,
                rows: pivot_by_mode(catalog.records(), application),
            })
            .filter(|pivot| !pivot.rows.is_empty())
            .collect();

        self.differences = TREND_APPLICATIONS
            .into_iter()
            .filter(|app| catalog.applications().contains(app))
            .map(|application| ApplicationDifference {
                application,
                analysis: analyze_application(catalog, application),
            })
            .collect();

        self
    }

    pub fn with_invocations(mut self, invocations: Vec<InvocationSummary>) -> Self {
        self.invocations = invocations;
        self
    }

    /// Human-readable tables
    pub fn to_text(&self) -> String {
        let mut out = String::new();

        if !self.latencies.is_empty() {
            out.push_str("==== SUMMARY OF LOADED LATENCY DATA ====\n\n");
            let _ = writeln!(
                out,
                "{:<15} {:<15} {:<9} {:>6} {:>12} {:>12}",
                "app", "function", "mode", "n", "mean (ms)", "std (ms)"
            );
            for row in &self.latencies {
                let _ = writeln!(
                    out,
                    "{:<15} {:<15} {:<9} {:>6} {:>12} {:>12}",
                    row.application.as_str(),
                    row.function.to_string(),
                    row.mode.as_str(),
                    row.summary.count,
                    fmt_value(row.summary.mean),
                    fmt_value(row.summary.std)
                );
            }
            out.push('\n');
        }

        for pivot in &self.pivots {
            let _ = writeln!(out, "=== Latency by mode: {} ===", pivot.application);
            let _ = writeln!(
                out,
                "{:<15} {:>24} {:>24}",
                "function",
                Mode::Baseline.as_str(),
                Mode::Enforce.as_str()
            );
            out.push_str("─────────────────────────────────────────────────────────────────\n");
            for row in &pivot.rows {
                let cell = |mode: Mode| {
                    row.cells
                        .get(&mode)
                        .map(|s| format!("{} ± {}", fmt_value(s.mean), fmt_value(s.std)))
                        .unwrap_or_default()
                };
                let _ = writeln!(
                    out,
                    "{:<15} {:>24} {:>24}",
                    row.function.to_string(),
                    cell(Mode::Baseline),
                    cell(Mode::Enforce)
                );
            }
            out.push('\n');
        }

        for diff in &self.differences {
            let _ = writeln!(out, "=== Difference summary for {} ===", diff.application);
            if diff.analysis.is_empty() {
                out.push_str("(no functions measured in both modes)\n\n");
                continue;
            }
            let _ = writeln!(
                out,
                "{:>8} {:<15} {:>6} {:>12} {:>12}",
                "position", "function", "n", "mean (ms)", "std (ms)"
            );
            for record in &diff.analysis.records {
                let _ = writeln!(
                    out,
                    "{:>8} {:<15} {:>6} {:>12} {:>12}",
                    record.position,
                    record.function.to_string(),
                    record.differences.len(),
                    fmt_value(record.mean_difference),
                    fmt_value(record.std_difference)
                );
            }
            match diff.analysis.fit {
                Some(TrendFit::Linear { slope, intercept }) => {
                    let _ = writeln!(out, "Trend: y = {:.4}x + {:.4}", slope, intercept);
                }
                Some(TrendFit::Degenerate { points }) => {
                    let _ = writeln!(out, "Trend: undefined ({} point)", points);
                }
                None => {}
            }
            out.push('\n');
        }

        if !self.invocations.is_empty() {
            out.push_str("===== FINAL RESULTS AFTER OUTLIER REMOVAL =====\n\n");
            let _ = writeln!(
                out,
                "{:<18} {:>6} {:>8} {:>22} {:>22}",
                "experiment", "kept", "dropped", "startup (s)", "finishing (s)"
            );
            for inv in &self.invocations {
                let _ = writeln!(
                    out,
                    "{:<18} {:>6} {:>8} {:>22} {:>22}",
                    inv.label.to_string(),
                    inv.retained,
                    inv.rejected,
                    format!("{} ± {}", fmt_value(inv.startup.mean), fmt_value(inv.startup.std)),
                    format!(
                        "{} ± {}",
                        fmt_value(inv.finishing.mean),
                        fmt_value(inv.finishing.std)
                    )
                );
            }
            out.push('\n');
        }

        out
    }
}

fn fmt_value(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else {
        format!("{:.4}", value)
    }
}
