//! Invocation trace analysis: workflow startup and finishing durations
//!
//! The trace is a headerless CSV with one row per benchmark cycle:
//! `experiment,test_id,start_start,start_end,finish_start,finish_end`
//! (timestamps in milliseconds). Startup and finishing durations are
//! correlated, so outliers are rejected jointly per experiment before
//! summarizing.

use crate::aggregate::aggregate;
use crate::error::{IngestError, Result};
use crate::outlier::filter_by_key;
use crate::stats::Summary;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Read;
use std::path::Path;

/// Experiment condition of an invocation-trace row
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperimentLabel {
    Baseline,
    SimpleWorkflow,
    ComplexWorkflow,
}

impl ExperimentLabel {
    /// Map the raw `experiment` column; unknown experiments map to `None`
    pub fn from_experiment(name: &str) -> Option<Self> {
        match name {
            "baseline" => Some(ExperimentLabel::Baseline),
            "enforcer-simple" => Some(ExperimentLabel::SimpleWorkflow),
            "enforcer-complex" => Some(ExperimentLabel::ComplexWorkflow),
            _ => None,
        }
    }
}

impl fmt::Display for ExperimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ExperimentLabel::Baseline => "Baseline",
            ExperimentLabel::SimpleWorkflow => "Simple Workflow",
            ExperimentLabel::ComplexWorkflow => "Complex Workflow",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Deserialize)]
struct TraceRow {
    experiment: String,
    test_id: u64,
    start_start: f64,
    start_end: f64,
    finish_start: f64,
    finish_end: f64,
}

/// Durations of one benchmark cycle, in seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InvocationSample {
    pub label: ExperimentLabel,
    pub test_id: u64,
    pub startup: f64,
    pub finishing: f64,
}

/// Outlier-filtered startup/finishing summary of one experiment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvocationSummary {
    pub label: ExperimentLabel,
    pub retained: usize,
    pub rejected: usize,
    pub startup: Summary,
    pub finishing: Summary,
}

/// Read a trace file, dropping cycles with `test_id <= discard_first_n`
pub fn load_trace(path: &Path, discard_first_n: u64) -> Result<Vec<InvocationSample>> {
    let file = std::fs::File::open(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_trace_from(file, path, discard_first_n)
}

/// Read trace rows from any reader; `path` is only used in error reports
pub fn load_trace_from<R: Read>(
    reader: R,
    path: &Path,
    discard_first_n: u64,
) -> Result<Vec<InvocationSample>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut samples = Vec::new();
    for row in csv_reader.deserialize::<TraceRow>() {
        let row = row.map_err(|source| IngestError::Trace {
            path: path.to_path_buf(),
            source,
        })?;

        if row.test_id <= discard_first_n {
            continue;
        }
        let Some(label) = ExperimentLabel::from_experiment(&row.experiment) else {
            tracing::debug!("Skipping trace row for unknown experiment '{}'", row.experiment);
            continue;
        };

        samples.push(InvocationSample {
            label,
            test_id: row.test_id,
            startup: (row.start_end - row.start_start) / 1000.0,
            finishing: (row.finish_end - row.finish_start) / 1000.0,
        });
    }

    tracing::info!("Loaded {} invocation cycles from {}", samples.len(), path.display());
    Ok(samples)
}

/// Per-experiment joint outlier filtering, then mean/std of both durations
///
/// Experiments with no cycle left after filtering (including single-cycle
/// experiments, whose interval is undefined) are absent; order is Baseline,
/// Simple, Complex.
pub fn summarize(samples: &[InvocationSample], z: f64) -> Vec<InvocationSummary> {
    let filtered = filter_by_key(samples, z, |s| s.label, |s| [s.startup, s.finishing]);

    filtered
        .into_iter()
        .flat_map(|(label, group)| {
            let table = aggregate(&group.retained, |s| s.label, |s| [s.startup, s.finishing]);
            let rejected = group.rejected;
            let retained = group.retained.len();
            table
                .into_iter()
                .map(move |(_, [startup, finishing])| InvocationSummary {
                    label,
                    retained,
                    rejected,
                    startup,
                    finishing,
                })
        })
        .collect()
}
