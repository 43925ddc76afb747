// Positional pairing of baseline and enforce samples per function

use crate::catalog::ExperimentCatalog;
use crate::difference::fit::{fit_linear, TrendFit};
use crate::model::{Application, ExperimentRecord, Function, Mode};
use crate::stats;
use serde::Serialize;
use std::collections::BTreeMap;

/// Enforce-minus-baseline differences for one function
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DifferenceRecord {
    pub function: Function,
    /// Index of the function among the common functions, in domain order
    pub position: usize,
    /// `enforce[i] - baseline[i]`, truncated to the shorter sequence
    pub differences: Vec<f64>,
    pub mean_difference: f64,
    /// Sample std of `differences` (NaN for a single pair)
    pub std_difference: f64,
    pub baseline_len: usize,
    pub enforce_len: usize,
}

impl DifferenceRecord {
    pub fn is_truncated(&self) -> bool {
        self.baseline_len != self.enforce_len
    }
}

/// Per-function differences plus the trend over function positions
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DifferenceAnalysis {
    /// Ordered by function
    pub records: Vec<DifferenceRecord>,
    /// `None` when there are no common functions
    pub fit: Option<TrendFit>,
}

impl DifferenceAnalysis {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// (position, mean difference) points the trend was fitted on
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.records
            .iter()
            .map(|r| (r.position as f64, r.mean_difference))
            .collect()
    }
}

/// Pair baseline and enforce records by function and fit the trend
///
/// Functions present in only one mode are ignored. Functions whose paired
/// sequence would be empty are dropped with a warning, since their mean
/// difference is undefined. Duplicate records of one function pair through the
/// one with the smallest source path.
pub fn analyze<'a, B, E>(baseline: B, enforce: E) -> DifferenceAnalysis
where
    B: IntoIterator<Item = &'a ExperimentRecord>,
    E: IntoIterator<Item = &'a ExperimentRecord>,
{
    let baseline = index_by_function(baseline);
    let enforce = index_by_function(enforce);

    let mut records = Vec::new();
    for (function, base) in &baseline {
        let Some(enf) = enforce.get(function) else {
            continue;
        };

        let differences: Vec<f64> = enf
            .samples()
            .iter()
            .zip(base.samples())
            .map(|(e, b)| e - b)
            .collect();

        let Some(mean_difference) = stats::mean(&differences) else {
            tracing::warn!("No paired samples for {}, skipping", function);
            continue;
        };

        if base.samples().len() != enf.samples().len() {
            tracing::warn!(
                "Sample count differs for {} (baseline {}, enforce {}), pairing first {}",
                function,
                base.samples().len(),
                enf.samples().len(),
                differences.len()
            );
        }

        records.push(DifferenceRecord {
            function: *function,
            position: records.len(),
            std_difference: stats::sample_std(&differences).unwrap_or(f64::NAN),
            mean_difference,
            differences,
            baseline_len: base.samples().len(),
            enforce_len: enf.samples().len(),
        });
    }

    let mut analysis = DifferenceAnalysis { records, fit: None };
    analysis.fit = fit_linear(&analysis.points());
    analysis
}

/// Compare the baseline and enforce records of one application in a catalog
pub fn analyze_application(
    catalog: &ExperimentCatalog,
    application: Application,
) -> DifferenceAnalysis {
    analyze(
        catalog.select(application, Mode::Baseline),
        catalog.select(application, Mode::Enforce),
    )
}

/// One record per function; among duplicates the smallest source path wins,
/// whatever order the records arrive in
fn index_by_function<'a, I>(records: I) -> BTreeMap<Function, &'a ExperimentRecord>
where
    I: IntoIterator<Item = &'a ExperimentRecord>,
{
    let mut index: BTreeMap<Function, &'a ExperimentRecord> = BTreeMap::new();
    for record in records {
        let Some(kept) = index.get_mut(&record.function) else {
            index.insert(record.function, record);
            continue;
        };

        if record.source < kept.source {
            *kept = record;
        }
        tracing::warn!(
            "Duplicate {} {} records, pairing {}",
            record.function,
            record.mode,
            kept.source.display()
        );
    }
    index
}
