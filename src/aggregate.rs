//! Grouped mean/standard-deviation summaries
//!
//! Keys with no members never appear in the output. All standard deviations
//! use the sample convention from [`crate::stats`].

use crate::model::{Application, ExperimentRecord, Function, Mode};
use crate::stats::Summary;
use serde::Serialize;
use std::collections::BTreeMap;

/// Summarize `N` numeric fields per group, one observation per member
pub fn aggregate<T, K, const N: usize, KF, VF>(
    members: &[T],
    key: KF,
    fields: VF,
) -> BTreeMap<K, [Summary; N]>
where
    K: Ord,
    KF: Fn(&T) -> K,
    VF: Fn(&T) -> [f64; N],
{
    let mut columns: BTreeMap<K, [Vec<f64>; N]> = BTreeMap::new();
    for member in members {
        let values = fields(member);
        let group = columns
            .entry(key(member))
            .or_insert_with(|| std::array::from_fn(|_| Vec::new()));
        for (column, value) in group.iter_mut().zip(values) {
            column.push(value);
        }
    }

    columns
        .into_iter()
        .map(|(k, group)| (k, group.map(|column| Summary::of(&column))))
        .collect()
}

/// Summarize the pooled latency samples of every record sharing a key
pub fn pool_samples<K, KF>(records: &[ExperimentRecord], key: KF) -> BTreeMap<K, Summary>
where
    K: Ord,
    KF: Fn(&ExperimentRecord) -> K,
{
    let mut pooled: BTreeMap<K, Vec<f64>> = BTreeMap::new();
    for record in records {
        pooled
            .entry(key(record))
            .or_default()
            .extend_from_slice(record.samples());
    }

    pooled
        .into_iter()
        .map(|(k, samples)| (k, Summary::of(&samples)))
        .collect()
}

/// Latency summary per (function, application, mode), in function order
pub fn latency_table(
    records: &[ExperimentRecord],
) -> BTreeMap<(Function, Application, Mode), Summary> {
    pool_samples(records, |r| (r.function, r.application, r.mode))
}

/// One row of a function × mode pivot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PivotRow {
    pub function: Function,
    /// Modes without records for this function are absent
    pub cells: BTreeMap<Mode, Summary>,
}

/// Function × mode latency pivot for one application, rows in function order
pub fn pivot_by_mode(records: &[ExperimentRecord], application: Application) -> Vec<PivotRow> {
    let mut rows: BTreeMap<Function, BTreeMap<Mode, Summary>> = BTreeMap::new();
    for ((function, app, mode), summary) in latency_table(records) {
        if app == application {
            rows.entry(function).or_default().insert(mode, summary);
        }
    }

    rows.into_iter()
        .map(|(function, cells)| PivotRow { function, cells })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ExperimentKey;
    use std::path::PathBuf;

    fn record(app: Application, function: Function, mode: Mode, samples: Vec<f64>) -> ExperimentRecord {
        ExperimentRecord::new(
            ExperimentKey {
                application: app,
                function,
                mode,
            },
            PathBuf::from("x.txt"),
            samples,
        )
    }

    #[test]
    fn test_aggregate_singleton_group() {
        let members = vec![("a", 4.5, 1.0)];
        let table = aggregate(&members, |m| m.0, |m| [m.1, m.2]);
        let [first, second] = table["a"];
        assert_eq!(first.mean, 4.5);
        assert!(first.std.is_nan());
        assert_eq!(second.mean, 1.0);
        assert_eq!(first.count, 1);
    }

    #[test]
    fn test_aggregate_groups_by_key() {
        let members = vec![("a", 1.0), ("b", 10.0), ("a", 3.0), ("b", 30.0)];
        let table = aggregate(&members, |m| m.0, |m| [m.1]);
        assert_eq!(table.len(), 2);
        assert_eq!(table["a"][0].mean, 2.0);
        assert_eq!(table["b"][0].mean, 20.0);
        assert!((table["a"][0].std - 2.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_aggregate_empty_input_has_no_keys() {
        let members: Vec<(&str, f64)> = Vec::new();
        assert!(aggregate(&members, |m| m.0, |m| [m.1]).is_empty());
    }

    #[test]
    fn test_pool_samples_concatenates_records() {
        let records = vec![
            record(Application::Refund, Function::Step(1), Mode::Baseline, vec![1.0, 2.0]),
            record(Application::Refund, Function::Step(1), Mode::Baseline, vec![3.0]),
            record(Application::Refund, Function::Step(1), Mode::Enforce, vec![9.0]),
        ];
        let table = pool_samples(&records, |r| r.mode);
        assert_eq!(table[&Mode::Baseline].count, 3);
        assert_eq!(table[&Mode::Baseline].mean, 2.0);
        assert_eq!(table[&Mode::Enforce].mean, 9.0);
    }

    #[test]
    fn test_pivot_rows_follow_function_order_and_skip_missing_modes() {
        let records = vec![
            record(Application::Valve, Function::Step(10), Mode::Baseline, vec![1.0, 1.0]),
            record(Application::Valve, Function::Step(9), Mode::Enforce, vec![2.0, 4.0]),
            record(Application::Valve, Function::Step(9), Mode::Baseline, vec![1.0, 3.0]),
            record(Application::Refund, Function::Step(1), Mode::Baseline, vec![5.0, 5.0]),
        ];
        let rows = pivot_by_mode(&records, Application::Valve);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].function, Function::Step(9));
        assert_eq!(rows[0].cells[&Mode::Enforce].mean, 3.0);
        assert_eq!(rows[1].function, Function::Step(10));
        assert!(!rows[1].cells.contains_key(&Mode::Enforce));
    }
}
