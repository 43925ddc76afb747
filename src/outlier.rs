//! Confidence-interval outlier rejection over correlated metrics
//!
//! Each tracked metric gets its own `mean ± z·std` interval over the group; a
//! member survives only if every one of its metrics lies inside the matching
//! interval (bounds inclusive). Groups with distinct keys are filtered
//! independently, never pooled.

use crate::stats;
use serde::Serialize;
use std::collections::BTreeMap;

/// Acceptance interval for one metric of one group
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricInterval {
    pub mean: f64,
    pub std: f64,
    pub low: f64,
    pub high: f64,
}

impl MetricInterval {
    /// Interval over `values`; `None` below two observations (std undefined)
    pub fn of(values: &[f64], z: f64) -> Option<Self> {
        let mean = stats::mean(values)?;
        let std = stats::sample_std(values)?;
        Some(Self {
            mean,
            std,
            low: mean - z * std,
            high: mean + z * std,
        })
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.low && value <= self.high
    }
}

/// Members of one group that passed joint filtering
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredGroup<T, const N: usize> {
    pub retained: Vec<T>,
    /// Interval per metric; `None` when the group is too small to estimate one
    /// (every member is then rejected)
    pub intervals: Option<[MetricInterval; N]>,
    pub rejected: usize,
}

/// Keep the members of `group` whose `N` metrics all lie within their intervals
///
/// Groups with fewer than two members have no defined spread, so no member can
/// lie inside an interval and the whole group is rejected.
///
/// # Example
/// ```
/// use latdiff::outlier::filter_joint;
///
/// let group = vec![[1.0, 1.0], [1.0, 1.0], [1.0, 1.0], [1.0, 50.0]];
/// let filtered = filter_joint(&group, 1.0, |m| *m);
/// assert_eq!(filtered.retained.len(), 3);
/// ```
pub fn filter_joint<T, const N: usize, F>(group: &[T], z: f64, metrics: F) -> FilteredGroup<T, N>
where
    T: Clone,
    F: Fn(&T) -> [f64; N],
{
    let values: Vec<[f64; N]> = group.iter().map(&metrics).collect();

    let mut intervals = Vec::with_capacity(N);
    for metric in 0..N {
        let column: Vec<f64> = values.iter().map(|row| row[metric]).collect();
        match MetricInterval::of(&column, z) {
            Some(interval) => intervals.push(interval),
            None => {
                // No interval contains anything when std is undefined
                if !group.is_empty() {
                    tracing::warn!(
                        "Outlier interval undefined for a group of {}, rejecting it",
                        group.len()
                    );
                }
                return FilteredGroup {
                    retained: Vec::new(),
                    intervals: None,
                    rejected: group.len(),
                };
            }
        }
    }
    let intervals: [MetricInterval; N] = std::array::from_fn(|i| intervals[i]);

    let retained: Vec<T> = group
        .iter()
        .zip(&values)
        .filter(|(_, row)| {
            row.iter()
                .zip(&intervals)
                .all(|(value, interval)| interval.contains(*value))
        })
        .map(|(member, _)| member.clone())
        .collect();

    let rejected = group.len() - retained.len();
    if retained.is_empty() && !group.is_empty() {
        tracing::warn!("Outlier filtering rejected all {} group members", group.len());
    }

    FilteredGroup {
        retained,
        intervals: Some(intervals),
        rejected,
    }
}

/// Partition `members` by `key` and filter every partition on its own
pub fn filter_by_key<T, K, const N: usize, KF, MF>(
    members: &[T],
    z: f64,
    key: KF,
    metrics: MF,
) -> BTreeMap<K, FilteredGroup<T, N>>
where
    T: Clone,
    K: Ord,
    KF: Fn(&T) -> K,
    MF: Fn(&T) -> [f64; N],
{
    let mut groups: BTreeMap<K, Vec<T>> = BTreeMap::new();
    for member in members {
        groups.entry(key(member)).or_default().push(member.clone());
    }

    groups
        .into_iter()
        .map(|(k, group)| {
            let filtered = filter_joint(&group, z, &metrics);
            (k, filtered)
        })
        .collect()
}
