//! Sample cardinality validation
//!
//! Every classified artifact must hold exactly the expected number of samples
//! unless its (application, function) pair is exempt. A mismatch means the
//! results tree is corrupted and aborts the run.

use crate::config::ExemptionRule;
use crate::error::{IngestError, Result};
use crate::model::{Application, ExperimentRecord, Function};
use std::collections::HashSet;

/// Explicit set of (application, function) pairs exempt from the cardinality rule
///
/// A `None` application exempts the function in every application.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExemptionSet {
    entries: HashSet<(Option<Application>, Function)>,
}

impl ExemptionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, application: Option<Application>, function: Function) {
        self.entries.insert((application, function));
    }

    pub fn contains(&self, application: Application, function: Function) -> bool {
        self.entries.contains(&(Some(application), function))
            || self.entries.contains(&(None, function))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> FromIterator<&'a ExemptionRule> for ExemptionSet {
    fn from_iter<I: IntoIterator<Item = &'a ExemptionRule>>(rules: I) -> Self {
        let mut set = Self::new();
        for rule in rules {
            set.insert(rule.application, rule.function);
        }
        set
    }
}

/// Enforces the expected sample count per record
#[derive(Debug, Clone)]
pub struct RecordValidator {
    expected_count: usize,
    exemptions: ExemptionSet,
}

impl RecordValidator {
    pub fn new(expected_count: usize, exemptions: ExemptionSet) -> Self {
        Self {
            expected_count,
            exemptions,
        }
    }

    pub fn expected_count(&self) -> usize {
        self.expected_count
    }

    /// Fail with [`IngestError::CardinalityMismatch`] on a non-exempt count mismatch
    pub fn validate(&self, record: &ExperimentRecord) -> Result<()> {
        let observed = record.samples().len();
        if observed == self.expected_count
            || self.exemptions.contains(record.application, record.function)
        {
            return Ok(());
        }

        Err(IngestError::CardinalityMismatch {
            path: record.source.clone(),
            observed,
            expected: self.expected_count,
        })
    }
}
