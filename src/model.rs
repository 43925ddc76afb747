//! Experiment identity and record types
//!
//! Application, mode and function identities are closed domains. Function
//! identity carries the fixed total order used for sorting tables and for the
//! positional axis of the trend fit.

use crate::stats::Summary;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// A single latency observation in milliseconds
pub type Sample = f64;

/// Number of numbered workflow steps (`f1` ..= `f140`)
pub const MAX_STEP: u8 = 140;

/// Benchmarked workflow application
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Application {
    Refund,
    Valve,
    LongParallel,
    LongSequence,
}

impl Application {
    pub const ALL: [Application; 4] = [
        Application::Refund,
        Application::Valve,
        Application::LongParallel,
        Application::LongSequence,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Application::Refund => "refund",
            Application::Valve => "valve",
            Application::LongParallel => "long-parallel",
            Application::LongSequence => "long-sequence",
        }
    }
}

impl fmt::Display for Application {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Application {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Application::ALL
            .into_iter()
            .find(|app| app.as_str() == s)
            .ok_or_else(|| format!("unknown application '{}'", s))
    }
}

/// Experimental condition under comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    Baseline,
    Enforce,
}

impl Mode {
    pub const ALL: [Mode; 2] = [Mode::Baseline, Mode::Enforce];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Baseline => "baseline",
            Mode::Enforce => "enforce",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Workflow step identity
///
/// Ordering is `f1 < f2 < ... < f140 < database-dummy < result`; numbered steps
/// compare numerically, never lexically (`f9 < f10`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Function {
    /// Numbered step `f<n>`, `1 <= n <= MAX_STEP`
    Step(u8),
    DatabaseDummy,
    Result,
}

impl Function {
    /// Build a numbered step, rejecting numbers outside `1..=MAX_STEP`
    pub fn step(n: u8) -> Option<Self> {
        (1..=MAX_STEP).contains(&n).then_some(Function::Step(n))
    }

    /// Position of this function in the global order (0-based)
    ///
    /// `None` for a hand-built `Step` outside `1..=MAX_STEP`.
    pub fn ordinal(&self) -> Option<usize> {
        match self {
            Function::Step(n) if *n <= MAX_STEP => usize::from(*n).checked_sub(1),
            Function::Step(_) => None,
            Function::DatabaseDummy => Some(usize::from(MAX_STEP)),
            Function::Result => Some(usize::from(MAX_STEP) + 1),
        }
    }

    /// Every function identity, in domain order
    pub fn all() -> impl Iterator<Item = Function> {
        (1..=MAX_STEP)
            .map(Function::Step)
            .chain([Function::DatabaseDummy, Function::Result])
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Function::Step(n) => write!(f, "f{}", n),
            Function::DatabaseDummy => f.write_str("database-dummy"),
            Function::Result => f.write_str("result"),
        }
    }
}

impl FromStr for Function {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "database-dummy" => return Ok(Function::DatabaseDummy),
            "result" => return Ok(Function::Result),
            _ => {}
        }

        s.strip_prefix('f')
            .filter(|digits| !digits.is_empty() && !digits.starts_with('0'))
            .filter(|digits| digits.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|digits| digits.parse::<u8>().ok())
            .and_then(Function::step)
            .ok_or_else(|| format!("unknown function '{}'", s))
    }
}

impl TryFrom<String> for Function {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Function> for String {
    fn from(function: Function) -> Self {
        function.to_string()
    }
}

/// Identity of one artifact: which application, function and mode it measures
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ExperimentKey {
    pub application: Application,
    pub function: Function,
    pub mode: Mode,
}

/// Latency samples of one artifact plus their summary
///
/// Immutable after construction; `summary` always describes `samples`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExperimentRecord {
    pub application: Application,
    pub function: Function,
    pub mode: Mode,
    /// Artifact the samples were read from
    pub source: PathBuf,
    samples: Vec<Sample>,
    summary: Summary,
}

impl ExperimentRecord {
    pub fn new(key: ExperimentKey, source: PathBuf, samples: Vec<Sample>) -> Self {
        let summary = Summary::of(&samples);
        Self {
            application: key.application,
            function: key.function,
            mode: key.mode,
            source,
            samples,
            summary,
        }
    }

    pub fn key(&self) -> ExperimentKey {
        ExperimentKey {
            application: self.application,
            function: self.function,
            mode: self.mode,
        }
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    /// Arithmetic mean of the samples (NaN when there are none)
    pub fn mean(&self) -> f64 {
        self.summary.mean
    }

    /// Sample standard deviation (NaN for fewer than two samples)
    pub fn std(&self) -> f64 {
        self.summary.std
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_order_is_numeric() {
        let f9: Function = "f9".parse().unwrap();
        let f10: Function = "f10".parse().unwrap();
        assert!(f9 < f10);
        assert!(Function::Step(MAX_STEP) < Function::DatabaseDummy);
        assert!(Function::DatabaseDummy < Function::Result);
    }

    #[test]
    fn test_function_parse_rejects_outside_domain() {
        for name in ["f0", "f141", "f01", "f", "workflow", "entry-point", "F1", "f1a", "f300"] {
            assert!(name.parse::<Function>().is_err(), "{} should be rejected", name);
        }
    }

    #[test]
    fn test_function_display_roundtrip() {
        for function in Function::all() {
            let parsed: Function = function.to_string().parse().unwrap();
            assert_eq!(parsed, function);
        }
    }

    #[test]
    fn test_function_ordinals_follow_domain() {
        let ordinals: Vec<usize> = Function::all().filter_map(|f| f.ordinal()).collect();
        assert_eq!(ordinals.len(), usize::from(MAX_STEP) + 2);
        assert_eq!(ordinals[0], 0);
        assert!(ordinals.windows(2).all(|w| w[1] == w[0] + 1));
        assert_eq!(Function::Result.ordinal(), Some(141));
    }

    #[test]
    fn test_out_of_domain_step_has_no_ordinal() {
        assert_eq!(Function::Step(0).ordinal(), None);
        assert_eq!(Function::Step(MAX_STEP + 1).ordinal(), None);
        assert_eq!(Function::step(0), None);
        assert_eq!(Function::step(MAX_STEP + 1), None);
        assert_eq!(Function::Step(MAX_STEP).ordinal(), Some(139));
    }

    #[test]
    fn test_application_parse() {
        assert_eq!(
            "long-parallel".parse::<Application>().unwrap(),
            Application::LongParallel
        );
        assert!("unknown".parse::<Application>().is_err());
    }

    #[test]
    fn test_record_summary_matches_samples() {
        let key = ExperimentKey {
            application: Application::Refund,
            function: Function::Step(1),
            mode: Mode::Baseline,
        };
        let record = ExperimentRecord::new(key, PathBuf::from("a.txt"), vec![2.0, 4.0, 6.0]);
        assert_eq!(record.mean(), 4.0);
        assert_eq!(record.std(), 2.0);
        assert_eq!(record.key(), key);
    }

    #[test]
    fn test_function_serde_as_string() {
        let json = serde_json::to_string(&Function::DatabaseDummy).unwrap();
        assert_eq!(json, "\"database-dummy\"");
        let parsed: Function = serde_json::from_str("\"f42\"").unwrap();
        assert_eq!(parsed, Function::Step(42));
    }
}
