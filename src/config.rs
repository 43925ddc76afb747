// Analysis configuration
//
// Built-in defaults match the benchmark harness that produced the results
// tree. A TOML file can override any field; explicit CLI flags override the
// file.

use crate::model::{Application, Function};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Samples every non-exempt artifact must contain
pub const EXPECTED_ENTRIES: usize = 350;

/// File name suffix of latency artifacts
pub const ARTIFACT_SUFFIX: &str = "queue_proxy_logs.txt";

/// Default half-width of the outlier interval, in standard deviations (~99.7%)
pub const DEFAULT_Z_VALUE: f64 = 3.0;

/// Cardinality exemption for one function, optionally scoped to an application
///
/// # Example TOML
/// ```toml
/// [[exemptions]]
/// application = "valve"
/// function = "f2"
///
/// [[exemptions]]
/// function = "database-dummy"   # every application
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExemptionRule {
    /// Application the rule applies to (`None` = every application)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application: Option<Application>,
    pub function: Function,
}

/// Configuration for one analysis run
///
/// # Example
/// ```
/// use latdiff::config::AnalysisConfig;
///
/// let config = AnalysisConfig::default();
/// assert_eq!(config.expected_entries, 350);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Number of latency samples each artifact must contain
    pub expected_entries: usize,

    /// Only files ending with this suffix are treated as artifacts
    pub artifact_suffix: String,

    /// Outlier interval half-width: values outside `mean ± z·std` are dropped
    pub z_value: f64,

    /// Invocation-trace cycles with `test_id <= discard_first_n` are ignored
    pub discard_first_n: u64,

    /// (application, function) combinations allowed a different sample count
    pub exemptions: Vec<ExemptionRule>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            expected_entries: EXPECTED_ENTRIES,
            artifact_suffix: ARTIFACT_SUFFIX.to_string(),
            z_value: DEFAULT_Z_VALUE,
            discard_first_n: 0,
            exemptions: vec![
                ExemptionRule {
                    application: Some(Application::Valve),
                    function: Function::Step(2),
                },
                ExemptionRule {
                    application: Some(Application::Valve),
                    function: Function::Step(3),
                },
                ExemptionRule {
                    application: None,
                    function: Function::DatabaseDummy,
                },
            ],
        }
    }
}

impl AnalysisConfig {
    /// Load configuration from a TOML file; absent fields keep their defaults
    ///
    /// # Errors
    /// Returns error if the file can't be read, has invalid TOML syntax, or
    /// fails [`AnalysisConfig::validate`].
    pub fn from_toml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).with_context(|| {
            format!("Failed to read config file: {}", path.as_ref().display())
        })?;
        let config = Self::from_toml_str(&content).with_context(|| {
            format!("Invalid config file: {}", path.as_ref().display())
        })?;
        Ok(config)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse TOML")?;
        config.validate().map_err(anyhow::Error::msg)?;
        Ok(config)
    }

    /// Configuration shipped with the crate (`latdiff-default.toml`)
    pub fn embedded() -> Result<Self> {
        const DEFAULT_TOML: &str = include_str!("../latdiff-default.toml");
        Self::from_toml_str(DEFAULT_TOML).context("Failed to parse embedded latdiff-default.toml")
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.expected_entries == 0 {
            return Err("expected_entries must be >= 1, got 0".to_string());
        }

        if self.artifact_suffix.is_empty() {
            return Err("artifact_suffix must not be empty".to_string());
        }

        if !self.z_value.is_finite() || self.z_value <= 0.0 {
            return Err(format!(
                "z_value must be a positive finite number, got {}",
                self.z_value
            ));
        }

        Ok(())
    }
}
