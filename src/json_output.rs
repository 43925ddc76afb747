//! JSON output format for analysis reports
//!
//! Non-finite statistics (e.g. the std of a single sample) serialize as `null`.

use crate::report::AnalysisReport;
use anyhow::{Context, Result};

/// Pretty-printed JSON document of the whole report
pub fn to_json(report: &AnalysisReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("Failed to serialize report to JSON")
}
