//! CSV output format for analysis reports
//!
//! Long format, one statistic per row, so every table of the report fits a
//! single header:
//!
//! `kind,group,function,mode,metric,count,mean,std`
//!
//! - `latency`: group = application, metric = `latency_ms`
//! - `difference`: group = application, metric = `difference_ms`,
//!   `count` = paired samples
//! - `trend`: group = application, metric = `slope` / `intercept` in `mean`
//! - `invocation`: group = experiment label, metric = `startup_s` / `finishing_s`

use crate::difference::TrendFit;
use crate::report::AnalysisReport;
use crate::stats::Summary;
use anyhow::{Context, Result};
use serde::Serialize;

/// One CSV row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CsvRow {
    pub kind: &'static str,
    pub group: String,
    pub function: String,
    pub mode: String,
    pub metric: &'static str,
    pub count: Option<usize>,
    pub mean: Option<f64>,
    pub std: Option<f64>,
}

impl CsvRow {
    fn summary(kind: &'static str, group: String, metric: &'static str, summary: &Summary) -> Self {
        Self {
            kind,
            group,
            function: String::new(),
            mode: String::new(),
            metric,
            count: Some(summary.count),
            mean: finite(summary.mean),
            std: finite(summary.std),
        }
    }
}

/// CSV output formatter
#[derive(Debug, Default)]
pub struct CsvOutput {
    rows: Vec<CsvRow>,
}

impl CsvOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flatten every section of a report into rows
    pub fn from_report(report: &AnalysisReport) -> Self {
        let mut output = Self::new();

        for row in &report.latencies {
            let mut csv = CsvRow::summary(
                "latency",
                row.application.to_string(),
                "latency_ms",
                &row.summary,
            );
            csv.function = row.function.to_string();
            csv.mode = row.mode.to_string();
            output.add_row(csv);
        }

        for diff in &report.differences {
            let group = diff.application.to_string();
            for record in &diff.analysis.records {
                output.add_row(CsvRow {
                    kind: "difference",
                    group: group.clone(),
                    function: record.function.to_string(),
                    mode: String::new(),
                    metric: "difference_ms",
                    count: Some(record.differences.len()),
                    mean: finite(record.mean_difference),
                    std: finite(record.std_difference),
                });
            }
            if let Some(TrendFit::Linear { slope, intercept }) = diff.analysis.fit {
                for (metric, value) in [("slope", slope), ("intercept", intercept)] {
                    output.add_row(CsvRow {
                        kind: "trend",
                        group: group.clone(),
                        function: String::new(),
                        mode: String::new(),
                        metric,
                        count: Some(diff.analysis.records.len()),
                        mean: finite(value),
                        std: None,
                    });
                }
            }
        }

        for inv in &report.invocations {
            let group = inv.label.to_string();
            output.add_row(CsvRow::summary("invocation", group.clone(), "startup_s", &inv.startup));
            output.add_row(CsvRow::summary("invocation", group, "finishing_s", &inv.finishing));
        }

        output
    }

    pub fn add_row(&mut self, row: CsvRow) {
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[CsvRow] {
        &self.rows
    }

    /// Generate CSV output as string (header always present)
    pub fn to_csv(&self) -> Result<String> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());

        writer
            .write_record(["kind", "group", "function", "mode", "metric", "count", "mean", "std"])
            .context("Failed to write CSV header")?;
        for row in &self.rows {
            writer.serialize(row).context("Failed to write CSV row")?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| anyhow::anyhow!("Failed to flush CSV output: {}", e))?;
        String::from_utf8(bytes).context("CSV output is not valid UTF-8")
    }
}

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}
