//! CLI argument parsing for latdiff

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for analysis reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable tables (default)
    Text,
    /// JSON document for renderers
    Json,
    /// Long-format CSV for spreadsheet analysis
    Csv,
}

#[derive(Parser, Debug)]
#[command(name = "latdiff")]
#[command(version)]
#[command(
    about = "Latency log ingestion and baseline/enforce comparison for workflow benchmarks",
    long_about = None
)]
pub struct Cli {
    /// Results tree with per-run latency artifacts
    #[arg(short, long, value_name = "DIR")]
    pub results: Option<PathBuf>,

    /// Invocation trace CSV (experiment,test_id,start_start,start_end,finish_start,finish_end)
    #[arg(short = 't', long = "requests-trace", value_name = "FILE")]
    pub requests_trace: Option<PathBuf>,

    /// TOML configuration file (overrides built-in defaults)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Required number of latency samples per artifact
    #[arg(long = "expected-entries", value_name = "N")]
    pub expected_entries: Option<usize>,

    /// Outlier interval half-width in standard deviations (default: 3.0)
    #[arg(short = 'z', long = "z-value", value_name = "Z")]
    pub z_value: Option<f64>,

    /// Ignore invocation cycles with test_id <= N
    #[arg(long = "discard-first", value_name = "N")]
    pub discard_first: Option<u64>,

    /// Output format
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Enable debug tracing output (to stderr)
    #[arg(long = "debug")]
    pub debug: bool,
}
