//! latdiff - latency measurement ingestion and paired mode comparison
//!
//! This library ingests per-run queue-proxy latency logs from a results tree,
//! validates their completeness, summarizes them per application/function/mode,
//! and compares baseline against enforce runs with a linear trend over the
//! workflow's function order. It also summarizes invocation traces with joint
//! confidence-interval outlier rejection.

pub mod aggregate;
pub mod catalog;
pub mod classify;
pub mod cli;
pub mod config;
pub mod csv_output;
pub mod difference;
pub mod error;
pub mod extract;
pub mod invocation;
pub mod json_output;
pub mod model;
pub mod outlier;
pub mod report;
pub mod stats;
pub mod validate;

pub use error::IngestError;
