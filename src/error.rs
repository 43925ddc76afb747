//! Fatal ingestion errors
//!
//! Unclassifiable artifacts are not errors (they are skipped); everything here
//! aborts the run.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("File {path} has {observed} entries, expected {expected}")]
    CardinalityMismatch {
        path: PathBuf,
        observed: usize,
        expected: usize,
    },

    #[error("Malformed latency value '{text}' at {path}:{line}")]
    MalformedSample {
        path: PathBuf,
        line: usize,
        text: String,
    },

    #[error("Failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid built-in pattern")]
    Pattern(#[from] regex::Error),

    #[error("Failed to walk results tree")]
    Walk(#[from] walkdir::Error),

    #[error("Failed to decode invocation trace {path}")]
    Trace {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

pub type Result<T> = std::result::Result<T, IngestError>;
