//! Latency sample extraction from queue-proxy logs
//!
//! Relevant lines carry a field like `"latency": "0.053133726s"`. Everything
//! else in the log is skipped.

use crate::error::{IngestError, Result};
use crate::model::Sample;
use regex::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

const LATENCY_PATTERN: &str = r#""latency":\s*"([0-9.]+)s""#;
const MILLIS_PER_SECOND: f64 = 1000.0;

/// Pulls latency samples (milliseconds) out of log artifacts
#[derive(Debug, Clone)]
pub struct LatencyExtractor {
    latency_re: Regex,
}

impl LatencyExtractor {
    pub fn new() -> std::result::Result<Self, regex::Error> {
        Ok(Self {
            latency_re: Regex::new(LATENCY_PATTERN)?,
        })
    }

    /// Extract every sample of the artifact at `path`, in line order
    pub fn extract(&self, path: &Path) -> Result<Vec<Sample>> {
        let file = File::open(path).map_err(|source| IngestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.extract_from(BufReader::new(file), path)
    }

    /// Extract from any buffered reader; `path` is only used in error reports
    pub fn extract_from<R: BufRead>(&self, reader: R, path: &Path) -> Result<Vec<Sample>> {
        let mut samples = Vec::new();

        for (idx, line) in reader.lines().enumerate() {
            let line = line.map_err(|source| IngestError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            if let Some(sample) = self.parse_line(&line, path, idx + 1)? {
                samples.push(sample);
            }
        }

        Ok(samples)
    }

    fn parse_line(&self, line: &str, path: &Path, line_no: usize) -> Result<Option<Sample>> {
        let Some(captures) = self.latency_re.captures(line) else {
            return Ok(None);
        };
        let text = captures.get(1).map_or("", |m| m.as_str());

        let seconds: f64 = text.parse().map_err(|_| IngestError::MalformedSample {
            path: path.to_path_buf(),
            line: line_no,
            text: text.to_string(),
        })?;

        Ok(Some(seconds * MILLIS_PER_SECOND))
    }
}
