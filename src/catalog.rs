//! Experiment catalog: discovery and ingestion of a results tree
//!
//! The tree is walked once. Each artifact is classified (unknown names are
//! skipped), its samples extracted and validated, and the resulting record
//! folded into the catalog. The first fatal error aborts the whole build.

use crate::classify::PathClassifier;
use crate::config::AnalysisConfig;
use crate::error::{IngestError, Result};
use crate::extract::LatencyExtractor;
use crate::model::{Application, ExperimentKey, ExperimentRecord, Mode};
use crate::validate::RecordValidator;
use std::path::Path;
use walkdir::WalkDir;

/// Canonical record set of one pipeline run
#[derive(Debug, Clone, Default)]
pub struct ExperimentCatalog {
    records: Vec<ExperimentRecord>,
    /// Artifacts with the right suffix that could not be classified
    skipped: usize,
}

/// Per-artifact ingestion stages, built once per run
#[derive(Debug, Clone)]
pub struct Ingestor {
    classifier: PathClassifier,
    extractor: LatencyExtractor,
    validator: RecordValidator,
    artifact_suffix: String,
}

impl Ingestor {
    pub fn new(config: &AnalysisConfig) -> Result<Self> {
        Ok(Self {
            classifier: PathClassifier::new()?,
            extractor: LatencyExtractor::new()?,
            validator: RecordValidator::new(
                config.expected_entries,
                config.exemptions.iter().collect(),
            ),
            artifact_suffix: config.artifact_suffix.clone(),
        })
    }

    /// Whether `path` names a latency artifact at all
    pub fn is_artifact(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with(&self.artifact_suffix))
    }

    /// Classify an artifact path from its parent directory and file name
    pub fn classify(&self, path: &Path) -> Option<ExperimentKey> {
        let directory = path.parent()?.file_name()?.to_str()?;
        let file = path.file_name()?.to_str()?;

        let (application, mode) = self.classifier.classify_directory(directory)?;
        let function = self.classifier.classify_file(file)?;
        Some(ExperimentKey {
            application,
            function,
            mode,
        })
    }

    /// Ingest one artifact: `Ok(None)` when it is unclassifiable
    pub fn ingest(&self, path: &Path) -> Result<Option<ExperimentRecord>> {
        let Some(key) = self.classify(path) else {
            tracing::debug!("Skipping unclassifiable artifact {}", path.display());
            return Ok(None);
        };

        let samples = self.extractor.extract(path)?;
        let record = ExperimentRecord::new(key, path.to_path_buf(), samples);
        self.validator.validate(&record)?;

        tracing::debug!(
            "Ingested {} {} {} ({} samples) from {}",
            key.application,
            key.function,
            key.mode,
            record.samples().len(),
            path.display()
        );
        Ok(Some(record))
    }
}

impl ExperimentCatalog {
    /// Walk `root` recursively and ingest every artifact below it
    ///
    /// # Errors
    /// Fails on traversal/read errors, malformed samples, and on the first
    /// cardinality mismatch.
    pub fn build(root: &Path, config: &AnalysisConfig) -> Result<Self> {
        let ingestor = Ingestor::new(config)?;

        let mut catalog = WalkDir::new(root)
            .into_iter()
            .try_fold(Self::default(), |catalog, entry| -> Result<Self> {
                let entry = entry.map_err(IngestError::from)?;
                if !entry.file_type().is_file() || !ingestor.is_artifact(entry.path()) {
                    return Ok(catalog);
                }
                let outcome = ingestor.ingest(entry.path())?;
                Ok(catalog.with(outcome))
            })?;

        sort_records(&mut catalog.records);

        tracing::info!(
            "Loaded {} experiment records ({} unclassified artifacts skipped) from {}",
            catalog.records.len(),
            catalog.skipped,
            root.display()
        );
        Ok(catalog)
    }

    /// Build a catalog from already-ingested records
    pub fn from_records(mut records: Vec<ExperimentRecord>) -> Self {
        sort_records(&mut records);
        Self {
            records,
            skipped: 0,
        }
    }

    fn with(mut self, outcome: Option<ExperimentRecord>) -> Self {
        match outcome {
            Some(record) => self.records.push(record),
            None => self.skipped += 1,
        }
        self
    }

    /// All records, ordered by function, application, mode
    pub fn records(&self) -> &[ExperimentRecord] {
        &self.records
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records of one application and mode, in function order
    pub fn select(&self, application: Application, mode: Mode) -> Vec<&ExperimentRecord> {
        self.records
            .iter()
            .filter(|r| r.application == application && r.mode == mode)
            .collect()
    }

    /// Applications with at least one record
    pub fn applications(&self) -> Vec<Application> {
        let mut apps: Vec<Application> = self.records.iter().map(|r| r.application).collect();
        apps.sort();
        apps.dedup();
        apps
    }
}

/// Enumeration order of the tree is incidental; this order is not
fn sort_records(records: &mut [ExperimentRecord]) {
    records.sort_by(|a, b| {
        (a.function, a.application, a.mode, &a.source)
            .cmp(&(b.function, b.application, b.mode, &b.source))
    });
}
