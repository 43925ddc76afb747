//! Artifact classification from directory and file names
//!
//! Experiment directories look like
//! `test-baseline_namespace-refund_20250214-195626`, artifacts like
//! `pod_f12-00042-deployment-7c9f_queue_proxy_logs.txt`. Anything that does not
//! fit these shapes is noise in the results tree and classifies as `None`.

use crate::model::{Application, Function, Mode};
use regex::Regex;

const BASELINE_TOKEN: &str = "test-baseline";
const ENFORCE_TOKEN: &str = "test-enforce";
const FUNCTION_PATTERN: &str = r"pod_([a-zA-Z0-9\-]+)-\d{5}-deployment";

/// Maps directory and file names to experiment identities
#[derive(Debug, Clone)]
pub struct PathClassifier {
    function_re: Regex,
}

impl PathClassifier {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            function_re: Regex::new(FUNCTION_PATTERN)?,
        })
    }

    /// Application and mode encoded in an experiment directory name
    ///
    /// Returns `None` unless both a mode token and an application token are present.
    pub fn classify_directory(&self, name: &str) -> Option<(Application, Mode)> {
        let mode = classify_mode(name)?;
        let application = classify_application(name)?;
        Some((application, mode))
    }

    /// Function identity encoded in an artifact file name
    ///
    /// Names matching the pod pattern but outside the function domain
    /// (`workflow`, `entry-point`, ...) also classify as `None`.
    pub fn classify_file(&self, name: &str) -> Option<Function> {
        let captures = self.function_re.captures(name)?;
        captures.get(1)?.as_str().parse().ok()
    }
}

fn classify_mode(name: &str) -> Option<Mode> {
    if name.contains(BASELINE_TOKEN) {
        Some(Mode::Baseline)
    } else if name.contains(ENFORCE_TOKEN) {
        Some(Mode::Enforce)
    } else {
        None
    }
}

fn classify_application(name: &str) -> Option<Application> {
    Application::ALL
        .into_iter()
        .find(|app| name.contains(&format!("_namespace-{}_", app.as_str())))
}
