// Integration test utilities
//
// Helpers for building synthetic results trees the way the benchmark harness
// lays them out.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

/// A queue-proxy log line carrying a latency in seconds
pub fn latency_line(seconds: f64) -> String {
    format!(
        r#"{{"severity":"INFO","httpRequest":{{"requestMethod":"POST","status":200,"latency":"{}s"}}}}"#,
        seconds
    )
}

/// Log body with one latency line per sample (ms) interleaved with noise
pub fn log_body(samples_ms: &[f64]) -> String {
    let mut body = String::from("{\"severity\":\"INFO\",\"message\":\"Starting queue-proxy\"}\n");
    for (i, ms) in samples_ms.iter().enumerate() {
        body.push_str(&latency_line(ms / 1000.0));
        body.push('\n');
        if i % 2 == 0 {
            body.push_str("{\"severity\":\"DEBUG\",\"message\":\"readiness check ok\"}\n");
        }
    }
    body
}

/// Experiment directory name, e.g. `test-baseline_namespace-refund_20250214-195626`
pub fn experiment_dir(mode_token: &str, app: &str) -> String {
    format!("test-{}_namespace-{}_20250214-195626", mode_token, app)
}

/// Write one artifact below `root/<dir>/` and return its path
pub fn write_artifact(root: &Path, dir: &str, function: &str, samples_ms: &[f64]) -> PathBuf {
    let dir_path = root.join(dir);
    fs::create_dir_all(&dir_path).unwrap();
    let path = dir_path.join(format!(
        "pod_{}-00042-deployment-5f7d8c9b4-xk2lp_queue_proxy_logs.txt",
        function
    ));
    fs::write(&path, log_body(samples_ms)).unwrap();
    path
}

/// Write an arbitrary file below `root/<dir>/`
pub fn write_file(root: &Path, dir: &str, name: &str, content: &str) -> PathBuf {
    let dir_path = root.join(dir);
    fs::create_dir_all(&dir_path).unwrap();
    let path = dir_path.join(name);
    fs::write(&path, content).unwrap();
    path
}
