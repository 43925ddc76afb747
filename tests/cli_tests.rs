//! Binary-level tests: argument handling, output formats and exit status
#![allow(deprecated)] // suppress assert_cmd::Command::cargo_bin deprecation in tests

mod utils;

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;
use utils::{experiment_dir, write_artifact};

fn small_tree() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    // Binary-exact values so the trend is exactly flat at +125 ms
    for (mode, extra) in [("baseline", 0.0), ("enforce", 125.0)] {
        for (i, name) in ["f1", "f2"].iter().enumerate() {
            let v = 250.0 * (i + 1) as f64 + extra;
            write_artifact(root, &experiment_dir(mode, "refund"), name, &[v, v, v]);
            write_artifact(root, &experiment_dir(mode, "long-sequence"), name, &[v, v, v]);
        }
    }
    tmp
}

#[test]
fn test_requires_an_input() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("latdiff");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Nothing to analyze"));
}

#[test]
fn test_text_report() {
    let tree = small_tree();
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("latdiff");
    cmd.arg("--results")
        .arg(tree.path())
        .arg("--expected-entries")
        .arg("3")
        .assert()
        .success()
        .stdout(predicate::str::contains("SUMMARY OF LOADED LATENCY DATA"))
        .stdout(predicate::str::contains("Latency by mode: refund"))
        .stdout(predicate::str::contains("Difference summary for long-sequence"))
        .stdout(predicate::str::contains("Trend: y = 0.0000x + 125.0000"));
}

#[test]
fn test_json_report() {
    let tree = small_tree();
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("latdiff");
    let output = cmd
        .arg("--results")
        .arg(tree.path())
        .arg("--expected-entries")
        .arg("3")
        .arg("--format")
        .arg("json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["latencies"].as_array().unwrap().len(), 8);
    assert_eq!(value["differences"][0]["application"], "long-sequence");
    assert_eq!(value["differences"][0]["fit"]["kind"], "linear");
}

#[test]
fn test_csv_report() {
    let tree = small_tree();
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("latdiff");
    cmd.arg("--results")
        .arg(tree.path())
        .arg("--expected-entries")
        .arg("3")
        .arg("--format")
        .arg("csv")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "kind,group,function,mode,metric,count,mean,std",
        ))
        .stdout(predicate::str::contains("trend,long-sequence,,,slope,2,"));
}

#[test]
fn test_cardinality_failure_exits_nonzero_with_counts() {
    let tree = small_tree();
    // Default expectation is 350 samples per artifact
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("latdiff");
    cmd.arg("--results")
        .arg(tree.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("has 3 entries, expected 350"));
}

#[test]
fn test_config_file_sets_expected_entries() {
    let tree = small_tree();
    let config = tree.path().join("latdiff.toml");
    fs::write(&config, "expected_entries = 3\n").unwrap();

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("latdiff");
    cmd.arg("--results")
        .arg(tree.path())
        .arg("--config")
        .arg(&config)
        .assert()
        .success();
}

#[test]
fn test_flag_overrides_config_file() {
    let tree = small_tree();
    let config = tree.path().join("latdiff.toml");
    fs::write(&config, "expected_entries = 7\n").unwrap();

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("latdiff");
    cmd.arg("--results")
        .arg(tree.path())
        .arg("--config")
        .arg(&config)
        .arg("--expected-entries")
        .arg("3")
        .assert()
        .success();
}

#[test]
fn test_invalid_z_value_rejected() {
    let tree = small_tree();
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("latdiff");
    cmd.arg("--results")
        .arg(tree.path())
        .arg("--expected-entries")
        .arg("3")
        .arg("-z")
        .arg("0")
        .assert()
        .failure()
        .stderr(predicate::str::contains("z_value"));
}

#[test]
fn test_requests_trace_summary() {
    let tmp = TempDir::new().unwrap();
    let trace = tmp.path().join("requests_trace.txt");
    let mut rows = String::new();
    for i in 1..=10 {
        rows.push_str(&format!("baseline,{},0,{},0,500\n", i, 1000 + (i % 2) * 100));
        rows.push_str(&format!("enforcer-simple,{},0,2000,0,{}\n", i, 600 + (i % 2) * 10));
    }
    fs::write(&trace, rows).unwrap();

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("latdiff");
    cmd.arg("--requests-trace")
        .arg(&trace)
        .arg("--discard-first")
        .arg("2")
        .assert()
        .success()
        .stdout(predicate::str::contains("FINAL RESULTS AFTER OUTLIER REMOVAL"))
        .stdout(predicate::str::contains("Baseline"))
        .stdout(predicate::str::contains("Simple Workflow"));
}

#[test]
fn test_default_exemptions_apply_without_config() {
    let tree = small_tree();
    // valve f2 and database-dummy are exempt from the sample count by default
    write_artifact(tree.path(), &experiment_dir("baseline", "valve"), "f2", &[1.0]);
    write_artifact(
        tree.path(),
        &experiment_dir("enforce", "refund"),
        "database-dummy",
        &[1.0, 2.0, 3.0, 4.0],
    );

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("latdiff");
    cmd.arg("--results")
        .arg(tree.path())
        .arg("--expected-entries")
        .arg("3")
        .assert()
        .success()
        .stdout(predicate::str::contains("Latency by mode: valve"));
}

#[test]
fn test_config_file_exemptions_replace_defaults() {
    let tree = small_tree();
    write_artifact(tree.path(), &experiment_dir("baseline", "valve"), "f2", &[1.0]);
    let config = tree.path().join("latdiff.toml");
    fs::write(
        &config,
        "expected_entries = 3\n\n[[exemptions]]\nfunction = \"result\"\n",
    )
    .unwrap();

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("latdiff");
    cmd.arg("--results")
        .arg(tree.path())
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("has 1 entries, expected 3"));
}
