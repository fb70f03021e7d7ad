use predicates::prelude::*;
use tempfile::tempdir;

const GRAPH: &str = "5\nA1 A2 A3 A4 A5\n5\nA2 A1 3\nA3 A2 1\nA4 A1 6\nA5 A4 2\nA3 A4 5\n";

fn graph_file(dir: &std::path::Path) -> std::path::PathBuf {
    let path = dir.join("graph.txt");
    std::fs::write(&path, GRAPH).expect("write graph");
    path
}

/// Calibrating prints the table and the knee threshold.
#[test]
fn calibrate_prints_table_and_tau_opt() {
    let dir = tempdir().expect("tempdir");
    let graph = graph_file(dir.path());

    assert_cmd::cargo::cargo_bin_cmd!("dgslice")
        .arg("calibrate")
        .arg("--graph")
        .arg(&graph)
        .arg("--criterion")
        .arg("A1")
        .assert()
        .success()
        .stdout(predicate::str::contains("Calibration for criterion: A1"))
        .stdout(predicate::str::contains("Optimal threshold (tau_opt): 0.25"));
}

/// Several criteria each get their own table.
#[test]
fn calibrate_accepts_repeated_criteria() {
    let dir = tempdir().expect("tempdir");
    let graph = graph_file(dir.path());

    assert_cmd::cargo::cargo_bin_cmd!("dgslice")
        .args(["calibrate", "--graph"])
        .arg(&graph)
        .args(["--criterion", "A1", "--criterion", "A5", "--plot"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Calibration for criterion: A5"))
        .stdout(predicate::str::contains("<- tau_opt"));
}

/// JSON mode emits a parseable envelope on stdout.
#[test]
fn calibrate_json_output_parses() {
    let dir = tempdir().expect("tempdir");
    let graph = graph_file(dir.path());

    let output = assert_cmd::cargo::cargo_bin_cmd!("dgslice")
        .args(["calibrate", "--json", "--strategy", "fifo", "--graph"])
        .arg(&graph)
        .args(["--criterion", "A1"])
        .output()
        .expect("run");
    assert!(output.status.success());

    let body: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(body["config"]["strategy"], "fifo");
    assert_eq!(body["reports"][0]["curve"]["samples"].as_array().map(Vec::len), Some(21));
}

/// Malformed graph descriptions abort with a descriptive error.
#[test]
fn malformed_graph_fails_with_message() {
    let dir = tempdir().expect("tempdir");
    let graph = dir.path().join("bad.txt");
    std::fs::write(&graph, "2 A B 1 B A six").unwrap();

    assert_cmd::cargo::cargo_bin_cmd!("dgslice")
        .args(["calibrate", "--criterion", "A", "--graph"])
        .arg(&graph)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed graph input"));
}

/// A missing graph file is reported, not replaced by an empty graph.
#[test]
fn missing_graph_file_fails() {
    let dir = tempdir().expect("tempdir");

    assert_cmd::cargo::cargo_bin_cmd!("dgslice")
        .args(["slice", "--criterion", "A", "--graph"])
        .arg(dir.path().join("absent.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("absent.txt"));
}

/// Slice lists members ordered by relevance.
#[test]
fn slice_lists_members_above_threshold() {
    let dir = tempdir().expect("tempdir");
    let graph = graph_file(dir.path());

    assert_cmd::cargo::cargo_bin_cmd!("dgslice")
        .args(["slice", "--criterion", "A1", "--threshold", "0.4", "--graph"])
        .arg(&graph)
        .assert()
        .success()
        .stdout(predicate::str::contains("3 node(s)"))
        .stdout(predicate::str::contains("- A4 [1.0000]"))
        .stdout(predicate::str::contains("A5").not());
}

/// A NaN threshold is rejected instead of producing an unthresholded slice.
#[test]
fn slice_rejects_nan_threshold() {
    let dir = tempdir().expect("tempdir");
    let graph = graph_file(dir.path());

    assert_cmd::cargo::cargo_bin_cmd!("dgslice")
        .args(["slice", "--criterion", "A1", "--threshold", "NaN", "--graph"])
        .arg(&graph)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid --threshold"))
        .stdout(predicate::str::contains("node(s)").not());
}

/// Thresholds just above 1 are valid and simply keep nothing.
#[test]
fn slice_accepts_threshold_above_one() {
    let dir = tempdir().expect("tempdir");
    let graph = graph_file(dir.path());

    assert_cmd::cargo::cargo_bin_cmd!("dgslice")
        .args(["slice", "--criterion", "A1", "--threshold", "1.01", "--graph"])
        .arg(&graph)
        .assert()
        .success()
        .stdout(predicate::str::contains("0 node(s)"))
        .stdout(predicate::str::contains("(none)"));
}

/// Matrix JSON lists every edge next to the matrix.
#[test]
fn matrix_json_includes_edges() {
    let dir = tempdir().expect("tempdir");
    let graph = graph_file(dir.path());

    let output = assert_cmd::cargo::cargo_bin_cmd!("dgslice")
        .args(["matrix", "--json", "--graph"])
        .arg(&graph)
        .output()
        .expect("run matrix");
    assert!(output.status.success());
    let view: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(view["edges"].as_array().map(Vec::len), Some(5));
    assert_eq!(view["edges"][0]["tail"], "A2");
    assert_eq!(view["edges"][0]["kind"], 3);
    assert_eq!(view["matrix"][1][0], 3);
}

/// Matrix prints the indexed vertex listing.
#[test]
fn matrix_prints_vertices() {
    let dir = tempdir().expect("tempdir");
    let graph = graph_file(dir.path());

    assert_cmd::cargo::cargo_bin_cmd!("dgslice")
        .args(["matrix", "--graph"])
        .arg(&graph)
        .assert()
        .success()
        .stdout(predicate::str::contains("0:A1, 1:A2, 2:A3, 3:A4, 4:A5"))
        .stdout(predicate::str::contains("Edges: 5"));
}

/// init-config writes a YAML file that calibrate can consume.
#[test]
fn init_config_then_calibrate_with_it() {
    let dir = tempdir().expect("tempdir");
    let graph = graph_file(dir.path());

    assert_cmd::cargo::cargo_bin_cmd!("dgslice")
        .current_dir(dir.path())
        .arg("init-config")
        .assert()
        .success();
    let config = dir.path().join("dgslice.yaml");
    assert!(config.is_file(), "config should exist at {}", config.display());

    assert_cmd::cargo::cargo_bin_cmd!("dgslice")
        .current_dir(dir.path())
        .arg("init-config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    assert_cmd::cargo::cargo_bin_cmd!("dgslice")
        .args(["calibrate", "--criterion", "A1", "--config"])
        .arg(&config)
        .arg("--graph")
        .arg(&graph)
        .assert()
        .success();
}

/// Running without a subcommand prints usage and fails.
#[test]
fn missing_subcommand_fails() {
    assert_cmd::cargo::cargo_bin_cmd!("dgslice").assert().failure();
}
