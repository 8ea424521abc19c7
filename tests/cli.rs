// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn renders_logs_and_writes_an_image() {
    let dir = tempdir().unwrap();
    let csv = dir.path().join("timings.csv");
    let png = dir.path().join("julia.png");

    Command::cargo_bin("juliapar")
        .unwrap()
        .args(&["--size", "32", "--patch", "5", "-n", "2", "--benchmark"])
        .arg("--csv")
        .arg(&csv)
        .arg("-o")
        .arg(&png)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("32;5;2;"));

    assert!(png.exists());
    let log = std::fs::read_to_string(&csv).unwrap();
    assert!(log.starts_with("32;5;2;"));
    assert_eq!(log.lines().count(), 1);
}

#[test]
fn repeated_runs_append() {
    let dir = tempdir().unwrap();
    let csv = dir.path().join("timings.csv");
    for &workers in &["1", "3"] {
        Command::cargo_bin("juliapar")
            .unwrap()
            .args(&["--size", "16", "--patch", "4", "-n", workers])
            .arg("--csv")
            .arg(&csv)
            .assert()
            .success();
    }
    let log = std::fs::read_to_string(&csv).unwrap();
    assert_eq!(log.lines().count(), 2);

    Command::cargo_bin("speedup")
        .unwrap()
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains("speedup").and(predicate::str::contains("16")));
}

#[test]
fn sequential_run_reports_one_patch() {
    let dir = tempdir().unwrap();
    Command::cargo_bin("juliapar")
        .unwrap()
        .args(&["--size", "12", "--sequential"])
        .arg("--csv")
        .arg(dir.path().join("t.csv"))
        .assert()
        .success()
        .stdout(predicate::str::starts_with("12;12;1;"));
}

#[test]
fn bad_configuration_fails_without_output() {
    let dir = tempdir().unwrap();
    let csv = dir.path().join("t.csv");
    for args in &[
        vec!["--size", "0"],
        vec!["--patch", "-1"],
        vec!["--nprocs", "0"],
        vec!["--xmin", "2", "--xmax", "1"],
    ] {
        Command::cargo_bin("juliapar")
            .unwrap()
            .args(args)
            .arg("--csv")
            .arg(&csv)
            .assert()
            .failure()
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains("invalid configuration"));
    }
    assert!(!csv.exists());
}

#[test]
fn speedup_fails_on_missing_log() {
    let dir = tempdir().unwrap();
    Command::cargo_bin("speedup")
        .unwrap()
        .arg(dir.path().join("missing.csv"))
        .assert()
        .failure();
}
