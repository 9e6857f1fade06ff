// ns-sweep/tests/cli_integration.rs

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_help_shows_flags() {
    let mut cmd = Command::cargo_bin("ns-sweep").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--chunks"))
        .stdout(predicate::str::contains("--source-url"))
        .stdout(predicate::str::contains("--output"))
        .stdout(predicate::str::contains("--timeout"));
}

#[test]
fn test_version_flag() {
    let mut cmd = Command::cargo_bin("ns-sweep").unwrap();
    cmd.arg("--version");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("ns-sweep"));
}

#[test]
fn test_missing_name_is_an_error() {
    let dir = tempdir().unwrap();
    let mut cmd = Command::cargo_bin("ns-sweep").unwrap();
    // No positional name, no env, no config discovery hits in an empty dir.
    cmd.current_dir(dir.path())
        .env_remove("NS_SWEEP_NAME")
        .env_remove("NS_SWEEP_CONFIG")
        .env("HOME", dir.path());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("base name"));
}

#[test]
fn test_zero_chunks_rejected() {
    let mut cmd = Command::cargo_bin("ns-sweep").unwrap();
    cmd.args(["crypto", "--chunks", "0"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("between 1 and 10000"));
}

#[test]
fn test_non_http_source_url_rejected() {
    let mut cmd = Command::cargo_bin("ns-sweep").unwrap();
    cmd.args(["crypto", "--source-url", "file:///etc/passwd"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("http"));
}

#[test]
fn test_explicit_missing_config_file_is_fatal() {
    let mut cmd = Command::cargo_bin("ns-sweep").unwrap();
    cmd.args(["crypto", "--config", "/nonexistent/.ns-sweep.toml"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Config file not found"));
}

/// A fetch failure is a warning, not a fatal error: the run completes with
/// an empty report. Points the source at an unroutable URL so no real
/// network service is consulted.
#[test]
fn test_unreachable_source_still_produces_report() {
    let dir = tempdir().unwrap();
    let report = dir.path().join("records1.txt");

    let mut cmd = Command::cargo_bin("ns-sweep").unwrap();
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .args([
            "crypto",
            "--source-url",
            "http://127.0.0.1:1/public_suffix_list.dat",
            "--output",
        ])
        .arg(&report)
        .timeout(std::time::Duration::from_secs(60));

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("It's done."))
        .stderr(predicate::str::contains("Warning:"));

    let contents = fs::read_to_string(&report).unwrap();
    assert!(contents.is_empty(), "empty list must yield an empty report");
}

#[test]
fn test_config_file_supplies_name() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("sweep.toml");
    fs::write(
        &config_path,
        "[defaults]\nname = \"crypto\"\nchunks = 4\n",
    )
    .unwrap();
    let report = dir.path().join("out.txt");

    let mut cmd = Command::cargo_bin("ns-sweep").unwrap();
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .arg("--config")
        .arg(&config_path)
        .args(["--source-url", "http://127.0.0.1:1/list.dat", "--output"])
        .arg(&report)
        .timeout(std::time::Duration::from_secs(60));

    cmd.assert().success();
    assert!(report.exists());
}

/// Full network scan against the real public suffix list. Slow and
/// network-bound, so ignored by default; run with `cargo test -- --ignored`.
#[test]
#[ignore]
fn test_real_scan_produces_classified_lines() {
    let dir = tempdir().unwrap();
    let report = dir.path().join("records1.txt");

    let mut cmd = Command::cargo_bin("ns-sweep").unwrap();
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .args(["google", "--chunks", "200", "--output"])
        .arg(&report)
        .timeout(std::time::Duration::from_secs(1800));

    cmd.assert().success();

    let contents = fs::read_to_string(&report).unwrap();
    assert!(contents.contains("google.com: Yes NS \n"));
}
