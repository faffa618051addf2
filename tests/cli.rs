#![cfg(feature = "cli")]

use assert_cmd::Command;
use assert_fs::prelude::*;

fn access_log(n: usize) -> String {
    let mut log = String::new();
    for i in 0..n {
        log.push_str(&format!(
            "{{\"remote_addr\": \"10.1.{}.{}\", \"request\": \"GET /\", \"user\": \"u{}\"}}\n",
            i / 256,
            i % 256,
            i % 7
        ));
    }
    log
}

fn distinct(stdout: &str, method: &str) -> f64 {
    stdout
        .lines()
        .find(|line| line.starts_with(&format!("| {}", method)))
        .and_then(|line| line.split('|').nth(2))
        .and_then(|cell| cell.trim().parse().ok())
        .expect("distinct column")
}

#[test]
fn cli_counts_file() {
    let dir = assert_fs::TempDir::new().expect("temp dir");
    let log = dir.child("access.log");
    let mut content = access_log(1000);
    content.push_str("garbage line\n");
    content.push_str(&access_log(1000));
    log.write_str(&content).expect("write log");

    let out = Command::cargo_bin("hll-count")
        .expect("cli binary")
        .args(["--exact", log.path().to_str().expect("log path")])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(out).expect("utf8 output");

    assert_eq!(distinct(&stdout, "exact"), 1000.0);
    let approx = distinct(&stdout, "hyperloglog");
    assert!((approx - 1000.0).abs() < 30.0, "{}", stdout);
    assert!(stdout.contains("records: 2001, items: 2000, skipped: 1"));
}

#[test]
fn cli_reads_stdin_with_custom_field() {
    let out = Command::cargo_bin("hll-count")
        .expect("cli binary")
        .args(["--field", "user", "--precision", "10", "-"])
        .write_stdin(access_log(100))
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(out).expect("utf8 output");

    assert!(!stdout.contains("| exact"));
    let approx = distinct(&stdout, "hyperloglog");
    assert!((approx - 7.0).abs() <= 1.0, "{}", stdout);
}

#[test]
fn cli_skips_invalid_utf8_lines() {
    let mut input = access_log(10).into_bytes();
    input.extend_from_slice(b"{\"remote_addr\": \"\xff\xfe\"}\n");
    input.extend_from_slice(access_log(10).as_bytes());

    let out = Command::cargo_bin("hll-count")
        .expect("cli binary")
        .args(["--exact", "-"])
        .write_stdin(input)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(out).expect("utf8 output");

    assert_eq!(distinct(&stdout, "exact"), 10.0);
    assert!(stdout.contains("records: 21, items: 20, skipped: 1"));
}

#[test]
fn cli_rejects_invalid_precision() {
    Command::cargo_bin("hll-count")
        .expect("cli binary")
        .args(["--precision", "0", "-"])
        .write_stdin("")
        .assert()
        .failure();
}

#[test]
fn cli_fails_on_missing_file() {
    Command::cargo_bin("hll-count")
        .expect("cli binary")
        .arg("/nonexistent/access.log")
        .assert()
        .failure();
}
