//! Integration tests for the `plist-check` binary (src/main.rs).
//!
//! These tests are disabled under Miri because they spawn external processes,
//! which Miri does not support.
#![cfg(all(not(miri), not(target_os = "wasi")))]

use std::io::Write;
use std::process::Command;

/// Helper: run the binary with the given args and return (stdout, stderr, exit_code).
fn run_binary(args: &[&str]) -> (String, String, i32) {
    let bin = env!("CARGO_BIN_EXE_plist-check");
    let output = Command::new(bin)
        .args(args)
        .output()
        .expect("failed to execute binary");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);
    (stdout, stderr, code)
}

fn plist_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(content.as_bytes()).expect("write temp file");
    file
}

#[test]
fn no_args_exits_one() {
    let (_stdout, stderr, code) = run_binary(&[]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Expected a path"), "stderr: {stderr}");
}

#[test]
fn missing_file_exits_two() {
    let (_stdout, stderr, code) = run_binary(&["/nonexistent/file.plist"]);
    assert_eq!(code, 2);
    assert!(stderr.contains("Failed to read"), "stderr: {stderr}");
}

#[test]
fn valid_plist_is_reported() {
    let file = plist_file(
        "<plist version=\"1.0\"><dict><key>a</key><integer>1</integer></dict></plist>",
    );
    let path = file.path().to_str().expect("utf-8 path");
    let (stdout, _stderr, code) = run_binary(&[path]);
    assert_eq!(code, 0);
    assert!(stdout.contains("<dict> with 1 keys"), "stdout: {stdout}");
}

#[test]
fn invalid_plist_exits_three() {
    let file = plist_file("<array><integer>x</integer></array>");
    let path = file.path().to_str().expect("utf-8 path");
    let (_stdout, stderr, code) = run_binary(&[path]);
    assert_eq!(code, 3);
    assert!(stderr.contains("invalid i64"), "stderr: {stderr}");
}
