//! CLI integration tests

use std::path::PathBuf;
use std::process::{Command, Output};

/// Helper function to get the mkpasswd binary path
fn mkpasswd_bin() -> PathBuf {
    // Use CARGO_BIN_EXE_mkpasswd if available (set by cargo test)
    if let Ok(path) = std::env::var("CARGO_BIN_EXE_mkpasswd") {
        return PathBuf::from(path);
    }
    // Fallback to the built binary in target/debug
    PathBuf::from("./target/debug/mkpasswd")
}

fn run_mkpasswd(args: &[&str]) -> Output {
    Command::new(mkpasswd_bin())
        .args(args)
        .output()
        .expect("Failed to run mkpasswd")
}

fn stdout_line(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim_end().to_string()
}

#[test]
fn test_sha512_known_vector() {
    let output = run_mkpasswd(&[
        "--password",
        "Hello world!",
        "--salt",
        "saltstring",
        "--hash",
        "sha512",
    ]);
    assert!(output.status.success());
    assert_eq!(
        stdout_line(&output),
        "$6$saltstring$svn8UoSVapNtMuq1ukKS4tPQd8iKwSMHWjl/O817G3uBnIFNjnQJuesI68u4OTLiBFdcbYEdFCoEOfaS35inz1"
    );
}

#[test]
fn test_sha256_known_vector() {
    let output = run_mkpasswd(&[
        "--password",
        "Hello world!",
        "--salt",
        "saltstring",
        "--hash",
        "sha256",
    ]);
    assert!(output.status.success());
    assert_eq!(
        stdout_line(&output),
        "$5$saltstring$5B8vYYiY.CVt1RlTTf8KbXBH3hsxY/GNooZaBBGWEc5"
    );
}

#[test]
fn test_apr1_known_vector() {
    // Generated with: openssl passwd -apr1 -salt xlWep/gn hello
    let output = run_mkpasswd(&[
        "--password", "hello", "--salt", "xlWep/gn", "--hash", "apr1",
    ]);
    assert!(output.status.success());
    assert_eq!(stdout_line(&output), "$apr1$xlWep/gn$6UNiHq3WE714EKfeH2X5c.");
}

#[test]
fn test_md5_known_vector() {
    let output = run_mkpasswd(&[
        "--password", "0.s0.l33t", "--salt", "deadbeef", "--hash", "md5",
    ]);
    assert!(output.status.success());
    assert_eq!(stdout_line(&output), "$1$deadbeef$0Elo1TJiVIfDaV0Q7DMwA1");
}

#[test]
fn test_default_scheme_is_sha512() {
    let output = run_mkpasswd(&["--password", "secret", "--salt", "saltsalt"]);
    assert!(output.status.success());
    assert!(stdout_line(&output).starts_with("$6$saltsalt$"));
}

#[test]
fn test_rounds_flag() {
    let output = run_mkpasswd(&[
        "--password",
        "secret",
        "--salt",
        "saltsalt",
        "--hash",
        "sha256",
        "--rounds",
        "10000",
    ]);
    assert!(output.status.success());
    assert!(stdout_line(&output).starts_with("$5$rounds=10000$saltsalt$"));
}

#[test]
fn test_salt_truncation_warning() {
    let output = run_mkpasswd(&[
        "--password",
        "secret",
        "--salt",
        "waytoolongsaltvalue",
        "--hash",
        "md5",
    ]);
    assert!(output.status.success());
    assert!(stdout_line(&output).starts_with("$1$waytoolo$"));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("truncated"), "stderr: {stderr}");
}

#[test]
fn test_unknown_hash_fails() {
    let output = run_mkpasswd(&["--password", "secret", "--hash", "bcrypt"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown hash"), "stderr: {stderr}");
}

#[test]
fn test_random_salt() {
    let first = run_mkpasswd(&["--password", "secret"]);
    let second = run_mkpasswd(&["--password", "secret"]);
    assert!(first.status.success());
    assert!(second.status.success());

    let first = stdout_line(&first);
    let second = stdout_line(&second);
    assert!(first.starts_with("$6$"));
    // random 16-char salt, then 86 chars of digest
    let salt = first.split('$').nth(2).unwrap();
    assert_eq!(salt.len(), 16);
    assert_ne!(first, second);
}
