//! Basic CLI E2E tests.
//!
//! Each test drives the built binary against its own temporary data
//! directory (RATEKIT_DIR), so runs are hermetic and order-independent.

use std::path::Path;
use std::process::Command;

/// Run a CLI command against `dir` and return (stdout, stderr, code).
fn run_cli(dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_ratekit-cli"))
        .env("RATEKIT_DIR", dir)
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

/// Run a CLI command and expect success.
fn run_cli_success(dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, code) = run_cli(dir, args);
    assert_eq!(code, 0, "CLI command failed: {:?}\nstderr: {}", args, stderr);
    stdout
}

fn decision(dir: &Path, args: &[&str]) -> String {
    let stdout = run_cli_success(dir, args);
    serde_json::from_str::<String>(stdout.trim()).expect("decision should be a JSON string")
}

#[test]
fn stats_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let stdout = run_cli_success(dir.path(), &["stats"]);
    let stats: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(stats["app_sessions"], 0);
    assert_eq!(stats["success_flows"], 0);
    assert!(stats["last_request"].is_null());
}

#[test]
fn full_flow_through_the_cli() {
    let dir = tempfile::tempdir().unwrap();
    let d = dir.path();

    // 2 sessions + 1 success: below the default session threshold of 3.
    run_cli_success(d, &["event", "session"]);
    run_cli_success(d, &["event", "session"]);
    run_cli_success(d, &["event", "success"]);
    assert_eq!(decision(d, &["evaluate"]), "do_nothing");

    // 3rd session unlocks the gate.
    run_cli_success(d, &["event", "session"]);
    assert_eq!(decision(d, &["evaluate"]), "show_sentiment_gate");

    // Positive answer routes to the store review.
    assert_eq!(decision(d, &["respond", "positive"]), "show_store_review");

    // The request flow commits the cooldown; afterwards nothing is due.
    assert_eq!(decision(d, &["request"]), "show_store_review");
    assert_eq!(decision(d, &["evaluate"]), "do_nothing");

    let stdout = run_cli_success(d, &["stats"]);
    let stats: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(stats["app_sessions"], 3);
    assert!(!stats["last_request"].is_null());
}

#[test]
fn negative_response_suppresses_and_reset_clears() {
    let dir = tempfile::tempdir().unwrap();
    let d = dir.path();

    for _ in 0..3 {
        run_cli_success(d, &["event", "session"]);
    }
    run_cli_success(d, &["event", "success"]);
    assert_eq!(
        decision(d, &["respond", "negative", "--no-open"]),
        "do_nothing"
    );
    assert_eq!(decision(d, &["evaluate"]), "do_nothing");

    run_cli_success(d, &["reset"]);
    let stdout = run_cli_success(d, &["stats"]);
    let stats: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(stats["app_sessions"], 0);
}

#[test]
fn dismissed_gate_stays_due() {
    let dir = tempfile::tempdir().unwrap();
    let d = dir.path();

    for _ in 0..3 {
        run_cli_success(d, &["event", "session"]);
    }
    run_cli_success(d, &["event", "success"]);
    assert_eq!(decision(d, &["respond", "dismissed"]), "show_sentiment_gate");
}

#[test]
fn config_show_get_set() {
    let dir = tempfile::tempdir().unwrap();
    let d = dir.path();

    let stdout = run_cli_success(d, &["config", "show"]);
    let cfg: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(cfg["minimum_app_sessions"], 3);
    assert_eq!(cfg["cooldown_days"], 120);

    run_cli_success(d, &["config", "set", "minimum_app_sessions", "5"]);
    let stdout = run_cli_success(d, &["config", "get", "minimum_app_sessions"]);
    assert_eq!(stdout.trim(), "5");

    // The raised threshold is honored by evaluation.
    for _ in 0..4 {
        run_cli_success(d, &["event", "session"]);
    }
    run_cli_success(d, &["event", "success"]);
    assert_eq!(decision(d, &["evaluate"]), "do_nothing");
    run_cli_success(d, &["event", "session"]);
    assert_eq!(decision(d, &["evaluate"]), "show_sentiment_gate");

    let (_, stderr, code) = run_cli(d, &["config", "get", "bogus_key"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("unknown config key"));
}

#[test]
fn request_before_thresholds_does_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let d = dir.path();

    assert_eq!(decision(d, &["request"]), "do_nothing");
    let stdout = run_cli_success(d, &["stats"]);
    let stats: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    // No cooldown timestamp was committed.
    assert!(stats["last_request"].is_null());
}
