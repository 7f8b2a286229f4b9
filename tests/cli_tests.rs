//! End-to-end tests for the `sleeprs` binary.
//!
//! Every test points `--config` at a temporary file so the user's own
//! configuration is never read or written.

use sleeprs::AppConfig;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

/// Run the CLI against `config` and return (exit code, stdout, stderr)
fn run_cli(config: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_sleeprs"))
        .arg("--config")
        .arg(config)
        .args(args)
        .env("NO_COLOR", "1")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

fn json_mode(stdout: &str) -> String {
    let report: serde_json::Value = serde_json::from_str(stdout).unwrap();
    report["mode"].as_str().unwrap().to_string()
}

#[test]
fn test_age_groups_with_age_shows_one_group() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.toml");

    let (code, stdout, _) = run_cli(&config, &["age-groups", "--age", "70"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Senior (65+ years)"));
    assert!(stdout.contains("Characteristics"));
    assert!(!stdout.contains("Newborn (0-3 months)"));

    let (code, stdout, _) = run_cli(&config, &["age-groups"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Newborn (0-3 months)"));
    assert!(stdout.contains("Senior (65+ years)"));
}

#[test]
fn test_set_keeps_other_values_from_out_of_range_file() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.toml");
    fs::write(
        &config,
        "[sleep]\nfall_asleep_time = 45\nselected_cycles = 5\nage = 70.0\n",
    )
    .unwrap();

    let (code, _, stderr) = run_cli(&config, &["config", "--set", "sleep.fall_asleep_time=20"]);
    assert_eq!(code, 0, "{}", stderr);

    let saved = AppConfig::load_from_file(&config).unwrap();
    assert_eq!(saved.sleep.fall_asleep_time, 20);
    assert_eq!(saved.sleep.age, 70.0);
}

#[test]
fn test_set_leaves_unparsable_file_untouched() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.toml");
    let content = "[sleep\nage = seventy\n";
    fs::write(&config, content).unwrap();

    let (code, _, _) = run_cli(&config, &["config", "--set", "sleep.age=40"]);
    assert_ne!(code, 0);
    assert_eq!(fs::read_to_string(&config).unwrap(), content);
}

#[test]
fn test_bad_override_only_fails_calculations() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.toml");

    let (code, stdout, _) = run_cli(&config, &["--fall-asleep", "45", "config", "--list"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("sleep.fall_asleep_time"));

    let (code, _, _) = run_cli(&config, &["--fall-asleep", "45", "age-groups"]);
    assert_eq!(code, 0);

    let (code, _, _) = run_cli(&config, &["--fall-asleep", "45", "bedtime", "--wake", "7:00"]);
    assert_ne!(code, 0);
}

#[test]
fn test_at_follows_configured_default_mode() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.toml");

    let (code, stdout, _) = run_cli(&config, &["--format", "json", "at", "7:00 AM"]);
    assert_eq!(code, 0);
    assert_eq!(json_mode(&stdout), "bedtime");

    let (code, _, _) = run_cli(&config, &["config", "--set", "display.default_mode=wake"]);
    assert_eq!(code, 0);

    let (code, stdout, _) = run_cli(&config, &["--format", "json", "at", "10:30 PM"]);
    assert_eq!(code, 0);
    assert_eq!(json_mode(&stdout), "waketime");

    let (code, stdout, _) =
        run_cli(&config, &["--format", "json", "at", "7:00 AM", "--mode", "bedtime"]);
    assert_eq!(code, 0);
    assert_eq!(json_mode(&stdout), "bedtime");
}

#[test]
fn test_text_report_describes_best_option() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.toml");

    let (code, stdout, _) = run_cli(&config, &["--age", "30", "bedtime", "--wake", "7:00"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("11:15 PM"));
    assert!(stdout.contains("Ideal amount of sleep with complete cycles"));
}
