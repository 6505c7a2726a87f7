//! Basic CLI E2E tests.
//!
//! Every test runs the binary against its own settings directory.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Command with an isolated settings directory.
fn cli(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("leaveplan-cli").unwrap();
    cmd.env("LEAVEPLAN_HOME", home.path()).env_remove("RUST_LOG");
    cmd
}

fn json_output(home: &TempDir, args: &[&str]) -> serde_json::Value {
    let output = cli(home).args(args).arg("--json").output().unwrap();
    assert!(output.status.success(), "{args:?} failed: {}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn metrics_first_week_of_2024() {
    let home = TempDir::new().unwrap();
    let json = json_output(&home, &["metrics", "2024-01-01", "2024-01-05"]);

    assert_eq!(json["total_days"], 5);
    assert_eq!(json["holiday_days"], 1);
    assert_eq!(json["business_days"], 4);
    assert_eq!(json["valid"], true);
    assert_eq!(json["rating"], "medium");
}

#[test]
fn metrics_explain_includes_breakdown() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .args(["metrics", "2024-07-08", "2024-07-12", "--explain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("positional"))
        .stdout(predicate::str::contains("block size"));
}

#[test]
fn reversed_range_fails() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .args(["metrics", "2024-01-05", "2024-01-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn bad_date_is_rejected_by_parser() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .args(["metrics", "2024-13-01", "2024-12-31"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid date"));
}

#[test]
fn recommend_respects_max_results() {
    let home = TempDir::new().unwrap();
    let json = json_output(&home, &["recommend", "--year", "2024", "--max-results", "3"]);

    let recs = json["recommendations"].as_array().unwrap();
    assert!(!recs.is_empty());
    assert!(recs.len() <= 3);
    assert!(recs[0]["id"].is_string());
    assert!(json["failures"].as_array().unwrap().is_empty());
}

#[test]
fn recommend_text_output() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .args(["recommend", "--year", "2024", "--max-results", "2", "--sequential"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. ["));
}

#[test]
fn bridges_2024() {
    let home = TempDir::new().unwrap();
    let json = json_output(&home, &["bridges", "--year", "2024"]);
    let bridges = json.as_array().unwrap();

    assert!(!bridges.is_empty());
    assert!(bridges.iter().any(|b| b["range"]["start"] == "2024-05-31"));
}

#[test]
fn bridges_at_the_edge_of_the_calendar() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .args(["bridges", "--year", "1583"])
        .assert()
        .success();
    cli(&home)
        .args(["fraction", "--year", "1583", "--count", "1", "--length", "5"])
        .assert()
        .success();
    cli(&home)
        .args(["bridges", "--year", "2147483647"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("outside the supported calendar range"));
}

#[test]
fn bridges_with_huge_max_size() {
    let home = TempDir::new().unwrap();
    let json = json_output(&home, &["bridges", "--year", "2024", "--max-size", "4294967295"]);
    assert!(json.as_array().unwrap().iter().any(|b| b["range"]["start"] == "2024-05-31"));
}

#[test]
fn holidays_national_and_judicial() {
    let home = TempDir::new().unwrap();
    let national = json_output(&home, &["holidays", "--year", "2024"]);
    assert_eq!(national.as_array().unwrap().len(), 13);

    let judicial = json_output(&home, &["holidays", "--year", "2024", "--judicial"]);
    assert_eq!(judicial.as_array().unwrap().len(), 18);
}

#[test]
fn extra_holiday_file_is_used() {
    let home = TempDir::new().unwrap();
    let file = home.path().join("extra.json");
    std::fs::write(
        &file,
        r#"[{"date": "2024-07-10", "name": "Aniversário", "category": "national"}]"#,
    )
    .unwrap();

    let json = json_output(
        &home,
        &["metrics", "2024-07-08", "2024-07-12", "--holidays", file.to_str().unwrap()],
    );
    assert_eq!(json["holiday_days"], 1);
}

#[test]
fn split_shift_and_fraction() {
    let home = TempDir::new().unwrap();

    let split = json_output(&home, &["split", "2024-07-01", "2024-07-14"]);
    assert_eq!(split["first"]["start"], "2024-07-01");

    let shift = json_output(&home, &["shift", "2024-07-10", "2024-07-14", "--window", "3"]);
    assert_eq!(shift["start"], "2024-07-08");
    assert_eq!(shift["days_shifted"], -2);

    let fraction = json_output(&home, &["fraction", "--year", "2024", "--count", "4", "--length", "5"]);
    assert_eq!(fraction["periods"].as_array().unwrap().len(), 4);
}

#[test]
fn config_set_get_and_reset() {
    let home = TempDir::new().unwrap();

    cli(&home)
        .args(["config", "set", "weights.holiday", "1.5"])
        .assert()
        .success()
        .stdout("ok\n");
    cli(&home)
        .args(["config", "get", "weights.holiday"])
        .assert()
        .success()
        .stdout("1.5\n");
    assert!(home.path().join("settings.toml").exists());

    cli(&home).args(["config", "reset"]).assert().success();
    cli(&home)
        .args(["config", "get", "weights.holiday"])
        .assert()
        .success()
        .stdout("1.0\n");
}

#[test]
fn config_rejects_unknown_key_and_bad_value() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .args(["config", "set", "optimizer.nope", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown configuration key"));
    cli(&home)
        .args(["config", "set", "optimizer.max_results", "0"])
        .assert()
        .failure();
}

#[test]
fn config_path_points_into_home() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("settings.toml"));
}

#[test]
fn completions_for_bash() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("leaveplan-cli"));
}
