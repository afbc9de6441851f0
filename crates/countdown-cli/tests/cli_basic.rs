//! Basic CLI E2E tests.
//!
//! Each test runs the binary against its own temporary data directory.

mod common;

use common::{assert_contains, parse_json, run_cli_failure, run_cli_success};
use serde_json::Value;

fn add_timer(dir: &std::path::Path, name: &str, duration: &str, category: &str) -> u64 {
    let out = run_cli_success(dir, &["timer", "add", name, "-d", duration, "-c", category]);
    let timer: Value = parse_json(&out);
    assert_eq!(timer["status"], "idle");
    timer["id"].as_u64().unwrap()
}

#[test]
fn test_add_and_list_grouped() {
    let dir = tempfile::tempdir().unwrap();
    add_timer(dir.path(), "Tea", "60", "Drinks");
    add_timer(dir.path(), "Plank", "30", "Workout");
    add_timer(dir.path(), "Coffee", "120", "Drinks");

    let out = run_cli_success(dir.path(), &["timer", "list", "--json"]);
    let groups: Vec<Value> = parse_json(&out);
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0]["category"], "Drinks");
    assert_eq!(groups[0]["timers"].as_array().unwrap().len(), 2);
    assert_eq!(groups[1]["category"], "Workout");

    let text = run_cli_success(dir.path(), &["timer", "list"]);
    assert_contains(&text, "Drinks");
    assert_contains(&text, "Plank");
}

#[test]
fn test_add_rejects_blank_name() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, _) = run_cli_failure(dir.path(), &["timer", "add", "  ", "-c", "x"]);
    assert_contains(&stderr, "name");
}

#[test]
fn test_tea_runs_to_history() {
    let dir = tempfile::tempdir().unwrap();
    let id = add_timer(dir.path(), "Tea", "60", "Drinks").to_string();

    let started: Value = parse_json(&run_cli_success(dir.path(), &["timer", "start", &id]));
    assert_eq!(started["type"], "timer_started");

    let out = run_cli_success(dir.path(), &["timer", "tick", &id, "--count", "30"]);
    assert_contains(&out, "Halfway alert for \"Tea\"!");

    let groups: Vec<Value> = parse_json(&run_cli_success(dir.path(), &["timer", "list", "--json"]));
    let tea = &groups[0]["timers"][0];
    assert_eq!(tea["remainingTime"], 30);
    assert_eq!(tea["progress"], 0.5);

    let out = run_cli_success(dir.path(), &["timer", "tick", "--count", "30"]);
    assert_contains(&out, "Timer \"Tea\" has completed!");

    let history: Vec<Value> =
        parse_json(&run_cli_success(dir.path(), &["history", "list", "--json"]));
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["name"], "Tea");
    assert!(history[0]["completionTime"].as_str().is_some());
}

#[test]
fn test_pause_and_reset() {
    let dir = tempfile::tempdir().unwrap();
    let id = add_timer(dir.path(), "Bread", "10", "Kitchen").to_string();
    run_cli_success(dir.path(), &["timer", "start", &id]);
    run_cli_success(dir.path(), &["timer", "tick", "--count", "3"]);
    let paused: Value = parse_json(&run_cli_success(dir.path(), &["timer", "pause", &id]));
    assert_eq!(paused["remaining_secs"], 7);

    run_cli_success(dir.path(), &["timer", "tick", "--count", "3"]);
    let groups: Vec<Value> = parse_json(&run_cli_success(dir.path(), &["timer", "list", "--json"]));
    assert_eq!(groups[0]["timers"][0]["remainingTime"], 7);

    run_cli_success(dir.path(), &["timer", "reset", &id]);
    let groups: Vec<Value> = parse_json(&run_cli_success(dir.path(), &["timer", "list", "--json"]));
    assert_eq!(groups[0]["timers"][0]["remainingTime"], 10);
    assert_eq!(groups[0]["timers"][0]["status"], "idle");
}

#[test]
fn test_unknown_id_is_noop() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_cli_success(dir.path(), &["timer", "start", "12345"]);
    assert!(out.is_empty());
}

#[test]
fn test_history_empty_and_clear() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_cli_success(dir.path(), &["history", "list"]);
    assert_contains(&out, "No completed timers yet.");
    run_cli_success(dir.path(), &["history", "clear"]);
}

#[test]
fn test_run_finishes_short_timer() {
    let dir = tempfile::tempdir().unwrap();
    run_cli_success(dir.path(), &["config", "set", "ticker.interval_ms", "10"]);
    let id = add_timer(dir.path(), "Quick", "3", "Fast").to_string();
    run_cli_success(dir.path(), &["timer", "start", &id]);

    let out = run_cli_success(dir.path(), &["timer", "run"]);
    assert_contains(&out, "Timer \"Quick\" has completed!");

    let history: Vec<Value> =
        parse_json(&run_cli_success(dir.path(), &["history", "list", "--json"]));
    assert_eq!(history.len(), 1);
}

#[test]
fn test_config_get_set() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_cli_success(dir.path(), &["config", "get", "history.storage_key"]);
    assert_eq!(out.trim(), "completedTimers");
    run_cli_success(dir.path(), &["config", "set", "notifications.halfway", "false"]);
    let out = run_cli_success(dir.path(), &["config", "get", "notifications.halfway"]);
    assert_eq!(out.trim(), "false");
    run_cli_failure(dir.path(), &["config", "get", "nope"]);

    let presets = run_cli_success(dir.path(), &["timer", "presets"]);
    assert_contains(&presets, "60s (default)");
}
