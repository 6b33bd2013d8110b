//! Integration tests for the `chronos` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to drive every subcommand
//! through the actual binary, covering stdin/stdout piping, file I/O,
//! configuration loading and error reporting.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

const DAY_START: &str = "2026-03-02T09:00:00Z";
const DAY_END: &str = "2026-03-02T17:00:00Z";

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn chronos() -> Command {
    Command::cargo_bin("chronos").unwrap()
}

fn stdout_json(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).expect("stdout must be JSON")
}

// ─────────────────────────────────────────────────────────────────────────────
// freebusy
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn freebusy_partitions_the_day() {
    let blocks = stdout_json(chronos().args([
        "freebusy",
        "-i",
        fixture("events.json").as_str(),
        "--start",
        DAY_START,
        "--end",
        DAY_END,
    ]));

    let blocks = blocks.as_array().unwrap();
    // free 9-12, lunch, free 13-14, review, sync, free 15:30-17
    assert_eq!(blocks.len(), 6);
    assert_eq!(blocks[0]["start"], DAY_START);
    assert_eq!(blocks[0]["end"], "2026-03-02T12:00:00Z");
    assert_eq!(blocks[0]["busy"], false);
    assert_eq!(blocks[1]["busy"], true);
    assert_eq!(blocks[5]["start"], "2026-03-02T15:30:00Z");
    assert_eq!(blocks[5]["end"], DAY_END);
}

#[test]
fn freebusy_reads_stdin_and_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("blocks.json");
    let events = std::fs::read_to_string(fixture("events.json")).unwrap();

    chronos()
        .args(["freebusy", "--start", DAY_START, "--end", DAY_END, "-o"])
        .arg(&out)
        .write_stdin(events)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(written.as_array().unwrap().len(), 6);
}

#[test]
fn freebusy_rejects_reversed_window() {
    chronos()
        .args([
            "freebusy",
            "-i",
            fixture("events.json").as_str(),
            "--start",
            DAY_END,
            "--end",
            DAY_START,
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid time window"));
}

// ─────────────────────────────────────────────────────────────────────────────
// conflicts
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn conflicts_groups_overlapping_meetings() {
    let groups = stdout_json(chronos().args(["conflicts", "-i", fixture("events.json").as_str()]));

    let groups = groups.as_array().unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0][0]["id"], "review");
    assert_eq!(groups[0][1]["id"], "sync");
}

#[test]
fn conflicts_on_empty_calendar_is_empty() {
    chronos()
        .arg("conflicts")
        .write_stdin("[]")
        .assert()
        .success()
        .stdout(predicate::str::contains("[]"));
}

#[test]
fn malformed_events_json_fails() {
    chronos()
        .arg("conflicts")
        .write_stdin("{not json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid events JSON"));
}

// ─────────────────────────────────────────────────────────────────────────────
// slots
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn slots_ranks_morning_first() {
    let slots = stdout_json(chronos().args([
        "slots",
        "-i",
        fixture("events.json").as_str(),
        "--start",
        DAY_START,
        "--end",
        DAY_END,
        "--duration",
        "30",
        "--work-hours",
        "9-17",
        "--timezone",
        "UTC",
    ]));

    let slots = slots.as_array().unwrap();
    // 6 in 9-12, 2 in 13-14, 3 in 15:30-17
    assert_eq!(slots.len(), 11);
    assert_eq!(slots[0]["start"], DAY_START);
    assert_eq!(slots[0]["end"], "2026-03-02T09:30:00Z");
    assert_eq!(slots[0]["score"], 140);
}

#[test]
fn slots_work_hours_drop_whole_blocks() {
    // The 9-12 block starts before 10 and is skipped as a whole.
    let slots = stdout_json(chronos().args([
        "slots",
        "-i",
        fixture("events.json").as_str(),
        "--start",
        DAY_START,
        "--end",
        DAY_END,
        "-d",
        "30",
        "--work-hours",
        "10-17",
        "--limit",
        "1",
    ]));

    let slots = slots.as_array().unwrap();
    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0]["start"], "2026-03-02T13:30:00Z");
    assert_eq!(slots[0]["score"], 120);
}

#[test]
fn slots_human_prints_readable_lines() {
    chronos()
        .args([
            "slots",
            "-i",
            fixture("events.json").as_str(),
            "--start",
            DAY_START,
            "--end",
            DAY_END,
            "-d",
            "30",
            "--timezone",
            "UTC",
            "--limit",
            "2",
            "--human",
        ])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Mon Mar 2, 9:00\u{2013}9:30 AM (score 140)\nMon Mar 2, 9:30\u{2013}10:00 AM (score 140)",
        ));
}

#[test]
fn slots_take_work_hours_from_config() {
    let slots = stdout_json(chronos().args([
        "--config",
        fixture("config.toml").as_str(),
        "slots",
        "-i",
        fixture("events.json").as_str(),
        "--start",
        "2026-03-02T07:00:00Z",
        "--end",
        DAY_END,
        "-d",
        "60",
    ]));

    // The 7-12 block starts before 9 and is dropped.
    let starts: Vec<&str> = slots
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["start"].as_str().unwrap())
        .collect();
    assert!(!starts.is_empty());
    assert!(starts.iter().all(|s| *s >= "2026-03-02T13:00:00Z"));
}

#[test]
fn slots_rejects_bad_work_hours() {
    chronos()
        .args([
            "slots",
            "-i",
            fixture("events.json").as_str(),
            "--start",
            DAY_START,
            "--end",
            DAY_END,
            "-d",
            "30",
            "--work-hours",
            "9to17",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Work hours must look like 9-17"));
}

#[test]
fn slots_rejects_unknown_timezone() {
    chronos()
        .args([
            "slots",
            "-i",
            fixture("events.json").as_str(),
            "--start",
            DAY_START,
            "--end",
            DAY_END,
            "-d",
            "30",
            "--timezone",
            "Mars/Olympus_Mons",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid timezone"));
}

// ─────────────────────────────────────────────────────────────────────────────
// resolve
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn resolve_tomorrow() {
    let range = stdout_json(chronos().args([
        "resolve",
        "tomorrow",
        "--now",
        "2026-03-02T10:00:00Z",
        "--timezone",
        "UTC",
    ]));

    assert_eq!(range["start"], "2026-03-03T00:00:00Z");
    assert!(range["end"]
        .as_str()
        .unwrap()
        .starts_with("2026-03-03T23:59:59"));
}

#[test]
fn resolve_human_formats_in_the_requested_zone() {
    chronos()
        .args([
            "resolve",
            "tomorrow",
            "--now",
            "2026-03-02T10:00:00Z",
            "--timezone",
            "America/New_York",
            "--human",
        ])
        .assert()
        .success()
        .stdout("Mar 3, 2026 12:00 AM to Mar 3, 2026 11:59 PM\n");
}

#[test]
fn resolve_unknown_phrase_fails() {
    chronos()
        .args(["resolve", "someday", "--now", "2026-03-02T10:00:00Z"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not resolve date phrase"));
}

// ─────────────────────────────────────────────────────────────────────────────
// normalize
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn normalize_google_payload() {
    let events = stdout_json(chronos().args([
        "normalize",
        "-i",
        fixture("google.json").as_str(),
        "--calendar-id",
        "primary",
    ]));

    let events = events.as_array().unwrap();
    assert_eq!(events.len(), 2, "cancelled event is dropped");
    assert_eq!(events[0]["id"], "g1");
    assert_eq!(events[0]["startTime"], "2026-03-02T14:00:00Z");
    assert_eq!(events[0]["timezone"], "America/New_York");
    assert_eq!(events[0]["calendarId"], "primary");
    assert_eq!(events[1]["allDay"], true);
    assert_eq!(events[1]["endTime"], "2026-03-05T23:59:59Z");
}

// ─────────────────────────────────────────────────────────────────────────────
// tool
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn tool_freebusy_against_events_file() {
    let output = stdout_json(chronos().args([
        "tool",
        "-i",
        fixture("freebusy_call.json").as_str(),
        "--events",
        fixture("events.json").as_str(),
    ]));

    assert_eq!(output["kind"], "free_busy");
    let busy = output["busy"].as_array().unwrap();
    assert_eq!(busy.len(), 3);
    assert!(busy.iter().all(|b| b["busy"] == true));
}

#[test]
fn tool_respects_call_budget() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(&config, "max_tool_calls = 0\n").unwrap();

    chronos()
        .arg("--config")
        .arg(&config)
        .args(["tool", "-i", fixture("freebusy_call.json").as_str()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Tool budget exceeded"));
}

#[test]
fn tool_rejects_unknown_tool() {
    chronos()
        .arg("tool")
        .write_stdin(r#"{"tool":"book_flight"}"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid tool call JSON"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Global flags
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn missing_config_file_fails() {
    chronos()
        .args(["--config", "/nonexistent/chronos.toml", "conflicts"])
        .write_stdin("[]")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load config"));
}

#[test]
fn verbose_logs_to_stderr() {
    chronos()
        .args(["-v", "conflicts", "-i", fixture("events.json").as_str()])
        .assert()
        .success()
        .stderr(predicate::str::contains("DEBUG"));
}

#[test]
fn help_lists_subcommands() {
    chronos()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("freebusy"))
        .stdout(predicate::str::contains("slots"))
        .stdout(predicate::str::contains("resolve"));
}
