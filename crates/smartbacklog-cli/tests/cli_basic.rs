//! Basic CLI E2E tests.
//!
//! Each test points `SMARTBACKLOG_HOME` at its own temp directory and pins
//! `--today`, so runs are isolated and rankings are reproducible.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

const TODAY: &str = "2026-10-16";

fn cli(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("smartbacklog").unwrap();
    cmd.env("SMARTBACKLOG_HOME", home.path())
        .env_remove("SMARTBACKLOG_LOG")
        .args(["--today", TODAY]);
    cmd
}

/// Run a command that must succeed and parse its stdout as JSON.
fn run_json(home: &TempDir, args: &[&str]) -> Value {
    let output = cli(home).args(args).assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).expect("stdout is JSON")
}

#[test]
fn test_task_add_and_list() {
    let home = TempDir::new().unwrap();
    let task = run_json(
        &home,
        &["task", "add", "Physics", "--size", "5", "--difficulty", "10", "--days", "2"],
    );
    assert_eq!(task["subject"], "Physics");
    assert_eq!(task["due_date"], "2026-10-18");
    assert_eq!(task["owner"], "student");

    let list = run_json(&home, &["task", "list"]);
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["score"], 250.0);
    assert_eq!(list[0]["days_left"], 2);
}

#[test]
fn test_task_add_requires_a_due_date() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .args(["task", "add", "Physics", "--size", "5", "--difficulty", "3"])
        .assert()
        .failure();
}

#[test]
fn test_task_add_rejects_bad_difficulty() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .args(["task", "add", "Physics", "--size", "5", "--difficulty", "11", "--days", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("difficulty"));
}

#[test]
fn test_done_and_undo() {
    let home = TempDir::new().unwrap();
    let task = run_json(
        &home,
        &["task", "add", "History", "--size", "2", "--difficulty", "4", "--due", "2026-10-20"],
    );
    let id = task["id"].to_string();

    let done = run_json(&home, &["task", "done", &id]);
    assert_eq!(done["completed"], true);
    assert!(run_json(&home, &["task", "list"]).as_array().unwrap().is_empty());
    assert_eq!(run_json(&home, &["task", "list", "--all"]).as_array().unwrap().len(), 1);

    let undone = run_json(&home, &["task", "undo", &id]);
    assert_eq!(undone["completed"], false);
}

#[test]
fn test_other_students_tasks_are_not_found() {
    let home = TempDir::new().unwrap();
    let task = run_json(
        &home,
        &["--owner", "amal", "task", "add", "Art", "--size", "1", "--difficulty", "2", "--days", "1"],
    );
    let id = task["id"].to_string();

    cli(&home)
        .args(["--owner", "omar", "task", "delete", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));

    let deleted = run_json(&home, &["--owner", "amal", "task", "delete", &id]);
    assert_eq!(deleted["subject"], "Art");
}

#[test]
fn test_distribute_front_loads_units() {
    let home = TempDir::new().unwrap();
    let tasks = run_json(
        &home,
        &["distribute", "Chemistry", "--units", "20", "--difficulty", "5", "--deadline", "2026-10-19"],
    );
    let tasks = tasks.as_array().unwrap();
    assert_eq!(tasks.len(), 20);
    let on = |date: &str| tasks.iter().filter(|t| t["due_date"] == date).count();
    assert_eq!(on("2026-10-16"), 7);
    assert_eq!(on("2026-10-17"), 7);
    assert_eq!(on("2026-10-18"), 6);
    assert_eq!(tasks[0]["subject"], "Chemistry - part 1");
}

#[test]
fn test_distribute_rejects_deadline_today() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .args(["distribute", "Chemistry", "--units", "5", "--difficulty", "5", "--deadline", TODAY])
        .assert()
        .failure()
        .stderr(predicate::str::contains("deadline"));

    assert!(run_json(&home, &["task", "list", "--all"]).as_array().unwrap().is_empty());
}

#[test]
fn test_distribute_dry_run_stores_nothing() {
    let home = TempDir::new().unwrap();
    let plan = run_json(
        &home,
        &["distribute", "Maths", "--units", "5", "--difficulty", "7", "--deadline", "2026-10-26", "--dry-run"],
    );
    assert_eq!(plan["days_available"], 10);
    assert_eq!(plan["daily_quota"], 1);
    assert_eq!(plan["tasks"].as_array().unwrap().len(), 5);

    assert!(run_json(&home, &["task", "list"]).as_array().unwrap().is_empty());
}

#[test]
fn test_summary() {
    let home = TempDir::new().unwrap();
    run_json(
        &home,
        &["distribute", "Biology", "--units", "3", "--difficulty", "6", "--deadline", "2026-10-19"],
    );
    let summary = run_json(&home, &["summary"]);
    assert_eq!(summary["total_tasks"], 3);
    assert_eq!(summary["open_units"], 3);
    assert_eq!(summary["most_urgent"]["subject"], "Biology - part 1");
}

#[test]
fn test_admin_commands_need_admin() {
    let home = TempDir::new().unwrap();
    cli(&home).args(["admin", "clear"]).assert().failure();

    cli(&home)
        .args(["--admin", "admin", "seed", "--seed", "7", "--count", "10"])
        .assert()
        .success()
        .stderr(predicate::str::contains("seeded 10"));

    let everything = run_json(&home, &["--admin", "task", "list"]);
    assert_eq!(everything.as_array().unwrap().len(), 10);

    cli(&home)
        .args(["--admin", "admin", "clear"])
        .assert()
        .success()
        .stderr(predicate::str::contains("removed 10"));
}

#[test]
fn test_admin_import() {
    let home = TempDir::new().unwrap();
    let file = home.path().join("legacy.csv");
    std::fs::write(
        &file,
        "subject,lessons,difficulty,days,priority,student\nPhysics,6,8,4,12.0,amal\n",
    )
    .unwrap();

    let imported = run_json(&home, &["--admin", "admin", "import", file.to_str().unwrap()]);
    assert_eq!(imported[0]["owner"], "amal");
    assert_eq!(imported[0]["due_date"], "2026-10-20");
}

#[test]
fn test_config_set_and_get() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .args(["config", "get", "distribution.policy"])
        .assert()
        .success()
        .stdout("front_loaded\n");

    cli(&home)
        .args(["config", "set", "session.default_owner", "amal"])
        .assert()
        .success();
    let task = run_json(
        &home,
        &["task", "add", "Maths", "--size", "1", "--difficulty", "1", "--days", "1"],
    );
    assert_eq!(task["owner"], "amal");

    cli(&home)
        .args(["config", "set", "distribution.max_total_units", "lots"])
        .assert()
        .failure();
    cli(&home)
        .args(["config", "get", "no.such.key"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown configuration key: no.such.key"));
}

#[test]
fn test_admin_import_missing_file() {
    let home = TempDir::new().unwrap();
    let missing = home.path().join("nope.csv");
    cli(&home)
        .args(["--admin", "admin", "import", missing.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("IO error"));
}
