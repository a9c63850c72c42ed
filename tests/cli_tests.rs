use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

mod common;
use common::{init_db_with_project, protrak, setup_test_db, temp_out};

#[test]
fn test_init_creates_database() {
    let db_path = setup_test_db("cli_init");

    protrak()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"));

    assert!(std::path::Path::new(&db_path).exists());
}

#[test]
fn test_activities_listed() {
    protrak()
        .args(["activities"])
        .assert()
        .success()
        .stdout(contains("work").and(contains("break")));
}

#[test]
fn test_client_and_project_roundtrip() {
    let db_path = setup_test_db("cli_client_project");
    init_db_with_project(&db_path);

    protrak()
        .args(["--db", &db_path, "project", "get", "1"])
        .assert()
        .success()
        .stdout(contains("Website").and(contains("Acme")));

    protrak()
        .args(["--db", &db_path, "client", "list", "--name", "acm"])
        .assert()
        .success()
        .stdout(contains("Acme"))
        .stdout(contains("Showing 1 of 1 client(s)."));

    protrak()
        .args(["--db", &db_path, "project", "new"])
        .assert()
        .success()
        .stdout(contains("New Project"));

    protrak()
        .args(["--db", &db_path, "project", "list", "--limit", "1", "--offset", "1"])
        .assert()
        .success()
        .stdout(contains("New Project"))
        .stdout(contains("Showing 1 of 2 project(s)."));
}

#[test]
fn test_start_twice_rejected_then_stop() {
    let db_path = setup_test_db("cli_start_stop");
    init_db_with_project(&db_path);

    protrak()
        .args(["--db", &db_path, "slot", "start", "-p", "1"])
        .assert()
        .success()
        .stdout(contains("started"));

    protrak()
        .args(["--db", &db_path, "slot", "start", "-p", "1", "--activity", "break"])
        .assert()
        .failure()
        .stderr(contains("open slot exists"));

    protrak()
        .args(["--db", &db_path, "slot", "open", "-p", "1"])
        .assert()
        .success()
        .stdout(contains("open"));

    protrak()
        .args(["--db", &db_path, "slot", "stop", "-p", "1"])
        .assert()
        .success()
        .stdout(contains("stopped"));

    protrak()
        .args(["--db", &db_path, "slot", "open", "-p", "1"])
        .assert()
        .success()
        .stdout(contains("has no open slot"));
}

#[test]
fn test_add_slot_ending_before_start_fails() {
    let db_path = setup_test_db("cli_end_before_start");
    init_db_with_project(&db_path);

    protrak()
        .args([
            "--db",
            &db_path,
            "slot",
            "add",
            "-p",
            "1",
            "--start",
            "2024-01-01T10:00:00Z",
            "--end",
            "2024-01-01T09:00:00Z",
        ])
        .assert()
        .failure()
        .stderr(contains("slot ends before start"));

    protrak()
        .args(["--db", &db_path, "slot", "list"])
        .assert()
        .success()
        .stdout(contains("No slots found."));
}

fn add_closed_slot(db_path: &str, start: &str, end: &str, description: &str) {
    protrak()
        .args([
            "--db",
            db_path,
            "slot",
            "add",
            "-p",
            "1",
            "--start",
            start,
            "--end",
            end,
            "--description",
            description,
        ])
        .assert()
        .success();
}

#[test]
fn test_slot_list_sort_and_filters() {
    let db_path = setup_test_db("cli_slot_list");
    init_db_with_project(&db_path);
    add_closed_slot(&db_path, "2024-01-01T08:00:30Z", "2024-01-01T09:00:00Z", "early");
    add_closed_slot(&db_path, "2024-01-01T13:00:00Z", "2024-01-01T14:00:00Z", "late");

    protrak()
        .args(["--db", &db_path, "slot", "list", "--sort=-start", "--limit", "1"])
        .assert()
        .success()
        .stdout(contains("late").and(contains("early").not()))
        .stdout(contains("Showing 1 of 2 slot(s)."));

    protrak()
        .args([
            "--db",
            &db_path,
            "slot",
            "list",
            "--start-time",
            "2024-01-01T12:00:00Z",
            "--start-cmp",
            "le",
        ])
        .assert()
        .success()
        .stdout(contains("early").and(contains("late").not()))
        .stdout(contains("2024-01-01T08:00:00Z"));

    protrak()
        .args(["--db", &db_path, "slot", "list", "--sort", "foo"])
        .assert()
        .failure()
        .stderr(contains("field foo not found"));
}

#[test]
fn test_slot_get_checks_project() {
    let db_path = setup_test_db("cli_slot_get");
    init_db_with_project(&db_path);
    add_closed_slot(&db_path, "2024-01-01T08:00:00Z", "2024-01-01T09:00:00Z", "standup");

    protrak()
        .args(["--db", &db_path, "slot", "get", "1", "-p", "1"])
        .assert()
        .success()
        .stdout(contains("standup"));

    protrak()
        .args(["--db", &db_path, "slot", "get", "1", "-p", "2"])
        .assert()
        .failure()
        .stderr(contains("Not found"));
}

#[test]
fn test_project_with_slots_cannot_be_deleted() {
    let db_path = setup_test_db("cli_project_delete");
    init_db_with_project(&db_path);
    add_closed_slot(&db_path, "2024-01-01T08:00:00Z", "2024-01-01T09:00:00Z", "work");

    protrak()
        .args(["--db", &db_path, "project", "delete", "1"])
        .assert()
        .failure();

    protrak()
        .args(["--db", &db_path, "slot", "delete", "1", "-p", "1"])
        .assert()
        .success();

    protrak()
        .args(["--db", &db_path, "project", "delete", "1"])
        .assert()
        .success()
        .stdout(contains("Project #1 deleted."));
}

#[test]
fn test_slot_export_csv_and_overwrite_guard() {
    let db_path = setup_test_db("cli_slot_export");
    init_db_with_project(&db_path);
    add_closed_slot(&db_path, "2024-01-01T08:00:00Z", "2024-01-01T09:00:00Z", "review");

    let out = temp_out("cli_slot_export", "csv");

    protrak()
        .args(["--db", &db_path, "slot", "export", "--format", "csv", "--file", &out])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported csv");
    assert_eq!(
        content,
        "id,projectId,activity,start,end,description\n\
         1,1,work,2024-01-01T08:00:00Z,2024-01-01T09:00:00Z,review\n"
    );

    protrak()
        .args(["--db", &db_path, "slot", "export", "--format", "json", "--file", &out])
        .assert()
        .failure()
        .stderr(contains("already exists"));

    protrak()
        .args([
            "--db", &db_path, "slot", "export", "--format", "json", "--file", &out, "--force",
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported json");
    assert!(content.contains("\"projectId\": 1"));
}

#[test]
fn test_activity_lookup_by_id() {
    protrak()
        .args(["activities", "Work"])
        .assert()
        .success()
        .stdout(contains("work").and(contains("break").not()));

    protrak()
        .args(["activities", "nap"])
        .assert()
        .failure()
        .stderr(contains("Unknown activity: nap"));
}

#[test]
fn test_slot_list_accepts_operator_symbols() {
    let db_path = setup_test_db("cli_slot_cmp_symbols");
    init_db_with_project(&db_path);
    add_closed_slot(&db_path, "2024-01-01T08:00:00Z", "2024-01-01T09:00:00Z", "early");
    add_closed_slot(&db_path, "2024-01-01T13:00:00Z", "2024-01-01T14:00:00Z", "late");

    protrak()
        .args([
            "--db",
            &db_path,
            "slot",
            "list",
            "--end-time",
            "2024-01-01T09:00:00Z",
            "--end-cmp",
            "<=",
        ])
        .assert()
        .success()
        .stdout(contains("early").and(contains("late").not()));

    protrak()
        .args(["--db", &db_path, "slot", "list", "--end-cmp", "between"])
        .assert()
        .failure()
        .stderr(contains("between"));
}

#[test]
fn test_repeated_local_time_resolves_to_first_occurrence() {
    let db_path = setup_test_db("cli_dst_overlap");
    init_db_with_project(&db_path);

    // Central European time; 02:30 on 2024-10-27 happens twice.
    protrak()
        .env("TZ", "CET-1CEST,M3.5.0,M10.5.0/3")
        .args([
            "--db",
            &db_path,
            "slot",
            "add",
            "-p",
            "1",
            "--start",
            "2024-10-27 02:30",
            "--end",
            "2024-10-27 04:00",
        ])
        .assert()
        .success();

    protrak()
        .args(["--db", &db_path, "slot", "get", "1", "-p", "1"])
        .assert()
        .success()
        .stdout(contains("2024-10-27T00:30:00Z"))
        .stdout(contains("2024-10-27T03:00:00Z"));
}
