#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{DateTime, Utc};
use protrak::core::{ClientService, ProjectService};
use protrak::db::Database;
use protrak::models::{Client, Project};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn protrak() -> Command {
    cargo_bin_cmd!("protrak")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_protrak.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize the DB and add client #1 "Acme" with project #1 "Website"
pub fn init_db_with_project(db_path: &str) {
    protrak()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    protrak()
        .args(["--db", db_path, "client", "add", "Acme"])
        .assert()
        .success();

    protrak()
        .args(["--db", db_path, "project", "add", "Website", "--client", "1"])
        .assert()
        .success();
}

pub fn ts(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .expect("valid timestamp")
        .with_timezone(&Utc)
}

/// Clock for services under test: half a minute past ten.
pub fn fixed_now() -> DateTime<Utc> {
    ts("2024-01-01T10:00:30Z")
}

pub fn memory_db() -> Database {
    Database::open_in_memory().expect("open in-memory db")
}

/// Insert a client and one of its projects; returns the project id.
pub fn seed_project(db: &mut Database, name: &str) -> i64 {
    db.with_transaction(|tx| {
        let mut client = Client::new(format!("{name} client"));
        ClientService::new().save(tx, &mut client)?;

        let mut project = Project::new(name).for_client(client.id);
        ProjectService::new().save(tx, &mut project)?;
        Ok(project.id)
    })
    .expect("seed project")
}
