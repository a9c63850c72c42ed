//! Schema migrations, tracked through `PRAGMA user_version`.
//!
//! Each entry runs once, in order, inside its own transaction. Appending is
//! the only allowed change; applied entries are never edited.

use crate::errors::{AppError, AppResult};
use rusqlite::Connection;
use tracing::info;

struct Migration {
    name: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        name: "create client, project and slot tables",
        sql: r#"
        CREATE TABLE IF NOT EXISTS client (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT NOT NULL,
            description TEXT
        );

        CREATE TABLE IF NOT EXISTS project (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT NOT NULL,
            client_id   INTEGER REFERENCES client(id),
            description TEXT
        );

        CREATE TABLE IF NOT EXISTS slot (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            project_id  INTEGER NOT NULL REFERENCES project(id),
            activity    TEXT NOT NULL CHECK(activity IN ('work','break')),
            started_at  TEXT NOT NULL,
            ended_at    TEXT,
            description TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_project_client ON project(client_id);
        CREATE INDEX IF NOT EXISTS idx_slot_project_start ON slot(project_id, started_at);
        "#,
    },
    Migration {
        name: "at most one open slot per project",
        sql: r#"
        CREATE UNIQUE INDEX IF NOT EXISTS idx_slot_single_open
            ON slot(project_id) WHERE ended_at IS NULL;
        "#,
    },
];

/// Latest schema version this build knows about.
pub fn latest_version() -> u32 {
    MIGRATIONS.len() as u32
}

/// Apply every migration newer than the database's `user_version`.
/// Returns the number of migrations applied.
pub fn run_pending_migrations(conn: &mut Connection) -> AppResult<u32> {
    let current: u32 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;

    if current > latest_version() {
        return Err(AppError::Migration(format!(
            "database schema version {current} is newer than supported version {}",
            latest_version()
        )));
    }

    let mut applied = 0;
    for (idx, migration) in MIGRATIONS.iter().enumerate().skip(current as usize) {
        let version = idx as u32 + 1;

        let tx = conn.transaction()?;
        tx.execute_batch(migration.sql)
            .map_err(|e| AppError::Migration(format!("{}: {e}", migration.name)))?;
        tx.execute_batch(&format!("PRAGMA user_version = {version};"))?;
        tx.commit()?;

        info!(version, name = migration.name, "Applied migration");
        applied += 1;
    }

    Ok(applied)
}
