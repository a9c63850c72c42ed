//! SQLite connection wrapper: one connection per process, one transaction per
//! request.

use super::migrate::run_pending_migrations;
use super::tx::Tx;
use crate::errors::{AppError, AppResult};
use rusqlite::{Connection, TransactionBehavior};
use std::path::Path;
use tracing::debug;

pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) the database file, enable foreign keys and bring the
    /// schema up to date.
    pub fn open(path: &str) -> AppResult<Self> {
        let conn = Connection::open(Path::new(path))?;
        Self::setup(conn)
    }

    pub fn open_in_memory() -> AppResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::setup(conn)
    }

    fn setup(mut conn: Connection) -> AppResult<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        run_pending_migrations(&mut conn)?;
        Ok(Self { conn })
    }

    pub fn schema_version(&self) -> AppResult<u32> {
        let v = self
            .conn
            .query_row("PRAGMA user_version", [], |row| row.get(0))?;
        Ok(v)
    }

    /// Run `body` inside one transaction.
    ///
    /// The transaction starts with `BEGIN IMMEDIATE`, so the write lock is held
    /// from the first read on and check-then-write sequences cannot interleave
    /// with another writer. Any error from `body`, or a violation reported by
    /// `PRAGMA foreign_key_check` afterwards, rolls everything back.
    pub fn with_transaction<T, F>(&mut self, body: F) -> AppResult<T>
    where
        F: FnOnce(&Tx<'_>) -> AppResult<T>,
    {
        debug!("Begin transaction");
        let tx = Tx::new(
            self.conn
                .transaction_with_behavior(TransactionBehavior::Immediate)?,
        );

        // Dropping `tx` on any early return rolls back.
        let out = match body(&tx) {
            Ok(out) => out,
            Err(e) => {
                debug!(error = %e, "Rollback transaction");
                return Err(e);
            }
        };

        let violations = tx.foreign_key_violations()?;
        if !violations.is_empty() {
            debug!(count = violations.len(), "Rollback transaction: foreign key check");
            return Err(AppError::Persistence(format!(
                "foreign_key_check failed: {}",
                violations.join(", ")
            )));
        }

        tx.commit()?;
        debug!("End transaction");
        Ok(out)
    }
}
