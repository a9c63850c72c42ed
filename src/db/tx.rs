//! Transaction handle handed to repositories.
//!
//! Commit and rollback are not reachable from here; the owner of the
//! transaction (`Database::with_transaction`) decides. Every statement is
//! logged at `debug` together with its bound parameters.

use super::query::NamedParams;
use crate::errors::AppResult;
use rusqlite::{OptionalExtension, Row, Transaction};
use tracing::debug;

/// Outcome of an INSERT/UPDATE/DELETE.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecResult {
    pub last_insert_id: i64,
    pub rows_affected: usize,
}

pub struct Tx<'c> {
    inner: Transaction<'c>,
}

impl<'c> Tx<'c> {
    pub(crate) fn new(inner: Transaction<'c>) -> Self {
        Self { inner }
    }

    pub fn select<T, F>(&self, sql: &str, params: &NamedParams, map: F) -> AppResult<Vec<T>>
    where
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        debug!(target: "protrak::sql", query = sql, args = %params, "select");
        let mut stmt = self.inner.prepare(sql)?;
        let refs = params.as_refs();
        let rows = stmt.query_map(refs.as_slice(), map)?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    pub fn select_one<T, F>(&self, sql: &str, params: &NamedParams, map: F) -> AppResult<Option<T>>
    where
        F: FnOnce(&Row<'_>) -> rusqlite::Result<T>,
    {
        debug!(target: "protrak::sql", query = sql, args = %params, "select one");
        let refs = params.as_refs();
        let row = self.inner.query_row(sql, refs.as_slice(), map).optional()?;
        Ok(row)
    }

    pub fn count(&self, sql: &str, params: &NamedParams) -> AppResult<i64> {
        debug!(target: "protrak::sql", query = sql, args = %params, "count");
        let refs = params.as_refs();
        let total = self.inner.query_row(sql, refs.as_slice(), |row| row.get(0))?;
        Ok(total)
    }

    pub fn execute(&self, sql: &str, params: &NamedParams) -> AppResult<ExecResult> {
        debug!(target: "protrak::sql", query = sql, args = %params, "exec");
        let refs = params.as_refs();
        let rows_affected = self.inner.execute(sql, refs.as_slice())?;
        Ok(ExecResult {
            last_insert_id: self.inner.last_insert_rowid(),
            rows_affected,
        })
    }

    /// Rows reported by `PRAGMA foreign_key_check`, formatted for messages.
    pub(crate) fn foreign_key_violations(&self) -> AppResult<Vec<String>> {
        let mut stmt = self.inner.prepare("PRAGMA foreign_key_check;")?;
        let rows = stmt.query_map([], |row| {
            let table: String = row.get(0)?;
            let row_id: Option<i64> = row.get(1)?;
            let parent: String = row.get(2)?;
            let fk_id: i64 = row.get(3)?;
            Ok(format!(
                "{{Table: {table}, RowId: {}, Parent: {parent}, FkId: {fk_id}}}",
                row_id.map_or_else(|| "-".to_string(), |id| id.to_string())
            ))
        })?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    pub(crate) fn commit(self) -> AppResult<()> {
        self.inner.commit()?;
        Ok(())
    }
}
