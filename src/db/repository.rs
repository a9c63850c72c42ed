//! The storage contract every entity repository implements, plus the listing
//! and row-count helpers they share.

use super::page::{Page, PageResult};
use super::query::{Conditional, ToConditional};
use super::tx::{ExecResult, Tx};
use crate::errors::{AppError, AppResult};
use rusqlite::Row;

pub trait CrudRepository {
    type Item;
    type Filter: ToConditional;

    /// Insert when `item` has no identity yet (and write the new one back),
    /// update otherwise.
    fn save(&self, tx: &Tx<'_>, item: &mut Self::Item) -> AppResult<()>;

    /// `None` for a miss; identity 0 never matches.
    fn get_by_id(&self, tx: &Tx<'_>, id: i64) -> AppResult<Option<Self::Item>>;

    fn get_all(
        &self,
        tx: &Tx<'_>,
        page: &Page,
        filter: &Self::Filter,
    ) -> AppResult<PageResult<Self::Item>>;

    fn delete(&self, tx: &Tx<'_>, id: i64) -> AppResult<()>;
}

/// Base statements of one listing.
pub(crate) struct ListQuery<'a> {
    pub select: &'a str,
    pub count: &'a str,
    /// Empty or a full `ORDER BY ...` clause.
    pub order_by: String,
}

impl ListQuery<'_> {
    /// Run the count and the page fetch with the same conditional, in the
    /// same transaction.
    pub(crate) fn fetch<T, F>(
        &self,
        tx: &Tx<'_>,
        page: &Page,
        conditional: &Conditional,
        map: F,
    ) -> AppResult<PageResult<T>>
    where
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        let total_count = tx.count(&conditional.apply_to(self.count), &conditional.params)?;

        let mut sql = conditional.apply_to(self.select);
        if !self.order_by.is_empty() {
            sql.push('\n');
            sql.push_str(&self.order_by);
        }

        let mut params = conditional.params.clone();
        let limit = page.limit_clause(&mut params);
        if !limit.is_empty() {
            sql.push('\n');
            sql.push_str(&limit);
        }

        let items = tx.select(&sql, &params, map)?;
        Ok(PageResult { items, total_count })
    }
}

pub(crate) fn expect_updated(result: ExecResult) -> AppResult<()> {
    if result.rows_affected == 0 {
        return Err(AppError::Persistence(
            "update failed: 0 rows affected".to_string(),
        ));
    }
    Ok(())
}

pub(crate) fn expect_deleted(result: ExecResult) -> AppResult<()> {
    if result.rows_affected != 1 {
        return Err(AppError::Persistence(format!(
            "delete failed: {} rows affected",
            result.rows_affected
        )));
    }
    Ok(())
}

/// Map a stored text column through `parse`, reporting failures the way
/// rusqlite reports type conversion errors.
pub(crate) fn parse_column<T, F>(row: &Row<'_>, column: &str, parse: F) -> rusqlite::Result<T>
where
    F: FnOnce(&str) -> AppResult<T>,
{
    let raw: String = row.get(column)?;
    parse(&raw).map_err(conversion_failure)
}

/// Like [`parse_column`], with NULL mapped to `None`.
pub(crate) fn parse_optional_column<T, F>(
    row: &Row<'_>,
    column: &str,
    parse: F,
) -> rusqlite::Result<Option<T>>
where
    F: FnOnce(&str) -> AppResult<T>,
{
    let raw: Option<String> = row.get(column)?;
    raw.map(|s| parse(&s).map_err(conversion_failure))
        .transpose()
}

fn conversion_failure(e: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
}
