use super::page::{Page, PageResult};
use super::query::{ConditionBuilder, Conditional, NamedParams, ToConditional};
use super::repository::{
    CrudRepository, ListQuery, expect_deleted, expect_updated, parse_column,
    parse_optional_column,
};
use super::sort::{SortColumns, SortField};
use super::tx::Tx;
use crate::errors::{AppError, AppResult};
use crate::models::{Activity, Slot, SlotFilter};
use crate::utils::time::format_timestamp;
use chrono::{DateTime, Utc};
use rusqlite::Row;

const SELECT: &str = "SELECT id, project_id, activity, started_at, ended_at, description
  FROM slot";

const COUNT: &str = "SELECT COUNT(*) AS total_count
  FROM slot";

const SLOT_SORT_FIELDS: &[SortField] = &[
    SortField::plain("id"),
    SortField::mapped("projectId", "project_id"),
    SortField::plain("activity"),
    SortField::mapped("start", "started_at"),
    SortField::mapped("end", "ended_at"),
    SortField::plain("description"),
];

/// Public slot field → storage column.
pub static SLOT_SORT_COLUMNS: SortColumns = SortColumns::new("slot", SLOT_SORT_FIELDS);

impl ToConditional for SlotFilter {
    fn to_conditional(&self) -> Conditional {
        ConditionBuilder::new()
            .equal("project_id", "projectId", self.project_id)
            .equal(
                "activity",
                "activity",
                self.activity.map(|a| a.as_str().to_string()),
            )
            .compare(
                "started_at",
                "startTime",
                self.start_time_comparator,
                self.start_time.as_ref().map(format_timestamp),
            )
            .compare(
                "ended_at",
                "endTime",
                self.end_time_comparator,
                self.end_time.as_ref().map(format_timestamp),
            )
            .open_state("ended_at", self.is_open)
            .contains("description", "description", self.description.as_deref())
            .build()
    }
}

fn parse_stored_timestamp(raw: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|_| AppError::InvalidTimestamp(raw.to_string()))
}

fn map_slot(row: &Row) -> rusqlite::Result<Slot> {
    Ok(Slot {
        id: row.get("id")?,
        project_id: row.get("project_id")?,
        activity: parse_column(row, "activity", |s| {
            Activity::from_db_str(s).ok_or_else(|| AppError::InvalidActivity(s.to_string()))
        })?,
        start: parse_column(row, "started_at", parse_stored_timestamp)?,
        end: parse_optional_column(row, "ended_at", parse_stored_timestamp)?,
        description: row.get("description")?,
    })
}

fn slot_params(item: &Slot) -> NamedParams {
    let mut params = NamedParams::new();
    params.insert("projectId", item.project_id);
    params.insert("activity", item.activity.as_str().to_string());
    params.insert("start", format_timestamp(&item.start));
    params.insert("end", item.end.as_ref().map(format_timestamp));
    params.insert("description", item.description.clone());
    params
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SlotRepository;

impl CrudRepository for SlotRepository {
    type Item = Slot;
    type Filter = SlotFilter;

    fn save(&self, tx: &Tx<'_>, item: &mut Slot) -> AppResult<()> {
        let mut params = slot_params(item);

        if item.id == 0 {
            let result = tx.execute(
                "INSERT INTO slot (project_id, activity, started_at, ended_at, description)
                 VALUES (:projectId, :activity, :start, :end, :description)",
                &params,
            )?;
            item.id = result.last_insert_id;
            return Ok(());
        }

        params.insert("id", item.id);
        let result = tx.execute(
            "UPDATE slot
                SET project_id  = :projectId,
                    activity    = :activity,
                    started_at  = :start,
                    ended_at    = :end,
                    description = :description
              WHERE id = :id",
            &params,
        )?;
        expect_updated(result)
    }

    fn get_by_id(&self, tx: &Tx<'_>, id: i64) -> AppResult<Option<Slot>> {
        if id == 0 {
            return Ok(None);
        }
        let mut params = NamedParams::new();
        params.insert("id", id);
        tx.select_one(&format!("{SELECT}\n WHERE id = :id"), &params, map_slot)
    }

    fn get_all(&self, tx: &Tx<'_>, page: &Page, filter: &SlotFilter) -> AppResult<PageResult<Slot>> {
        let order_by = if page.sort.is_empty() {
            "ORDER BY started_at, id".to_string()
        } else {
            SLOT_SORT_COLUMNS.order_by(&page.sort)?
        };
        let query = ListQuery {
            select: SELECT,
            count: COUNT,
            order_by,
        };
        query.fetch(tx, page, &filter.to_conditional(), map_slot)
    }

    fn delete(&self, tx: &Tx<'_>, id: i64) -> AppResult<()> {
        let mut params = NamedParams::new();
        params.insert("id", id);
        let result = tx.execute("DELETE FROM slot WHERE id = :id", &params)?;
        expect_deleted(result)
    }
}
