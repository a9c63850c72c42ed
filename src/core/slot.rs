//! Slot lifecycle: the single-open-slot rule and timestamp normalization.
//!
//! Every operation runs inside the caller's transaction. Transactions start
//! with `BEGIN IMMEDIATE`, so the open-slot lookup and the following write in
//! `save` see a consistent store.

use crate::db::page::{Page, PageResult};
use crate::db::repository::CrudRepository;
use crate::db::slots::SlotRepository;
use crate::db::tx::Tx;
use crate::errors::{AppError, AppResult};
use crate::models::{Activity, Slot, SlotFilter};
use crate::utils::time::normalize;
use chrono::{DateTime, Utc};
use tracing::info;

pub struct SlotService<R = SlotRepository> {
    repo: R,
    now: fn() -> DateTime<Utc>,
}

impl SlotService<SlotRepository> {
    pub fn new() -> Self {
        Self::with_repository(SlotRepository)
    }
}

impl Default for SlotService<SlotRepository> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> SlotService<R>
where
    R: CrudRepository<Item = Slot, Filter = SlotFilter>,
{
    pub fn with_repository(repo: R) -> Self {
        Self { repo, now: Utc::now }
    }

    /// Replace the clock used by `start_now` / `stop_now`.
    pub fn with_clock(mut self, now: fn() -> DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    fn now(&self) -> DateTime<Utc> {
        normalize(&(self.now)())
    }

    /// Set `start` to the current minute. Nothing is stored.
    pub fn start_now(&self, slot: &mut Slot) {
        slot.start = self.now();
    }

    /// A new open work slot for `project_id`, starting now.
    pub fn new_template(&self, project_id: i64) -> Slot {
        Slot::new(project_id, Activity::Work, self.now())
    }

    /// Validate and persist `slot`. On success the normalized timestamps
    /// and, for an insert, the new identity are written back; on a rejection
    /// `slot` is left as it was.
    pub fn save(&self, tx: &Tx<'_>, slot: &mut Slot) -> AppResult<()> {
        if slot.project_id == 0 {
            return Err(AppError::InvalidProject);
        }

        let start = normalize(&slot.start);
        let end = slot.end.map(|end| normalize(&end));

        match end {
            None => {
                if let Some(open) = self.get_open_slot(tx, slot.project_id)?
                    && open.id != slot.id
                {
                    info!(
                        project_id = slot.project_id,
                        open_slot = open.id,
                        "Rejected slot: project already has an open slot"
                    );
                    return Err(AppError::OpenSlotExists);
                }
            }
            Some(end) if start > end => {
                info!(
                    project_id = slot.project_id,
                    slot = slot.id,
                    "Rejected slot: ends before start"
                );
                return Err(AppError::SlotEndsBeforeStart);
            }
            Some(_) => {}
        }

        slot.start = start;
        slot.end = end;
        self.repo.save(tx, slot)
    }

    /// The project's slot without an end, if any.
    pub fn get_open_slot(&self, tx: &Tx<'_>, project_id: i64) -> AppResult<Option<Slot>> {
        let filter = SlotFilter::for_project(project_id).open_only();
        let page = self.repo.get_all(tx, &Page::first(), &filter)?;
        Ok(page.into_first())
    }

    /// Close the project's open slot at the current minute.
    pub fn stop_now(&self, tx: &Tx<'_>, project_id: i64) -> AppResult<Option<Slot>> {
        let Some(mut slot) = self.get_open_slot(tx, project_id)? else {
            return Ok(None);
        };
        slot.end = Some(self.now());
        self.save(tx, &mut slot)?;
        Ok(Some(slot))
    }

    pub fn get_by_id(&self, tx: &Tx<'_>, id: i64) -> AppResult<Option<Slot>> {
        self.repo.get_by_id(tx, id)
    }

    pub fn get_all(
        &self,
        tx: &Tx<'_>,
        filter: &SlotFilter,
        page: &Page,
    ) -> AppResult<PageResult<Slot>> {
        self.repo.get_all(tx, page, filter)
    }

    pub fn delete(&self, tx: &Tx<'_>, id: i64) -> AppResult<()> {
        self.repo.delete(tx, id)
    }
}
