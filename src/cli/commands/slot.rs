use super::{open_db, page_from, print_page_footer};
use crate::cli::parser::{SlotAction, SlotFilterArgs};
use crate::config::Config;
use crate::core::SlotService;
use crate::db::page::Page;
use crate::db::tx::Tx;
use crate::errors::{AppError, AppResult};
use crate::export::export_slots;
use crate::models::{Slot, SlotFilter};
use crate::ui::messages::{detail, info, success, warning};
use crate::utils::table::Table;
use crate::utils::time::{format_minutes, format_timestamp, parse_optional_timestamp, parse_timestamp};
use chrono::Utc;
use std::path::Path;

impl SlotFilterArgs {
    pub fn to_filter(&self) -> AppResult<SlotFilter> {
        let is_open = match (self.open, self.closed) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        };
        Ok(SlotFilter {
            project_id: self.project,
            activity: self.activity,
            start_time: parse_optional_timestamp(self.start_time.as_ref())?,
            start_time_comparator: self.start_cmp,
            end_time: parse_optional_timestamp(self.end_time.as_ref())?,
            end_time_comparator: self.end_cmp,
            is_open,
            description: self.description.clone(),
        })
    }
}

fn not_found(id: i64, project_id: i64) -> AppError {
    AppError::NotFound(format!("slot {id} of project {project_id}"))
}

/// The slot, provided it belongs to `project_id`.
fn load_for_project(
    service: &SlotService,
    tx: &Tx<'_>,
    id: i64,
    project_id: i64,
) -> AppResult<Slot> {
    service
        .get_by_id(tx, id)?
        .filter(|s| s.project_id == project_id)
        .ok_or_else(|| not_found(id, project_id))
}

fn print_slot(slot: &Slot) {
    detail("id", slot.id);
    detail("project", slot.project_id);
    detail("activity", slot.activity);
    detail("start", format_timestamp(&slot.start));
    detail(
        "end",
        slot.end.as_ref().map(format_timestamp).unwrap_or_else(|| "open".to_string()),
    );
    detail("duration", format_minutes(slot.duration_minutes(Utc::now())));
    detail("description", slot.description.as_deref().unwrap_or(""));
}

fn slot_table(slots: &[Slot]) -> Table {
    let now = Utc::now();
    let mut table = Table::new(["id", "project", "activity", "start", "end", "duration", "description"]);
    for s in slots {
        table.add_row(vec![
            s.id.to_string(),
            s.project_id.to_string(),
            s.activity.to_string(),
            format_timestamp(&s.start),
            s.end.as_ref().map(format_timestamp).unwrap_or_default(),
            format_minutes(s.duration_minutes(now)),
            s.description.clone().unwrap_or_default(),
        ]);
    }
    table
}

pub fn handle(action: &SlotAction, cfg: &Config) -> AppResult<()> {
    let mut db = open_db(cfg)?;
    let service = SlotService::new();

    match action {
        SlotAction::Start {
            project,
            activity,
            description,
        } => {
            let mut slot = service.new_template(*project);
            slot.activity = *activity;
            slot.description = description.clone();
            service.start_now(&mut slot);
            db.with_transaction(|tx| service.save(tx, &mut slot))?;
            success(format!(
                "Slot #{} started at {} for project #{}.",
                slot.id,
                format_timestamp(&slot.start),
                slot.project_id
            ));
        }

        SlotAction::Stop { project } => {
            match db.with_transaction(|tx| service.stop_now(tx, *project))? {
                Some(slot) => success(format!(
                    "Slot #{} stopped at {} ({}).",
                    slot.id,
                    slot.end.as_ref().map(format_timestamp).unwrap_or_default(),
                    format_minutes(slot.duration_minutes(Utc::now()))
                )),
                None => warning(format!("Project #{project} has no open slot.")),
            }
        }

        SlotAction::Add {
            project,
            activity,
            start,
            end,
            description,
        } => {
            let mut slot = Slot::new(*project, *activity, parse_timestamp(start)?);
            slot.end = parse_optional_timestamp(end.as_ref())?;
            slot.description = description.clone();
            db.with_transaction(|tx| service.save(tx, &mut slot))?;
            success(format!("Slot #{} added to project #{}.", slot.id, slot.project_id));
        }

        SlotAction::Update {
            id,
            project,
            activity,
            start,
            end,
            description,
        } => {
            let start = parse_optional_timestamp(start.as_ref())?;
            let end = parse_optional_timestamp(end.as_ref())?;

            let slot = db.with_transaction(|tx| {
                let mut slot = load_for_project(&service, tx, *id, *project)?;
                if let Some(activity) = activity {
                    slot.activity = *activity;
                }
                if let Some(start) = start {
                    slot.start = start;
                }
                if end.is_some() {
                    slot.end = end;
                }
                if let Some(description) = description {
                    slot.description = Some(description.clone());
                }
                service.save(tx, &mut slot)?;
                Ok(slot)
            })?;
            success(format!("Slot #{} updated.", slot.id));
        }

        SlotAction::Get { id, project } => {
            let slot = db.with_transaction(|tx| load_for_project(&service, tx, *id, *project))?;
            print_slot(&slot);
        }

        SlotAction::List { filter, sort, page } => {
            let filter = filter.to_filter()?;
            let page = page_from(page, cfg).with_sort(sort.iter().cloned());
            let result = db.with_transaction(|tx| service.get_all(tx, &filter, &page))?;

            if result.is_empty() {
                warning("No slots found.");
                return Ok(());
            }

            print!("{}", slot_table(&result.items).render());
            print_page_footer(&result, "slot");
        }

        SlotAction::Open { project } => {
            match db.with_transaction(|tx| service.get_open_slot(tx, *project))? {
                Some(slot) => print_slot(&slot),
                None => info(format!("Project #{project} has no open slot.")),
            }
        }

        SlotAction::Delete { id, project } => {
            db.with_transaction(|tx| {
                load_for_project(&service, tx, *id, *project)?;
                service.delete(tx, *id)
            })?;
            success(format!("Slot #{id} deleted."));
        }

        SlotAction::Export {
            filter,
            format,
            file,
            force,
        } => {
            let filter = filter.to_filter()?;
            let result = db.with_transaction(|tx| service.get_all(tx, &filter, &Page::all()))?;
            export_slots(&result.items, *format, Path::new(file), *force)?;
        }
    }

    Ok(())
}
