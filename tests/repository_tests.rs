mod common;
use common::{memory_db, seed_project, ts};

use protrak::core::{ClientService, ProjectService, SlotService};
use protrak::db::migrate::{latest_version, run_pending_migrations};
use protrak::db::{CrudRepository, Database, NamedParams, Page, SlotRepository};
use protrak::errors::AppError;
use protrak::models::{
    Activity, Client, ClientFilter, CompareOperator, Project, ProjectFilter, Slot, SlotFilter,
};

/// Five closed one-hour slots, 08:00 to 13:00, descriptions "task 1" .. "task 5".
fn seed_day(db: &mut Database, project: i64) -> Vec<Slot> {
    db.with_transaction(|tx| {
        let service = SlotService::new();
        let mut out = Vec::new();
        for h in 0..5 {
            let start = ts(&format!("2024-01-01T{:02}:00:00Z", 8 + h));
            let end = ts(&format!("2024-01-01T{:02}:00:00Z", 9 + h));
            let mut slot = Slot::new(project, Activity::Work, start)
                .with_end(end)
                .with_description(format!("task {}", h + 1));
            service.save(tx, &mut slot)?;
            out.push(slot);
        }
        Ok(out)
    })
    .expect("seed slots")
}

fn list_slots(db: &mut Database, filter: &SlotFilter, page: &Page) -> Result<Vec<i64>, AppError> {
    db.with_transaction(|tx| SlotService::new().get_all(tx, filter, page))
        .map(|r| r.items.iter().map(|s| s.id).collect())
}

#[test]
fn test_client_crud() {
    let mut db = memory_db();
    let service = ClientService::new();

    let mut client = Client::new("Acme").with_description("Widgets");
    db.with_transaction(|tx| service.save(tx, &mut client))
        .expect("insert");
    assert!(client.id > 0);

    client.name = "Acme Corp".into();
    db.with_transaction(|tx| service.save(tx, &mut client))
        .expect("update");

    let stored = db
        .with_transaction(|tx| service.get_by_id(tx, client.id))
        .expect("get")
        .expect("present");
    assert_eq!(stored, client);

    db.with_transaction(|tx| service.delete(tx, client.id))
        .expect("delete");
    let gone = db
        .with_transaction(|tx| service.get_by_id(tx, client.id))
        .expect("get");
    assert!(gone.is_none());
}

#[test]
fn test_get_by_id_zero_and_missing_are_none() {
    let mut db = memory_db();
    let service = ClientService::new();

    let (zero, missing) = db
        .with_transaction(|tx| Ok((service.get_by_id(tx, 0)?, service.get_by_id(tx, 42)?)))
        .expect("lookups");
    assert!(zero.is_none());
    assert!(missing.is_none());
}

#[test]
fn test_update_and_delete_of_missing_rows_fail() {
    let mut db = memory_db();
    let service = ClientService::new();

    let mut ghost = Client::new("ghost");
    ghost.id = 77;
    let err = db
        .with_transaction(|tx| service.save(tx, &mut ghost))
        .expect_err("update of missing row");
    assert!(matches!(err, AppError::Persistence(_)));

    let err = db
        .with_transaction(|tx| service.delete(tx, 77))
        .expect_err("delete of missing row");
    assert!(matches!(err, AppError::Persistence(ref m) if m.contains("0 rows")));
}

#[test]
fn test_client_filter_by_name_is_case_insensitive() {
    let mut db = memory_db();
    let service = ClientService::new();

    db.with_transaction(|tx| {
        for name in ["Acme", "Globex", "acme labs"] {
            service.save(tx, &mut Client::new(name))?;
        }
        Ok(())
    })
    .expect("seed clients");

    let filter = ClientFilter {
        name: Some("ACME".into()),
        ..ClientFilter::default()
    };
    let result = db
        .with_transaction(|tx| service.get_all(tx, &filter, &Page::all()))
        .expect("list");
    let names: Vec<&str> = result.items.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Acme", "acme labs"]);
    assert_eq!(result.total_count, 2);
}

#[test]
fn test_page_returns_slice_and_total_count() {
    let mut db = memory_db();
    let project = seed_project(&mut db, "A");
    let slots = seed_day(&mut db, project);

    let result = db
        .with_transaction(|tx| {
            SlotService::new().get_all(tx, &SlotFilter::for_project(project), &Page::new(2, 2))
        })
        .expect("page");

    assert_eq!(result.total_count, 5);
    let ids: Vec<i64> = result.items.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![slots[2].id, slots[3].id]);
}

#[test]
fn test_offset_without_limit_is_ignored() {
    let mut db = memory_db();
    let project = seed_project(&mut db, "A");
    seed_day(&mut db, project);

    let ids = list_slots(&mut db, &SlotFilter::default(), &Page::new(-1, 3)).expect("list");
    assert_eq!(ids.len(), 5);
}

#[test]
fn test_sort_descending_by_start() {
    let mut db = memory_db();
    let project = seed_project(&mut db, "A");
    let slots = seed_day(&mut db, project);

    let page = Page::all().with_sort(["-start"]);
    let ids = list_slots(&mut db, &SlotFilter::default(), &page).expect("sorted list");

    let mut expected: Vec<i64> = slots.iter().map(|s| s.id).collect();
    expected.reverse();
    assert_eq!(ids, expected);
}

#[test]
fn test_unknown_sort_field_fails_listing() {
    let mut db = memory_db();

    let page = Page::all().with_sort(["duration"]);
    let err = list_slots(&mut db, &SlotFilter::default(), &page).expect_err("unknown key");
    assert!(matches!(err, AppError::UnknownSortField(ref f) if f == "duration"));
}

#[test]
fn test_start_time_comparators_against_store() {
    let mut db = memory_db();
    let project = seed_project(&mut db, "A");
    let slots = seed_day(&mut db, project);
    let pivot = ts("2024-01-01T10:00:00Z");

    let by = |op| SlotFilter {
        start_time: Some(pivot),
        start_time_comparator: op,
        ..SlotFilter::default()
    };

    let le = list_slots(&mut db, &by(CompareOperator::LessThanOrEqual), &Page::all()).expect("le");
    assert_eq!(le, vec![slots[0].id, slots[1].id, slots[2].id]);

    let ge = list_slots(&mut db, &by(CompareOperator::GreaterThanOrEqual), &Page::all()).expect("ge");
    assert_eq!(ge, vec![slots[2].id, slots[3].id, slots[4].id]);

    let lt = list_slots(&mut db, &by(CompareOperator::LessThan), &Page::all()).expect("lt");
    assert_eq!(lt, vec![slots[0].id, slots[1].id]);

    let ne = list_slots(&mut db, &by(CompareOperator::NotEqual), &Page::all()).expect("ne");
    assert_eq!(ne.len(), 4);

    let eq = list_slots(&mut db, &by(CompareOperator::Equal), &Page::all()).expect("eq");
    assert_eq!(eq, vec![slots[2].id]);
}

#[test]
fn test_description_filter_on_slots() {
    let mut db = memory_db();
    let project = seed_project(&mut db, "A");
    let slots = seed_day(&mut db, project);

    let filter = SlotFilter {
        description: Some("TASK 4".into()),
        ..SlotFilter::default()
    };
    let ids = list_slots(&mut db, &filter, &Page::all()).expect("list");
    assert_eq!(ids, vec![slots[3].id]);
}

#[test]
fn test_deleting_project_with_slots_fails_and_keeps_project() {
    let mut db = memory_db();
    let project = seed_project(&mut db, "A");
    seed_day(&mut db, project);
    let service = ProjectService::new();

    let result = db.with_transaction(|tx| service.delete(tx, project));
    assert!(result.is_err());

    let still_there = db
        .with_transaction(|tx| service.get_by_id(tx, project))
        .expect("get");
    assert!(still_there.is_some());
}

#[test]
fn test_slot_for_unknown_project_rejected_by_store() {
    let mut db = memory_db();

    let mut slot = Slot::new(404, Activity::Work, ts("2024-01-01T09:00:00Z"));
    let err = db
        .with_transaction(|tx| SlotRepository.save(tx, &mut slot))
        .expect_err("foreign key");
    assert!(matches!(err, AppError::Db(_)));
}

#[test]
fn test_failed_transaction_rolls_back_earlier_writes() {
    let mut db = memory_db();
    let service = ClientService::new();

    let err = db
        .with_transaction(|tx| {
            service.save(tx, &mut Client::new("written then undone"))?;
            service.delete(tx, 999)
        })
        .expect_err("second step fails");
    assert!(matches!(err, AppError::Persistence(_)));

    let result = db
        .with_transaction(|tx| service.get_all(tx, &ClientFilter::default(), &Page::all()))
        .expect("list");
    assert_eq!(result.total_count, 0);
}

#[test]
fn test_project_client_lookup_and_detach() {
    let mut db = memory_db();
    let project_id = seed_project(&mut db, "Website");
    let service = ProjectService::new();

    let (mut project, client) = db
        .with_transaction(|tx| {
            let project = service.get_by_id(tx, project_id)?.expect("project");
            let client = service.client_of(tx, &project)?;
            Ok((project, client))
        })
        .expect("lookup");
    assert_eq!(client.map(|c| c.name), Some("Website client".to_string()));

    project.client_id = Some(0);
    db.with_transaction(|tx| service.save(tx, &mut project))
        .expect("detach");
    assert_eq!(project.client_id, None);

    let filter = ProjectFilter {
        client_id: Some(1),
        ..ProjectFilter::default()
    };
    let result = db
        .with_transaction(|tx| service.get_all(tx, &filter, &Page::all()))
        .expect("list");
    assert!(result.is_empty());
}

#[test]
fn test_project_template() {
    let template = ProjectService::new().new_template();
    assert_eq!(template, Project::new("New Project"));
}

#[test]
fn test_migrations_are_idempotent() {
    let mut conn = rusqlite::Connection::open_in_memory().expect("connection");

    let applied = run_pending_migrations(&mut conn).expect("first run");
    assert_eq!(applied, latest_version());

    let again = run_pending_migrations(&mut conn).expect("second run");
    assert_eq!(again, 0);

    let db = memory_db();
    assert_eq!(db.schema_version().expect("version"), latest_version());
}

#[test]
fn test_deferred_foreign_key_violation_rolls_back() {
    let mut db = memory_db();

    let mut slot = Slot::new(404, Activity::Work, ts("2024-01-01T09:00:00Z"));
    let err = db
        .with_transaction(|tx| {
            tx.execute("PRAGMA defer_foreign_keys = ON", &NamedParams::new())?;
            SlotRepository.save(tx, &mut slot)
        })
        .expect_err("foreign key check after the body");
    assert!(
        matches!(err, AppError::Persistence(ref m) if m.starts_with("foreign_key_check failed")),
        "{err}"
    );

    let result = db
        .with_transaction(|tx| SlotService::new().get_all(tx, &SlotFilter::default(), &Page::all()))
        .expect("list");
    assert_eq!(result.total_count, 0);
}

#[test]
fn test_newer_schema_version_rejected() {
    let mut conn = rusqlite::Connection::open_in_memory().expect("connection");
    conn.execute_batch("PRAGMA user_version = 99;")
        .expect("set version");

    let err = run_pending_migrations(&mut conn).expect_err("schema from a newer build");
    assert!(matches!(err, AppError::Migration(_)));
}
