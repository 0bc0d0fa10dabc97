use crate::*;
use chrono::{NaiveDate, TimeZone, Utc};
use rusqlite::{params, Connection};
use sitecheck_core::time::encode_timestamp;
use sitecheck_model::Status;

fn setup_db() -> Connection {
    let conn = Connection::open_in_memory().expect("open memory db");
    conn.execute_batch(
        "
            CREATE TABLE checklists (
              id INTEGER PRIMARY KEY,
              name TEXT NOT NULL,
              description TEXT,
              site_name TEXT NOT NULL,
              work_date TEXT NOT NULL,
              is_template INTEGER NOT NULL DEFAULT 0,
              archived_at TEXT,
              status TEXT NOT NULL,
              user_id INTEGER NOT NULL,
              created_at TEXT NOT NULL,
              updated_at TEXT NOT NULL,
              last_viewed_at TEXT,
              name_search TEXT NOT NULL,
              site_search TEXT NOT NULL
            );
            CREATE TABLE checklist_items (
              id INTEGER PRIMARY KEY,
              checklist_id INTEGER NOT NULL,
              status TEXT NOT NULL
            );
            CREATE INDEX idx_checklists_user ON checklists(user_id);
            CREATE INDEX idx_checklists_work_date ON checklists(work_date);
            CREATE INDEX idx_checklist_items_checklist ON checklist_items(checklist_id);
            ",
    )
    .expect("schema");
    conn
}

#[allow(clippy::too_many_arguments)]
fn insert_checklist(
    conn: &Connection,
    id: i64,
    name: &str,
    site: &str,
    work_date: &str,
    is_template: bool,
    archived: bool,
    status: Status,
    user_id: i64,
) {
    let work_ts = encode_timestamp(
        Utc.with_ymd_and_hms(
            work_date[0..4].parse().expect("year"),
            work_date[5..7].parse().expect("month"),
            work_date[8..10].parse().expect("day"),
            9,
            0,
            0,
        )
        .single()
        .expect("work ts"),
    );
    let created = encode_timestamp(
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, id as u32 % 60)
            .single()
            .expect("created ts"),
    );
    let archived_at = archived.then(|| created.clone());
    conn.execute(
        "INSERT INTO checklists (id, name, description, site_name, work_date, is_template, \
         archived_at, status, user_id, created_at, updated_at, last_viewed_at, name_search, site_search) \
         VALUES (?1, ?2, NULL, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9, NULL, ?10, ?11)",
        params![
            id,
            name,
            site,
            work_ts,
            is_template,
            archived_at,
            status.as_str(),
            user_id,
            created,
            normalize_search(name),
            normalize_search(site),
        ],
    )
    .expect("insert checklist");
}

fn insert_item(conn: &Connection, id: i64, checklist_id: i64, status: Status) {
    conn.execute(
        "INSERT INTO checklist_items (id, checklist_id, status) VALUES (?1, ?2, ?3)",
        params![id, checklist_id, status.as_str()],
    )
    .expect("insert item");
}

fn run(conn: &Connection, owner: i64, req: &ChecklistQueryRequest) -> Vec<ChecklistWithCounts> {
    query_checklists(conn, owner, req).expect("query checklists")
}

fn ids(rows: &[ChecklistWithCounts]) -> Vec<i64> {
    rows.iter().map(|r| r.checklist.id).collect()
}

#[test]
fn default_listing_excludes_archived_and_scopes_to_owner() {
    let conn = setup_db();
    insert_checklist(&conn, 1, "Footings", "North Yard", "2025-01-08", false, false, Status::NotStarted, 1);
    insert_checklist(&conn, 2, "Archived one", "North Yard", "2025-01-08", false, true, Status::Completed, 1);
    insert_checklist(&conn, 3, "Someone else's", "South Yard", "2025-01-08", false, false, Status::NotStarted, 2);

    let rows = run(&conn, 1, &ChecklistQueryRequest::default());
    assert_eq!(ids(&rows), vec![1]);

    let archived = ChecklistQueryRequest {
        filter: ChecklistFilter {
            is_archived: true,
            ..ChecklistFilter::default()
        },
        ..ChecklistQueryRequest::default()
    };
    assert_eq!(ids(&run(&conn, 1, &archived)), vec![2]);
}

#[test]
fn counts_are_derived_from_the_item_set() {
    let conn = setup_db();
    insert_checklist(&conn, 1, "Footings", "North Yard", "2025-01-08", false, false, Status::Pending, 1);
    insert_item(&conn, 1, 1, Status::Completed);
    insert_item(&conn, 2, 1, Status::Completed);
    insert_item(&conn, 3, 1, Status::NotStarted);
    insert_checklist(&conn, 2, "Empty", "North Yard", "2025-01-08", false, false, Status::NotStarted, 1);

    let rows = run(&conn, 1, &ChecklistQueryRequest::default());
    let by_id = |id: i64| {
        rows.iter()
            .find(|r| r.checklist.id == id)
            .expect("row present")
    };
    assert_eq!(by_id(1).summary.completed_items, 2);
    assert_eq!(by_id(1).summary.total_items, 3);
    assert_eq!(by_id(2).summary.completed_items, 0);
    assert_eq!(by_id(2).summary.total_items, 0);
}

#[test]
fn status_and_template_filters_compose() {
    let conn = setup_db();
    insert_checklist(&conn, 1, "A", "Yard", "2025-01-08", false, false, Status::Pending, 1);
    insert_checklist(&conn, 2, "B", "Yard", "2025-01-08", true, false, Status::Pending, 1);
    insert_checklist(&conn, 3, "C", "Yard", "2025-01-08", false, false, Status::Completed, 1);

    let pending_only = ChecklistQueryRequest {
        filter: ChecklistFilter {
            status: Some(Status::Pending),
            ..ChecklistFilter::default()
        },
        ..ChecklistQueryRequest::default()
    };
    let mut got = ids(&run(&conn, 1, &pending_only));
    got.sort_unstable();
    assert_eq!(got, vec![1, 2]);

    let pending_templates = ChecklistQueryRequest {
        filter: ChecklistFilter {
            status: Some(Status::Pending),
            is_template: Some(true),
            ..ChecklistFilter::default()
        },
        ..ChecklistQueryRequest::default()
    };
    assert_eq!(ids(&run(&conn, 1, &pending_templates)), vec![2]);

    let non_templates = ChecklistQueryRequest {
        filter: ChecklistFilter {
            is_template: Some(false),
            ..ChecklistFilter::default()
        },
        ..ChecklistQueryRequest::default()
    };
    let mut got = ids(&run(&conn, 1, &non_templates));
    got.sort_unstable();
    assert_eq!(got, vec![1, 3]);
}

#[test]
fn search_matches_name_or_site_case_insensitively() {
    let conn = setup_db();
    insert_checklist(&conn, 1, "Footing pour", "North Yard", "2025-01-08", false, false, Status::Pending, 1);
    insert_checklist(&conn, 2, "Rebar check", "harbor EXTENSION", "2025-01-08", false, false, Status::Pending, 1);
    insert_checklist(&conn, 3, "Unrelated", "Depot", "2025-01-08", false, false, Status::Pending, 1);

    let search = |needle: &str| ChecklistQueryRequest {
        filter: ChecklistFilter {
            search: Some(needle.to_string()),
            ..ChecklistFilter::default()
        },
        ..ChecklistQueryRequest::default()
    };
    assert_eq!(ids(&run(&conn, 1, &search("FOOTING"))), vec![1]);
    assert_eq!(ids(&run(&conn, 1, &search("extension"))), vec![2]);
    let mut both = ids(&run(&conn, 1, &search("r")));
    both.sort_unstable();
    assert_eq!(both, vec![1, 2, 3]);
}

#[test]
fn like_wildcards_in_search_only_match_literally() {
    let conn = setup_db();
    insert_checklist(&conn, 1, "100% complete walkthrough", "Yard", "2025-01-08", false, false, Status::Pending, 1);
    insert_checklist(&conn, 2, "100m cable run", "Yard", "2025-01-08", false, false, Status::Pending, 1);

    let req = ChecklistQueryRequest {
        filter: ChecklistFilter {
            search: Some("100%".to_string()),
            ..ChecklistFilter::default()
        },
        ..ChecklistQueryRequest::default()
    };
    assert_eq!(ids(&run(&conn, 1, &req)), vec![1]);
}

#[test]
fn date_to_includes_the_entire_end_date() {
    let conn = setup_db();
    let insert_at = |id: i64, ts: chrono::DateTime<Utc>| {
        conn.execute(
            "INSERT INTO checklists (id, name, description, site_name, work_date, is_template, \
             archived_at, status, user_id, created_at, updated_at, last_viewed_at, name_search, site_search) \
             VALUES (?1, 'X', NULL, 'Yard', ?2, 0, NULL, 'Pending', 1, ?2, ?2, NULL, 'x', 'yard')",
            params![id, encode_timestamp(ts)],
        )
        .expect("insert checklist");
    };
    let end_date = NaiveDate::from_ymd_opt(2025, 1, 9).expect("ymd");
    let cutoff = sitecheck_core::time::day_end_exclusive(end_date);
    // 23:59:59 local on the end date, and 00:00:00 local on the next day.
    insert_at(1, cutoff - chrono::Duration::seconds(1));
    insert_at(2, cutoff);

    let req = ChecklistQueryRequest {
        filter: ChecklistFilter {
            date_from: Some(NaiveDate::from_ymd_opt(2025, 1, 1).expect("ymd")),
            date_to: Some(end_date),
            ..ChecklistFilter::default()
        },
        ..ChecklistQueryRequest::default()
    };
    let (sql, _) = build_sql(1, &req);
    assert!(sql.contains("c.work_date >= ?"));
    assert!(sql.contains("c.work_date < ?"));

    assert_eq!(ids(&run(&conn, 1, &req)), vec![1]);
}

#[test]
fn sort_field_and_order_are_applied() {
    let conn = setup_db();
    insert_checklist(&conn, 1, "A", "Yard", "2025-01-05", false, false, Status::Pending, 1);
    insert_checklist(&conn, 2, "B", "Yard", "2025-01-09", false, false, Status::Pending, 1);
    insert_checklist(&conn, 3, "C", "Yard", "2025-01-07", false, false, Status::Pending, 1);

    let by_work_date_asc = ChecklistQueryRequest {
        sort_by: SortField::WorkDate,
        sort_order: SortOrder::Asc,
        ..ChecklistQueryRequest::default()
    };
    assert_eq!(ids(&run(&conn, 1, &by_work_date_asc)), vec![1, 3, 2]);

    let by_work_date_desc = ChecklistQueryRequest {
        sort_by: SortField::WorkDate,
        sort_order: SortOrder::Desc,
        ..ChecklistQueryRequest::default()
    };
    assert_eq!(ids(&run(&conn, 1, &by_work_date_desc)), vec![2, 3, 1]);

    // created_at ascends with id in the fixture.
    let default_listing = ChecklistQueryRequest::default();
    assert_eq!(ids(&run(&conn, 1, &default_listing)), vec![3, 2, 1]);
}

#[test]
fn limit_bounds_the_result() {
    let conn = setup_db();
    for id in 1..=10 {
        insert_checklist(&conn, id, "A", "Yard", "2025-01-05", false, false, Status::Pending, 1);
    }
    let req = ChecklistQueryRequest {
        limit: 4,
        ..ChecklistQueryRequest::default()
    };
    assert_eq!(run(&conn, 1, &req).len(), 4);
}

#[test]
fn malicious_sort_input_coerces_and_stays_parameterized() {
    let req = ChecklistQueryRequest {
        sort_by: SortField::parse_or_default(Some("maliciousField")),
        sort_order: SortOrder::parse_or_default(Some("; DELETE FROM checklists")),
        ..ChecklistQueryRequest::default()
    };
    let (sql, _) = build_sql(1, &req);
    assert!(sql.contains("ORDER BY c.created_at DESC"));
    assert!(!sql.contains("malicious"));
    assert!(!sql.contains("DELETE"));
}
