//! End-to-end load tests: parsed feed documents in, relational rows out.
//!
//! Each test builds a small feed document, runs the full load against an
//! in-memory SQLite database and checks the resulting tables.

use rusqlite::Connection;
use serde_json::{json, Value};

use nobel_to_sqlite::error::LoadError;
use nobel_to_sqlite::load::{load_feed, LoadStats};
use nobel_to_sqlite::query::award_report;
use nobel_to_sqlite::schema::{create_schema, open_database};
use nobel_to_sqlite::ui::SilentUi;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().expect("Failed to open in-memory database");
    conn.execute_batch("PRAGMA foreign_keys = ON;").unwrap();
    create_schema(&conn).expect("Failed to create schema");
    conn
}

fn load(conn: &mut Connection, doc: &Value) -> LoadStats {
    load_feed(conn, doc, &mut SilentUi::new()).expect("Load failed")
}

fn count(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |r| r.get(0))
        .unwrap()
}

fn laureate(id: &str, first: &str, last: &str) -> Value {
    json!({
        "id": id,
        "firstname": first,
        "surname": last,
        "motivation": "m",
        "share": "1"
    })
}

#[test]
fn test_single_laureate_full_chain() {
    let doc = json!({"prizes": [{
        "year": "2000",
        "category": "physics",
        "laureates": [{
            "id": "1",
            "firstname": "A",
            "surname": "B",
            "motivation": "m",
            "share": "2"
        }]
    }]});

    let mut conn = setup();
    let stats = load(&mut conn, &doc);

    assert_eq!(
        stats,
        LoadStats {
            records: 1,
            prize_only_records: 0,
            categories: 1,
            recipients: 1,
            prizes: 1,
            awards: 1,
            dropped_awards: 0,
        }
    );

    let (year, category, first, last, motivation, share): (
        i64,
        String,
        String,
        String,
        String,
        i64,
    ) = conn
        .query_row(
            "SELECT p.year, c.name, r.first_name, r.last_name, a.motivation, a.share
             FROM award a
             JOIN prize p ON a.prize_id = p.id
             JOIN category c ON p.category_id = c.id
             JOIN recipient r ON a.recipient_id = r.id",
            [],
            |row| {
                Ok((
                    row.get(0)?,
                    row.get(1)?,
                    row.get(2)?,
                    row.get(3)?,
                    row.get(4)?,
                    row.get(5)?,
                ))
            },
        )
        .unwrap();

    assert_eq!(year, 2000);
    assert_eq!(category, "physics");
    assert_eq!(first, "A");
    assert_eq!(last, "B");
    assert_eq!(motivation, "m");
    assert_eq!(share, 2);
}

#[test]
fn test_prize_without_laureates_still_creates_prize() {
    let doc = json!({"prizes": [{
        "year": "1972",
        "category": "peace",
        "laureates": []
    }]});

    let mut conn = setup();
    let stats = load(&mut conn, &doc);

    assert_eq!(stats.records, 1);
    assert_eq!(stats.prize_only_records, 1);
    assert_eq!(count(&conn, "prize"), 1);
    assert_eq!(count(&conn, "award"), 0);
    assert_eq!(count(&conn, "recipient"), 0);
    assert_eq!(stats.dropped_awards, 0);
}

#[test]
fn test_shared_category_across_years() {
    let doc = json!({"prizes": [
        {"year": "2000", "category": "physics", "laureates": [laureate("1", "A", "B")]},
        {"year": "2001", "category": "physics", "laureates": [laureate("2", "C", "D")]}
    ]});

    let mut conn = setup();
    load(&mut conn, &doc);

    assert_eq!(count(&conn, "category"), 1);
    assert_eq!(count(&conn, "prize"), 2);
}

#[test]
fn test_repeat_recipient_gets_one_row_two_awards() {
    let doc = json!({"prizes": [
        {"year": "1903", "category": "physics", "laureates": [laureate("6", "Marie", "Curie")]},
        {"year": "1911", "category": "chemistry", "laureates": [laureate("6", "Marie", "Curie")]}
    ]});

    let mut conn = setup();
    let stats = load(&mut conn, &doc);

    assert_eq!(count(&conn, "recipient"), 1);
    assert_eq!(count(&conn, "award"), 2);
    assert_eq!(stats.recipients, 1);
    assert_eq!(stats.awards, 2);
}

#[test]
fn test_unknown_year_drops_award_but_keeps_recipient() {
    let doc = json!({"prizes": [{
        "year": "unknown",
        "category": "peace",
        "laureates": [laureate("1", "A", "B")]
    }]});

    let mut conn = setup();
    let stats = load(&mut conn, &doc);

    // No year means no prize identity, so the award is dropped; the
    // recipient itself is still resolvable.
    assert_eq!(count(&conn, "prize"), 0);
    assert_eq!(count(&conn, "award"), 0);
    assert_eq!(count(&conn, "recipient"), 1);
    assert_eq!(stats.dropped_awards, 1);
}

#[test]
fn test_rerun_never_duplicates_entities() {
    let doc = json!({"prizes": [
        {"year": "2000", "category": "physics", "laureates": [
            laureate("1", "A", "B"),
            laureate("2", "C", "D")
        ]},
        {"year": "2000", "category": "peace", "laureates": []}
    ]});

    let mut conn = setup();
    load(&mut conn, &doc);
    // Second run against the already-populated schema, no drop in between
    load(&mut conn, &doc);

    assert_eq!(count(&conn, "category"), 2);
    assert_eq!(count(&conn, "recipient"), 2);
    assert_eq!(count(&conn, "prize"), 2);
    // Awards carry no natural key, so a re-run without a schema drop
    // duplicates them
    assert_eq!(count(&conn, "award"), 4);
}

#[test]
fn test_rerun_never_duplicates_recipients_with_absent_names() {
    // Organization laureates carry no surname in the feed; a fully-unnamed
    // laureate has only an id. Neither may gain a second recipient row when
    // a re-run hits the already-populated schema.
    let doc = json!({"prizes": [
        {"year": "1917", "category": "peace", "laureates": [
            {"id": "482", "firstname": "Red Cross", "motivation": "m", "share": "1"}
        ]},
        {"year": "1918", "category": "peace", "laureates": [
            {"id": "9", "share": "1"}
        ]}
    ]});

    let mut conn = setup();
    load(&mut conn, &doc);
    load(&mut conn, &doc);

    assert_eq!(count(&conn, "recipient"), 2);
    assert_eq!(count(&conn, "prize"), 2);
    // Both laureates resolve on both runs, so only the awards duplicate
    assert_eq!(count(&conn, "award"), 4);
}

#[test]
fn test_no_dangling_junction_rows() {
    let doc = json!({"prizes": [
        {"year": "2000", "category": "physics", "laureates": [
            laureate("1", "A", "B"),
            laureate("2", "C", "D")
        ]},
        {"year": "unknown", "category": "physics", "laureates": [laureate("3", "E", "F")]},
        {"year": "2001", "category": "chemistry", "laureates": [laureate("1", "A", "B")]},
        {"year": "1972", "category": "peace", "laureates": []}
    ]});

    let mut conn = setup();
    load(&mut conn, &doc);

    let dangling: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM award a
             LEFT JOIN prize p ON a.prize_id = p.id
             LEFT JOIN recipient r ON a.recipient_id = r.id
             WHERE p.id IS NULL OR r.id IS NULL",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(dangling, 0);
}

#[test]
fn test_malformed_feed_aborts_before_writes() {
    let doc = json!({"laureates": []});

    let mut conn = setup();
    let err = load_feed(&mut conn, &doc, &mut SilentUi::new()).unwrap_err();
    assert!(matches!(err, LoadError::MalformedFeed));

    for table in ["category", "recipient", "prize", "award"] {
        assert_eq!(count(&conn, table), 0);
    }
}

#[test]
fn test_report_is_ordered_by_year_then_category() {
    let doc = json!({"prizes": [
        {"year": "2001", "category": "physics", "laureates": [laureate("1", "A", "B")]},
        {"year": "2000", "category": "physics", "laureates": [laureate("2", "C", "D")]},
        {"year": "2000", "category": "chemistry", "laureates": [laureate("3", "E", "F")]}
    ]});

    let mut conn = setup();
    load(&mut conn, &doc);

    let rows = award_report(&conn, None).unwrap();
    let keys: Vec<(Option<i64>, String)> = rows
        .iter()
        .map(|r| (r.year, r.category.clone()))
        .collect();
    assert_eq!(
        keys,
        vec![
            (Some(2000), "chemistry".to_string()),
            (Some(2000), "physics".to_string()),
            (Some(2001), "physics".to_string()),
        ]
    );

    let limited = award_report(&conn, Some(2)).unwrap();
    assert_eq!(limited.len(), 2);
}

#[test]
fn test_file_backed_database_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("prizes.db");

    let doc = json!({"prizes": [
        {"year": "2000", "category": "physics", "laureates": [laureate("1", "A", "B")]}
    ]});

    {
        let mut conn = open_database(&db_path).unwrap();
        create_schema(&conn).unwrap();
        load_feed(&mut conn, &doc, &mut SilentUi::new()).unwrap();
    }

    // Reopen and read back
    let conn = open_database(&db_path).unwrap();
    let rows = award_report(&conn, None).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].recipient_name(), "A B");
}
