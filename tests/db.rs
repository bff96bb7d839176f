use diesel::prelude::*;
use diesel_migrations::MigrationHarness;
use llmoonclip::db::MIGRATIONS;

mod common;

#[test]
fn test_creates_and_removes_db_files() {
    let test_db = common::TestDb::new();
    let pool = test_db.pool();
    let conn = pool.get();
    assert!(conn.is_ok());
}

#[test]
fn migrations_are_fully_applied() {
    let test_db = common::TestDb::new();
    let mut conn = test_db.pool().get().expect("connection");

    assert!(!conn.has_pending_migration(MIGRATIONS).expect("migration state"));

    use llmoonclip::schema::{categories, llm_responses};
    let categories: i64 = categories::table.count().get_result(&mut conn).unwrap();
    let responses: i64 = llm_responses::table.count().get_result(&mut conn).unwrap();
    assert_eq!((categories, responses), (0, 0));
}

#[test]
fn running_migrations_twice_is_harmless() {
    let test_db = common::TestDb::new();
    llmoonclip::db::run_migrations(&test_db.pool()).expect("second run");
}
