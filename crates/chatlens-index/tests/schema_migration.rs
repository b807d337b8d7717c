//! Integration tests for schema migration
//!
//! Database::open drops and recreates tables when the stored
//! `user_version` differs from the current schema version.

use chatlens_index::{Database, SCHEMA_VERSION, SessionFilter};
use chatlens_types::AgentRecord;
use rusqlite::Connection;
use std::path::Path;
use tempfile::TempDir;

/// Sessions table from before record_json was introduced
fn create_old_schema_db(path: &Path) {
    let conn = Connection::open(path).unwrap();

    conn.execute_batch(
        r#"
        CREATE TABLE agents (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            model_name TEXT NOT NULL
        );

        CREATE TABLE sessions (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            successful BOOLEAN NOT NULL
        );

        PRAGMA user_version = 0;
        "#,
    )
    .unwrap();

    conn.execute(
        "INSERT INTO agents (id, user_id, model_name) VALUES ('legacy', 'u1', 'gpt-4')",
        [],
    )
    .unwrap();
}

fn user_version(path: &Path) -> i32 {
    let conn = Connection::open(path).unwrap();
    conn.query_row("PRAGMA user_version", [], |row| row.get(0))
        .unwrap()
}

#[test]
fn test_old_schema_is_recreated() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("chatlens.db");
    create_old_schema_db(&db_path);

    let db = Database::open(&db_path).unwrap();

    assert_eq!(user_version(&db_path), SCHEMA_VERSION);
    assert!(db.list_agents().unwrap().is_empty());
    assert!(db.list_sessions(&SessionFilter::new()).unwrap().is_empty());
}

#[test]
fn test_current_schema_keeps_data() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("nested").join("chatlens.db");

    {
        let db = Database::open(&db_path).unwrap();
        db.insert_agent(&AgentRecord {
            id: "a1".to_string(),
            user_id: "u1".to_string(),
            name: "Soporte".to_string(),
            model_name: "gpt-4".to_string(),
        })
        .unwrap();
    }

    let db = Database::open(&db_path).unwrap();
    let agents = db.list_agents().unwrap();
    assert_eq!(agents.len(), 1);
    assert_eq!(agents[0].id, "a1");
}

#[test]
fn test_future_schema_version_is_recreated() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("chatlens.db");

    {
        let conn = Connection::open(&db_path).unwrap();
        conn.execute_batch("CREATE TABLE sessions (id TEXT); PRAGMA user_version = 99;")
            .unwrap();
    }

    let db = Database::open(&db_path).unwrap();
    assert_eq!(user_version(&db_path), SCHEMA_VERSION);
    assert_eq!(db.count_sessions().unwrap(), 0);
}
