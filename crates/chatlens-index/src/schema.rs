use rusqlite::Connection;

use crate::Result;

// Schema version (increment when changing table definitions)
pub const SCHEMA_VERSION: i32 = 1;

// start_time/end_time hold normalized UTC instants (RFC 3339, millisecond
// precision, `Z`) so range filters can compare them as text. The record as
// produced by the analyzer is kept verbatim in record_json.

pub fn init_schema(conn: &Connection) -> Result<()> {
    let current_version: i32 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;

    if current_version != SCHEMA_VERSION {
        if current_version != 0 {
            tracing::warn!(
                from = current_version,
                to = SCHEMA_VERSION,
                "index schema changed, recreating tables"
            );
        }
        drop_all_tables(conn)?;
    }

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS agents (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            name TEXT NOT NULL,
            model_name TEXT NOT NULL,
            created_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS sessions (
            id TEXT PRIMARY KEY,
            conversation_id TEXT NOT NULL,
            user_id TEXT NOT NULL,
            agent_id TEXT NOT NULL,
            start_time TEXT,
            end_time TEXT,
            successful BOOLEAN NOT NULL,
            duration_seconds INTEGER NOT NULL,
            total_tokens INTEGER NOT NULL,
            cost REAL NOT NULL,
            language TEXT NOT NULL,
            record_json TEXT NOT NULL,
            stored_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_agents_user ON agents(user_id, created_at);
        CREATE INDEX IF NOT EXISTS idx_sessions_user ON sessions(user_id);
        CREATE INDEX IF NOT EXISTS idx_sessions_agent ON sessions(agent_id);
        CREATE INDEX IF NOT EXISTS idx_sessions_end ON sessions(end_time DESC);
        "#,
    )?;

    conn.execute(&format!("PRAGMA user_version = {}", SCHEMA_VERSION), [])?;

    Ok(())
}

fn drop_all_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        DROP TABLE IF EXISTS sessions;
        DROP TABLE IF EXISTS agents;
        "#,
    )?;
    Ok(())
}
