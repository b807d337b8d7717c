use chatlens_types::SessionRecord;
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, Row, params};

use crate::error::is_constraint_violation;
use crate::records::{SessionFilter, SessionSummary, normalize_column};
use crate::{Error, Result};

const SUMMARY_COLUMNS: &str = "id, conversation_id, user_id, agent_id, start_time, end_time, \
     successful, duration_seconds, total_tokens, cost, language, stored_at";

/// Insert a finished record. Records are immutable: a second insert with the
/// same id fails instead of overwriting.
pub fn insert(conn: &Connection, record: &SessionRecord) -> Result<()> {
    let record_json = serde_json::to_string(record)?;
    let stored_at = Utc::now().to_rfc3339();

    conn.execute(
        r#"
        INSERT INTO sessions (id, conversation_id, user_id, agent_id, start_time, end_time,
                              successful, duration_seconds, total_tokens, cost, language,
                              record_json, stored_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
        "#,
        params![
            &record.id,
            &record.conversation_id,
            &record.user_id,
            &record.agent_data.agent_id,
            normalize_column(record.start_time.as_deref()),
            normalize_column(record.end_time.as_deref()),
            record.successful,
            record.duration_seconds,
            record.token_usage.total_tokens as i64,
            record.token_usage.cost,
            &record.metadata.language,
            record_json,
            stored_at
        ],
    )
    .map_err(|err| {
        if is_constraint_violation(&err) {
            Error::Duplicate {
                kind: "session",
                id: record.id.clone(),
            }
        } else {
            Error::Database(err)
        }
    })?;

    Ok(())
}

pub fn get_record(conn: &Connection, id: &str) -> Result<Option<SessionRecord>> {
    let json: Option<String> = conn
        .query_row(
            "SELECT record_json FROM sessions WHERE id = ?1",
            [id],
            |row| row.get(0),
        )
        .optional()?;

    json.map(|j| serde_json::from_str(&j).map_err(Error::from))
        .transpose()
}

pub fn list(conn: &Connection, filter: &SessionFilter) -> Result<Vec<SessionSummary>> {
    query_filtered(conn, SUMMARY_COLUMNS, filter, map_summary)
}

pub fn list_records(conn: &Connection, filter: &SessionFilter) -> Result<Vec<SessionRecord>> {
    let rows = query_filtered(conn, "record_json", filter, |row| row.get::<_, String>(0))?;
    rows.iter()
        .map(|json| serde_json::from_str(json).map_err(Error::from))
        .collect()
}

pub fn count(conn: &Connection) -> Result<usize> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM sessions", [], |row| row.get(0))?;
    Ok(count as usize)
}

fn query_filtered<T, F>(
    conn: &Connection,
    columns: &str,
    filter: &SessionFilter,
    map: F,
) -> Result<Vec<T>>
where
    F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
{
    let mut where_clauses = vec!["1 = 1"];
    let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

    if let Some(user_id) = &filter.user_id {
        where_clauses.push("user_id = ?");
        params.push(Box::new(user_id.clone()));
    }

    if let Some(agent_id) = &filter.agent_id {
        where_clauses.push("agent_id = ?");
        params.push(Box::new(agent_id.clone()));
    }

    if let Some(from) = &filter.end_from {
        where_clauses.push("end_time >= ?");
        params.push(Box::new(from.clone()));
    }

    if let Some(before) = &filter.end_before {
        where_clauses.push("end_time < ?");
        params.push(Box::new(before.clone()));
    }

    let where_clause = where_clauses.join(" AND ");
    let limit_clause = filter
        .limit
        .map(|l| format!("LIMIT {}", l))
        .unwrap_or_default();

    let query = format!(
        r#"
        SELECT {}
        FROM sessions
        WHERE {}
        ORDER BY end_time IS NULL, end_time DESC, stored_at DESC, id ASC
        {}
        "#,
        columns, where_clause, limit_clause
    );

    let mut stmt = conn.prepare(&query)?;
    let param_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();
    let rows = stmt
        .query_map(param_refs.as_slice(), map)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

fn map_summary(row: &Row<'_>) -> rusqlite::Result<SessionSummary> {
    Ok(SessionSummary {
        id: row.get(0)?,
        conversation_id: row.get(1)?,
        user_id: row.get(2)?,
        agent_id: row.get(3)?,
        start_time: row.get(4)?,
        end_time: row.get(5)?,
        successful: row.get(6)?,
        duration_seconds: row.get(7)?,
        total_tokens: row.get::<_, i64>(8)? as u64,
        cost: row.get(9)?,
        language: row.get(10)?,
        stored_at: row.get(11)?,
    })
}
