use chatlens_types::AgentRecord;
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, Row, params};

use crate::error::is_constraint_violation;
use crate::{Error, Result};

pub fn insert(conn: &Connection, agent: &AgentRecord) -> Result<()> {
    let created_at = Utc::now().to_rfc3339();
    conn.execute(
        r#"
        INSERT INTO agents (id, user_id, name, model_name, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
        params![
            &agent.id,
            &agent.user_id,
            &agent.name,
            &agent.model_name,
            created_at
        ],
    )
    .map_err(|err| {
        if is_constraint_violation(&err) {
            Error::Duplicate {
                kind: "agent",
                id: agent.id.clone(),
            }
        } else {
            Error::Database(err)
        }
    })?;

    Ok(())
}

/// First agent registered for `user_id`.
pub fn find_by_user_id(conn: &Connection, user_id: &str) -> Result<Option<AgentRecord>> {
    let agent = conn
        .query_row(
            r#"
            SELECT id, user_id, name, model_name
            FROM agents
            WHERE user_id = ?1
            ORDER BY created_at ASC, rowid ASC
            LIMIT 1
            "#,
            [user_id],
            map_agent,
        )
        .optional()?;
    Ok(agent)
}

pub fn list(conn: &Connection) -> Result<Vec<AgentRecord>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT id, user_id, name, model_name
        FROM agents
        ORDER BY user_id ASC, created_at ASC, rowid ASC
        "#,
    )?;

    let agents = stmt
        .query_map([], map_agent)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(agents)
}

fn map_agent(row: &Row<'_>) -> rusqlite::Result<AgentRecord> {
    Ok(AgentRecord {
        id: row.get(0)?,
        user_id: row.get(1)?,
        name: row.get(2)?,
        model_name: row.get(3)?,
    })
}
