use chatlens_types::{AgentDirectory, AgentRecord, BoxError, SessionRecord, SessionStore};
use rusqlite::Connection;
use std::path::Path;

use crate::queries;
use crate::records::{SessionFilter, SessionSummary};
use crate::schema;
use crate::Result;

pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn open(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(db_path)?;
        let db = Self { conn };
        db.init_schema()?;
        Ok(db)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init_schema()?;
        Ok(db)
    }

    pub fn init_schema(&self) -> Result<()> {
        schema::init_schema(&self.conn)
    }

    // Agent operations
    pub fn insert_agent(&self, agent: &AgentRecord) -> Result<()> {
        queries::agent::insert(&self.conn, agent)
    }

    pub fn find_agent(&self, user_id: &str) -> Result<Option<AgentRecord>> {
        queries::agent::find_by_user_id(&self.conn, user_id)
    }

    pub fn list_agents(&self) -> Result<Vec<AgentRecord>> {
        queries::agent::list(&self.conn)
    }

    // Session operations
    pub fn insert_session(&self, record: &SessionRecord) -> Result<String> {
        queries::session::insert(&self.conn, record)?;
        Ok(record.id.clone())
    }

    pub fn get_session(&self, id: &str) -> Result<Option<SessionRecord>> {
        queries::session::get_record(&self.conn, id)
    }

    pub fn list_sessions(&self, filter: &SessionFilter) -> Result<Vec<SessionSummary>> {
        queries::session::list(&self.conn, filter)
    }

    pub fn list_records(&self, filter: &SessionFilter) -> Result<Vec<SessionRecord>> {
        queries::session::list_records(&self.conn, filter)
    }

    pub fn count_sessions(&self) -> Result<usize> {
        queries::session::count(&self.conn)
    }
}

impl AgentDirectory for Database {
    fn find_agent_by_user_id(
        &self,
        user_id: &str,
    ) -> std::result::Result<Option<AgentRecord>, BoxError> {
        Ok(self.find_agent(user_id)?)
    }
}

impl SessionStore for Database {
    fn save_session(&self, record: &SessionRecord) -> std::result::Result<String, BoxError> {
        Ok(self.insert_session(record)?)
    }
}
