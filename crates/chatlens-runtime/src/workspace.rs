use chatlens_index::{Database, SessionFilter, SessionSummary};
use chatlens_types::{AgentRecord, SessionRecord};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::analyzer::Analyzer;
use crate::config::{Config, DATABASE_FILE, DEFAULT_CONFIG_TEMPLATE};
use crate::export::write_sessions_csv;
use crate::stats::SessionStats;
use crate::{Error, Result};

#[derive(Debug, Clone, Serialize)]
pub struct InitResult {
    pub data_dir: PathBuf,
    pub config_path: PathBuf,
    pub db_path: PathBuf,
    /// An existing config file was replaced.
    pub overwritten: bool,
}

/// Fields of an agent registration; the id is generated when absent.
#[derive(Debug, Clone)]
pub struct NewAgent {
    pub id: Option<String>,
    pub user_id: String,
    pub name: String,
    pub model_name: String,
}

/// An opened data directory: its config and its database.
pub struct ChatLens {
    data_dir: PathBuf,
    config: Config,
    db: Database,
}

impl ChatLens {
    /// Write the default config and create the database.
    pub fn init(data_dir: &Path, force: bool) -> Result<InitResult> {
        let config_path = Config::path_in(data_dir);
        let exists = config_path.exists();
        if exists && !force {
            return Err(Error::InvalidOperation(format!(
                "{} already exists (use --force to overwrite)",
                config_path.display()
            )));
        }

        std::fs::create_dir_all(data_dir)?;
        std::fs::write(&config_path, DEFAULT_CONFIG_TEMPLATE)?;

        let db_path = data_dir.join(DATABASE_FILE);
        Database::open(&db_path)?;

        tracing::info!(data_dir = %data_dir.display(), "workspace initialized");
        Ok(InitResult {
            data_dir: data_dir.to_path_buf(),
            config_path,
            db_path,
            overwritten: exists,
        })
    }

    /// Open `data_dir`; a missing config means defaults.
    pub fn open(data_dir: PathBuf) -> Result<Self> {
        let config = Config::load_from(&Config::path_in(&data_dir))?;
        let db = Database::open(&data_dir.join(DATABASE_FILE))?;
        Ok(Self {
            data_dir,
            config,
            db,
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn analyzer(&self) -> Result<Analyzer<'_>> {
        Analyzer::from_config(&self.db, &self.config, &self.data_dir)
    }

    pub fn register_agent(&self, agent: NewAgent) -> Result<AgentRecord> {
        let record = AgentRecord {
            id: agent
                .id
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            user_id: agent.user_id,
            name: agent.name,
            model_name: agent.model_name,
        };
        self.db.insert_agent(&record)?;
        Ok(record)
    }

    pub fn agents(&self) -> Result<Vec<AgentRecord>> {
        Ok(self.db.list_agents()?)
    }

    pub fn sessions(&self, filter: &SessionFilter) -> Result<Vec<SessionSummary>> {
        Ok(self.db.list_sessions(filter)?)
    }

    pub fn session(&self, id: &str) -> Result<Option<SessionRecord>> {
        Ok(self.db.get_session(id)?)
    }

    pub fn export_csv<W: Write>(&self, filter: &SessionFilter, writer: W) -> Result<usize> {
        let records = self.db.list_records(filter)?;
        write_sessions_csv(&records, writer)
    }

    pub fn stats(&self, filter: &SessionFilter) -> Result<SessionStats> {
        let records = self.db.list_records(filter)?;
        Ok(SessionStats::collect(&records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_refuses_to_overwrite() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let data_dir = temp_dir.path().join("lens");

        let first = ChatLens::init(&data_dir, false)?;
        assert!(!first.overwritten);
        assert!(first.db_path.exists());

        let err = ChatLens::init(&data_dir, false).err().unwrap();
        assert!(matches!(err, Error::InvalidOperation(_)));

        let forced = ChatLens::init(&data_dir, true)?;
        assert!(forced.overwritten);
        Ok(())
    }

    #[test]
    fn test_open_without_init_uses_defaults() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let lens = ChatLens::open(temp_dir.path().join("fresh"))?;
        assert_eq!(lens.config(), &Config::default());
        assert!(lens.agents()?.is_empty());
        Ok(())
    }

    #[test]
    fn test_register_agent_generates_id() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let lens = ChatLens::open(temp_dir.path().to_path_buf())?;

        let generated = lens.register_agent(NewAgent {
            id: None,
            user_id: "u1".to_string(),
            name: "Soporte".to_string(),
            model_name: "gpt-4".to_string(),
        })?;
        assert_eq!(generated.id.len(), 36);

        let explicit = lens.register_agent(NewAgent {
            id: Some("agent-7".to_string()),
            user_id: "u2".to_string(),
            name: "Ventas".to_string(),
            model_name: "gpt-4o".to_string(),
        })?;
        assert_eq!(explicit.id, "agent-7");
        assert_eq!(lens.agents()?.len(), 2);
        Ok(())
    }
}
