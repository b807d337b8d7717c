//! In-memory collaborators for exercising the session builder.

use chatlens_types::{
    AgentDirectory, AgentRecord, BoxError, PricingLookup, SessionRecord, SessionStore,
};
use std::cell::RefCell;

/// Agent directory over a fixed list; the first agent of a user wins.
#[derive(Debug, Clone, Default)]
pub struct StaticAgents {
    agents: Vec<AgentRecord>,
}

impl StaticAgents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_agent(mut self, user_id: &str, model: &str) -> Self {
        let id = format!("agent-{}", self.agents.len() + 1);
        self.agents.push(agent(&id, user_id, "Soporte", model));
        self
    }

    pub fn with_record(mut self, record: AgentRecord) -> Self {
        self.agents.push(record);
        self
    }
}

impl AgentDirectory for StaticAgents {
    fn find_agent_by_user_id(&self, user_id: &str) -> Result<Option<AgentRecord>, BoxError> {
        Ok(self.agents.iter().find(|a| a.user_id == user_id).cloned())
    }
}

/// Agent directory whose backend is always down.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableAgents;

impl AgentDirectory for UnavailableAgents {
    fn find_agent_by_user_id(&self, _user_id: &str) -> Result<Option<AgentRecord>, BoxError> {
        Err("agent directory unavailable".into())
    }
}

pub fn agent(id: &str, user_id: &str, name: &str, model: &str) -> AgentRecord {
    AgentRecord {
        id: id.to_string(),
        user_id: user_id.to_string(),
        name: name.to_string(),
        model_name: model.to_string(),
    }
}

/// Same USD price per million tokens for every model in `models`.
#[derive(Debug, Clone)]
pub struct FlatPricing {
    models: Vec<String>,
    per_million: f64,
}

impl FlatPricing {
    pub fn new(models: &[&str], per_million: f64) -> Self {
        Self {
            models: models.iter().map(|m| m.to_string()).collect(),
            per_million,
        }
    }
}

impl PricingLookup for FlatPricing {
    fn cost(
        &self,
        model: &str,
        prompt_tokens: u64,
        completion_tokens: u64,
    ) -> Result<Option<f64>, BoxError> {
        if !self.models.iter().any(|m| m == model) {
            return Ok(None);
        }
        let tokens = (prompt_tokens + completion_tokens) as f64;
        Ok(Some(tokens * self.per_million / 1_000_000.0))
    }
}

/// Session store that keeps every saved record, or refuses all writes.
#[derive(Debug, Default)]
pub struct RecordingStore {
    saved: RefCell<Vec<SessionRecord>>,
    fail_writes: bool,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            saved: RefCell::new(Vec::new()),
            fail_writes: true,
        }
    }

    pub fn saved(&self) -> Vec<SessionRecord> {
        self.saved.borrow().clone()
    }
}

impl SessionStore for RecordingStore {
    fn save_session(&self, record: &SessionRecord) -> Result<String, BoxError> {
        if self.fail_writes {
            return Err("store is read-only".into());
        }
        self.saved.borrow_mut().push(record.clone());
        Ok(record.id.clone())
    }
}
