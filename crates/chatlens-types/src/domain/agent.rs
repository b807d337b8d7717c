use serde::{Deserialize, Serialize};

/// Agent metadata as held by the agent directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentRecord {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    pub name: String,
    /// LLM model the agent runs on; may be empty for half-configured agents.
    #[serde(rename = "modelName", default)]
    pub model_name: String,
}

impl AgentRecord {
    pub fn model_name(&self) -> Option<&str> {
        let name = self.model_name.trim();
        if name.is_empty() { None } else { Some(name) }
    }
}

/// Agent snapshot embedded in a session record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentData {
    #[serde(rename = "agentId")]
    pub agent_id: String,
    #[serde(rename = "modelLLM")]
    pub model_llm: String,
    #[serde(rename = "agentName")]
    pub agent_name: String,
    #[serde(rename = "userId")]
    pub user_id: String,
}

impl From<&AgentRecord> for AgentData {
    fn from(agent: &AgentRecord) -> Self {
        Self {
            agent_id: agent.id.clone(),
            model_llm: agent.model_name.clone(),
            agent_name: agent.name.clone(),
            user_id: agent.user_id.clone(),
        }
    }
}
