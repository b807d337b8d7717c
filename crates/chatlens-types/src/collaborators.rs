// External collaborators of the analysis core.
// The engine only sees these traits; storage and pricing backends live in
// the index and runtime crates.

use crate::{AgentRecord, SessionRecord};

/// Error type returned by collaborator implementations.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Resolves the agent configured for a user.
pub trait AgentDirectory {
    /// `Ok(None)` when the user has no agent.
    fn find_agent_by_user_id(&self, user_id: &str) -> Result<Option<AgentRecord>, BoxError>;
}

/// Converts token counts into a currency amount for a model.
pub trait PricingLookup {
    /// `Ok(None)` when the model has no known price.
    fn cost(
        &self,
        model: &str,
        prompt_tokens: u64,
        completion_tokens: u64,
    ) -> Result<Option<f64>, BoxError>;
}

/// Persists finished session records.
pub trait SessionStore {
    /// Store one record and return its storage identifier.
    fn save_session(&self, record: &SessionRecord) -> Result<String, BoxError>;
}

impl<T: AgentDirectory + ?Sized> AgentDirectory for &T {
    fn find_agent_by_user_id(&self, user_id: &str) -> Result<Option<AgentRecord>, BoxError> {
        (*self).find_agent_by_user_id(user_id)
    }
}

impl<T: PricingLookup + ?Sized> PricingLookup for &T {
    fn cost(
        &self,
        model: &str,
        prompt_tokens: u64,
        completion_tokens: u64,
    ) -> Result<Option<f64>, BoxError> {
        (*self).cost(model, prompt_tokens, completion_tokens)
    }
}

impl<T: SessionStore + ?Sized> SessionStore for &T {
    fn save_session(&self, record: &SessionRecord) -> Result<String, BoxError> {
        (*self).save_session(record)
    }
}
