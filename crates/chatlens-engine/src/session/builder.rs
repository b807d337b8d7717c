use chatlens_types::{
    AgentData, AgentDirectory, AgentRecord, ConversationPayload, PricingLookup, SessionMetadata,
    SessionRecord, SessionStore,
};

use crate::evaluator::SuccessEngine;
use crate::metrics::{
    LanguageDetector, TokenizerSource, UNKNOWN_LANGUAGE, WhatlangDetector, calculate_latency,
    conversation_duration_seconds, detect_languages, message_stats, predominant_language,
    token_usage,
};
use crate::normalize::normalize_messages;
use crate::{Error, Result};

/// Turns one conversation payload into a [`SessionRecord`].
///
/// Collaborators are borrowed and shared across a batch; no
/// state is carried from one conversation to the next.
pub struct SessionBuilder<'a> {
    agents: &'a dyn AgentDirectory,
    pricing: &'a dyn PricingLookup,
    tokenizers: &'a dyn TokenizerSource,
    engine: &'a SuccessEngine,
    language: &'a dyn LanguageDetector,
}

impl<'a> SessionBuilder<'a> {
    pub fn new(
        agents: &'a dyn AgentDirectory,
        pricing: &'a dyn PricingLookup,
        tokenizers: &'a dyn TokenizerSource,
        engine: &'a SuccessEngine,
    ) -> Self {
        Self {
            agents,
            pricing,
            tokenizers,
            engine,
            language: &WhatlangDetector,
        }
    }

    pub fn with_language_detector(mut self, detector: &'a dyn LanguageDetector) -> Self {
        self.language = detector;
        self
    }

    /// Compute the record without persisting it.
    pub fn assemble(&self, payload: &ConversationPayload) -> Result<SessionRecord> {
        let conversation = &payload.conversation;
        let messages = normalize_messages(&payload.messages);
        let stats = message_stats(&messages);
        let duration_seconds = conversation_duration_seconds(&messages);

        let (user_id, agent) = self.resolve_agent(payload)?;
        let token_usage = token_usage(
            &messages,
            conversation,
            &agent,
            self.tokenizers,
            self.pricing,
        )?;

        let latency = calculate_latency(&messages);
        let language = predominant_language(&detect_languages(&messages, self.language))
            .unwrap_or_else(|| UNKNOWN_LANGUAGE.to_string());

        let verdict = self.engine.evaluate(conversation, &messages, stats);

        Ok(SessionRecord {
            id: conversation.id.clone(),
            user_id,
            user_cellphone: conversation.from_phone.clone(),
            agent_data: AgentData::from(&agent),
            start_time: conversation.start().map(str::to_string),
            end_time: conversation.end().map(str::to_string),
            duration_seconds,
            token_usage,
            successful: verdict.successful,
            tags: verdict.tags,
            message_count: stats,
            latency,
            metadata: SessionMetadata { language },
            conversation_id: conversation.id.clone(),
        })
    }

    /// Compute the record and hand it to `store` exactly once.
    ///
    /// Nothing is stored when any step fails. Store failures are returned
    /// as-is, without retry.
    pub fn build_session(
        &self,
        payload: &ConversationPayload,
        store: &dyn SessionStore,
    ) -> Result<SessionRecord> {
        let record = self.assemble(payload)?;
        let stored_id = store
            .save_session(&record)
            .map_err(|source| Error::Store {
                conversation_id: record.id.clone(),
                source,
            })?;

        tracing::info!(
            conversation_id = %record.id,
            stored_id = %stored_id,
            successful = record.successful,
            "session stored"
        );
        Ok(record)
    }

    fn resolve_agent(&self, payload: &ConversationPayload) -> Result<(String, AgentRecord)> {
        let conversation = &payload.conversation;
        let user_id = conversation.user_id().ok_or_else(|| Error::MissingUserId {
            conversation_id: conversation.id.clone(),
        })?;

        let agent = self
            .agents
            .find_agent_by_user_id(user_id)
            .map_err(|source| Error::AgentLookup {
                user_id: user_id.to_string(),
                source,
            })?
            .ok_or_else(|| Error::AgentNotFound {
                user_id: user_id.to_string(),
            })?;
        Ok((user_id.to_string(), agent))
    }
}
