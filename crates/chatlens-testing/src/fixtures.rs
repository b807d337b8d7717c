//! Conversation payload builders.
//!
//! Messages get timestamps from a running clock that starts at
//! `2025-03-01T10:00:00Z` and advances by a fixed step per message, so
//! tests only spell out timestamps when the exact value matters.

use chatlens_types::{Conversation, ConversationPayload, Direction, RawMessage};
use chrono::{DateTime, Duration, SecondsFormat, TimeZone, Utc};
use serde_json::Value;

pub const DEFAULT_USER_ID: &str = "user-1";
pub const DEFAULT_PHONE: &str = "+5491100000000";

/// Fluent builder for `{conversation, messages}` payloads.
#[derive(Debug, Clone)]
pub struct ConversationBuilder {
    conversation: Conversation,
    messages: Vec<RawMessage>,
    clock: DateTime<Utc>,
    step: Duration,
}

impl ConversationBuilder {
    pub fn new(id: &str) -> Self {
        let mut conversation = Conversation::new(id);
        conversation.user_id = Some(DEFAULT_USER_ID.to_string());
        conversation.from_phone = Some(DEFAULT_PHONE.to_string());

        Self {
            conversation,
            messages: Vec::new(),
            clock: Utc
                .with_ymd_and_hms(2025, 3, 1, 10, 0, 0)
                .single()
                .expect("valid fixture start"),
            step: Duration::seconds(5),
        }
    }

    pub fn user_id(mut self, user_id: &str) -> Self {
        self.conversation.user_id = Some(user_id.to_string());
        self
    }

    pub fn without_user_id(mut self) -> Self {
        self.conversation.user_id = None;
        self
    }

    pub fn phone(mut self, phone: &str) -> Self {
        self.conversation.from_phone = Some(phone.to_string());
        self
    }

    /// Set `startTime`/`endTime`.
    pub fn window(mut self, start: &str, end: &str) -> Self {
        self.conversation.start_time = Some(start.to_string());
        self.conversation.end_time = Some(end.to_string());
        self
    }

    /// Set `createdAt`/`updatedAt`.
    pub fn created_updated(mut self, created: &str, updated: &str) -> Self {
        self.conversation.created_at = Some(created.to_string());
        self.conversation.updated_at = Some(updated.to_string());
        self
    }

    /// Seconds the clock advances after each message.
    pub fn step_seconds(mut self, seconds: i64) -> Self {
        self.step = Duration::seconds(seconds);
        self
    }

    /// Advance the clock without adding a message.
    pub fn wait(mut self, seconds: i64) -> Self {
        self.clock += Duration::seconds(seconds);
        self
    }

    pub fn user(self, text: &str) -> Self {
        self.push(Direction::User, text)
    }

    pub fn agent(self, text: &str) -> Self {
        self.push(Direction::Agent, text)
    }

    /// Add a user message with an explicit timestamp value.
    pub fn user_at(mut self, text: &str, timestamp: impl Into<Value>) -> Self {
        self.messages
            .push(RawMessage::new(Direction::User, text, timestamp));
        self
    }

    /// Add an agent message with an explicit timestamp value.
    pub fn agent_at(mut self, text: &str, timestamp: impl Into<Value>) -> Self {
        self.messages
            .push(RawMessage::new(Direction::Agent, text, timestamp));
        self
    }

    pub fn message(mut self, message: RawMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn build(self) -> ConversationPayload {
        ConversationPayload {
            conversation: self.conversation,
            messages: self.messages,
        }
    }

    pub fn to_json(&self) -> Value {
        serde_json::json!({
            "conversation": self.conversation,
            "messages": self.messages,
        })
    }

    fn push(mut self, direction: Direction, text: &str) -> Self {
        let timestamp = self.clock.to_rfc3339_opts(SecondsFormat::Secs, true);
        self.messages
            .push(RawMessage::new(direction, text, timestamp));
        self.clock += self.step;
        self
    }
}

/// `count` user messages with distinct short texts, each answered by the agent.
pub fn chatty_conversation(id: &str, count: usize) -> ConversationBuilder {
    (0..count).fold(ConversationBuilder::new(id), |builder, i| {
        builder
            .user(&format!("consulta {}", i + 1))
            .agent(&format!("respuesta {}", i + 1))
    })
}
