use serde::{Deserialize, Serialize};

use super::message::RawMessage;

/// Conversation header as exported by the chat backend.
///
/// The backend has shipped both `startTime`/`endTime` and
/// `createdAt`/`updatedAt` over time, so all four are accepted and
/// resolved through [`Conversation::start`] and [`Conversation::end`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,

    #[serde(rename = "userId", default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    #[serde(
        rename = "from",
        alias = "fromPhone",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub from_phone: Option<String>,

    #[serde(rename = "startTime", default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,

    #[serde(rename = "endTime", default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,

    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Conversation {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Start of the conversation window (`startTime`, else `createdAt`).
    pub fn start(&self) -> Option<&str> {
        self.start_time.as_deref().or(self.created_at.as_deref())
    }

    /// End of the conversation window (`endTime`, else `updatedAt`).
    pub fn end(&self) -> Option<&str> {
        self.end_time.as_deref().or(self.updated_at.as_deref())
    }

    /// User id, treating an empty string as missing.
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref().filter(|id| !id.is_empty())
    }
}

/// One unit of analysis input: `{conversation, messages}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationPayload {
    pub conversation: Conversation,
    pub messages: Vec<RawMessage>,
}
