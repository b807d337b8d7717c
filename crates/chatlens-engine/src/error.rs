use chatlens_types::BoxError;
use thiserror::Error;

/// Result type for chatlens-engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Failure class of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input is not shaped like `{conversation, messages}`.
    Structural,
    /// A required identity or lookup could not be resolved.
    Lookup,
    /// An external collaborator (directory, pricing, store) failed.
    Collaborator,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Structural => "structural",
            ErrorKind::Lookup => "lookup",
            ErrorKind::Collaborator => "collaborator",
        }
    }
}

/// Errors that abort the analysis of one conversation.
///
/// Data-quality problems (bad timestamps, undetectable language, no latency
/// pairs) never surface here; they degrade to neutral values instead.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("input is missing required key '{0}'")]
    MissingField(&'static str),

    #[error("malformed conversation payload: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("conversation {conversation_id} has no 'userId'")]
    MissingUserId { conversation_id: String },

    #[error("no agent found for userId={user_id}")]
    AgentNotFound { user_id: String },

    #[error("agent for userId={user_id} has no model name")]
    MissingModelName { user_id: String },

    #[error("no pricing known for model '{model}'")]
    UnknownModelPricing { model: String },

    #[error("tokenizer unavailable: {0}")]
    Tokenizer(String),

    #[error("keyword table error: {0}")]
    Keywords(String),

    #[error("agent lookup failed for userId={user_id}: {source}")]
    AgentLookup {
        user_id: String,
        #[source]
        source: BoxError,
    },

    #[error("pricing lookup failed for model '{model}': {source}")]
    Pricing {
        model: String,
        #[source]
        source: BoxError,
    },

    #[error("failed to store session {conversation_id}: {source}")]
    Store {
        conversation_id: String,
        #[source]
        source: BoxError,
    },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidInput(_) | Error::MissingField(_) | Error::Malformed(_) => {
                ErrorKind::Structural
            }
            Error::MissingUserId { .. }
            | Error::AgentNotFound { .. }
            | Error::MissingModelName { .. }
            | Error::UnknownModelPricing { .. }
            | Error::Tokenizer(_)
            | Error::Keywords(_) => ErrorKind::Lookup,
            Error::AgentLookup { .. } | Error::Pricing { .. } | Error::Store { .. } => {
                ErrorKind::Collaborator
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_kind_classification() {
        assert_eq!(Error::MissingField("messages").kind(), ErrorKind::Structural);
        assert_eq!(
            Error::AgentNotFound {
                user_id: "u1".into()
            }
            .kind(),
            ErrorKind::Lookup
        );
        let store = Error::Store {
            conversation_id: "c1".into(),
            source: "disk full".into(),
        };
        assert_eq!(store.kind(), ErrorKind::Collaborator);
    }

    #[test]
    fn test_collaborator_error_keeps_source() {
        let err = Error::AgentLookup {
            user_id: "u1".into(),
            source: "connection refused".into(),
        };
        assert_eq!(
            err.to_string(),
            "agent lookup failed for userId=u1: connection refused"
        );
        assert!(err.source().is_some());
    }
}
