use chatlens_types::{Conversation, MessageStats};

use super::tags::TagSet;
use crate::normalize::NormalizedMessage;

/// Mutable accumulator threaded through the detectors of one evaluation.
///
/// Created per conversation and dropped once the verdict is taken; nothing
/// in it outlives the evaluation.
#[derive(Debug)]
pub struct EvaluationContext<'a> {
    pub conversation: &'a Conversation,
    pub messages: &'a [NormalizedMessage],
    pub message_stats: MessageStats,
    pub score: i64,
    pub tags: TagSet,
}

impl<'a> EvaluationContext<'a> {
    pub fn new(
        conversation: &'a Conversation,
        messages: &'a [NormalizedMessage],
        message_stats: MessageStats,
    ) -> Self {
        Self {
            conversation,
            messages,
            message_stats,
            score: 0,
            tags: TagSet::new(),
        }
    }
}
