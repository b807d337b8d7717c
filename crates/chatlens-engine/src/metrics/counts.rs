use chatlens_types::{Direction, MessageStats};

use crate::normalize::NormalizedMessage;

/// Count messages authored by `direction`, empty ones included.
pub fn count_by_direction(messages: &[NormalizedMessage], direction: Direction) -> usize {
    messages.iter().filter(|m| m.direction() == direction).count()
}

pub fn message_stats(messages: &[NormalizedMessage]) -> MessageStats {
    MessageStats {
        user_count: count_by_direction(messages, Direction::User),
        agent_count: count_by_direction(messages, Direction::Agent),
        total_count: messages.len(),
    }
}
