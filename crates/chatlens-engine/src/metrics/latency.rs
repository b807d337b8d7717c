use chatlens_types::{Direction, LatencyStats};

use crate::normalize::NormalizedMessage;

/// Average agent response time over paired user → agent turns.
///
/// Each user message is paired with the next agent message whose instant is
/// strictly later. Scanning resumes after the paired agent message, so one
/// agent reply never answers two user messages; user messages sent before
/// that reply go unpaired. Undated messages are ignored.
pub fn calculate_latency(messages: &[NormalizedMessage]) -> LatencyStats {
    let dated: Vec<_> = messages
        .iter()
        .filter_map(|m| m.instant.map(|ts| (m.direction(), ts)))
        .collect();

    let mut total_ms: i64 = 0;
    let mut interactions = 0usize;

    let mut i = 0;
    while i < dated.len() {
        let (direction, user_ts) = dated[i];
        if direction == Direction::User {
            let reply = dated[i + 1..]
                .iter()
                .position(|&(d, ts)| d == Direction::Agent && ts > user_ts);
            if let Some(offset) = reply {
                let j = i + 1 + offset;
                total_ms += (dated[j].1 - user_ts).num_milliseconds();
                interactions += 1;
                i = j;
            }
        }
        i += 1;
    }

    let average_seconds = if interactions > 0 {
        Some(total_ms as f64 / 1000.0 / interactions as f64)
    } else {
        None
    };

    LatencyStats {
        average_seconds,
        interactions_count: interactions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize_messages;
    use chatlens_types::RawMessage;

    fn msg(direction: Direction, ts: &str) -> RawMessage {
        RawMessage::new(direction, "x", ts)
    }

    #[test]
    fn test_alternating_turns() {
        let raw = vec![
            msg(Direction::User, "2025-03-01T10:00:00Z"),
            msg(Direction::Agent, "2025-03-01T10:00:10Z"),
            msg(Direction::User, "2025-03-01T10:01:00Z"),
            msg(Direction::Agent, "2025-03-01T10:01:20Z"),
        ];
        let stats = calculate_latency(&normalize_messages(&raw));
        assert_eq!(stats.interactions_count, 2);
        assert_eq!(stats.average_seconds, Some(15.0));
    }

    #[test]
    fn test_one_reply_is_not_shared() {
        let raw = vec![
            msg(Direction::User, "2025-03-01T10:00:00Z"),
            msg(Direction::User, "2025-03-01T10:00:05Z"),
            msg(Direction::Agent, "2025-03-01T10:00:10Z"),
        ];
        let stats = calculate_latency(&normalize_messages(&raw));
        assert_eq!(stats.interactions_count, 1);
        assert_eq!(stats.average_seconds, Some(10.0));
    }

    #[test]
    fn test_simultaneous_reply_is_skipped() {
        let raw = vec![
            msg(Direction::User, "2025-03-01T10:00:00Z"),
            msg(Direction::Agent, "2025-03-01T10:00:00Z"),
            msg(Direction::Agent, "2025-03-01T10:00:04Z"),
        ];
        let stats = calculate_latency(&normalize_messages(&raw));
        assert_eq!(stats.interactions_count, 1);
        assert_eq!(stats.average_seconds, Some(4.0));
    }

    #[test]
    fn test_no_pairing_is_none_not_zero() {
        let raw = vec![
            msg(Direction::Agent, "2025-03-01T10:00:00Z"),
            msg(Direction::User, "2025-03-01T10:00:10Z"),
        ];
        let stats = calculate_latency(&normalize_messages(&raw));
        assert_eq!(stats.interactions_count, 0);
        assert_eq!(stats.average_seconds, None);
    }

    #[test]
    fn test_undated_messages_are_ignored() {
        let raw = vec![
            msg(Direction::User, "bad"),
            msg(Direction::User, "2025-03-01T10:00:00Z"),
            msg(Direction::Agent, "2025-03-01T10:00:02.500Z"),
        ];
        let stats = calculate_latency(&normalize_messages(&raw));
        assert_eq!(stats.interactions_count, 1);
        assert_eq!(stats.average_seconds, Some(2.5));
    }
}
