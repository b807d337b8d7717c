use chatlens_types::{Direction, RawMessage, parse_instant};
use chrono::{DateTime, Utc};

/// A raw message plus its parsed instant.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedMessage {
    pub raw: RawMessage,
    /// `None` when the timestamp was missing or unparsable.
    pub instant: Option<DateTime<Utc>>,
}

impl NormalizedMessage {
    pub fn direction(&self) -> Direction {
        self.raw.direction
    }

    pub fn text(&self) -> &str {
        self.raw.text()
    }
}

/// Build the canonical, time-ordered message sequence.
///
/// Parsing is lenient: an unparsable timestamp yields a `None` instant and
/// the message is kept. The sort is stable and `None` orders before every
/// instant, so undated messages lead the sequence in input order.
pub fn normalize_messages(raw: &[RawMessage]) -> Vec<NormalizedMessage> {
    let mut normalized: Vec<NormalizedMessage> = raw
        .iter()
        .map(|msg| {
            let instant = parse_instant(&msg.timestamp);
            if instant.is_none() {
                tracing::warn!(timestamp = %msg.timestamp, "unparsable message timestamp");
            }
            NormalizedMessage {
                raw: msg.clone(),
                instant,
            }
        })
        .collect();

    normalized.sort_by_key(|m| m.instant);
    normalized
}

/// Messages of one role that carry non-empty text.
pub fn messages_by_direction(
    messages: &[NormalizedMessage],
    direction: Direction,
) -> impl Iterator<Item = &NormalizedMessage> {
    messages
        .iter()
        .filter(move |m| m.direction() == direction && m.raw.has_text())
}
