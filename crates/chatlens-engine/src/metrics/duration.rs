use chatlens_types::parse_instant_str;

use crate::normalize::NormalizedMessage;

/// Whole seconds from the first to the last message of the normalized sequence.
///
/// Undated messages sort first, so a single unparsable timestamp makes the
/// duration 0, as does a sequence of fewer than two messages.
pub fn conversation_duration_seconds(messages: &[NormalizedMessage]) -> i64 {
    let (Some(first), Some(last)) = (messages.first(), messages.last()) else {
        return 0;
    };
    match (first.instant, last.instant) {
        (Some(first), Some(last)) => (last - first).num_seconds(),
        _ => 0,
    }
}

/// Whether the `start..end` window is strictly longer than `threshold_minutes`.
///
/// A missing or unparsable bound means "not long", never an error.
pub fn is_long_window(start: Option<&str>, end: Option<&str>, threshold_minutes: f64) -> bool {
    let (Some(start), Some(end)) = (
        start.and_then(parse_instant_str),
        end.and_then(parse_instant_str),
    ) else {
        return false;
    };
    let minutes = (end - start).num_milliseconds() as f64 / 60_000.0;
    minutes > threshold_minutes
}
