use chatlens_types::parse_instant_str;
use chrono::{DateTime, Days, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Queryable columns of a stored session, without the full record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub id: String,
    pub conversation_id: String,
    pub user_id: String,
    pub agent_id: String,
    /// Normalized UTC instant, `None` when the record's value was unparsable.
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub successful: bool,
    pub duration_seconds: i64,
    pub total_tokens: u64,
    pub cost: f64,
    pub language: String,
    pub stored_at: String,
}

/// Filter for session listings.
///
/// The end-time range is inclusive on both sides. A bare `YYYY-MM-DD`
/// upper bound covers that whole day.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionFilter {
    pub user_id: Option<String>,
    pub agent_id: Option<String>,
    pub(crate) end_from: Option<String>,
    /// Exclusive upper bound, already adjusted for inclusive input.
    pub(crate) end_before: Option<String>,
    pub limit: Option<usize>,
}

impl SessionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn agent(mut self, agent_id: impl Into<String>) -> Self {
        self.agent_id = Some(agent_id.into());
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Restrict to sessions whose end time falls within `[from, to]`.
    pub fn end_between(mut self, from: Option<&str>, to: Option<&str>) -> Result<Self> {
        if let Some(from) = from {
            let instant = parse_bound(from)?;
            self.end_from = Some(format_instant(instant));
        }
        if let Some(to) = to {
            let exclusive = match NaiveDate::parse_from_str(to.trim(), "%Y-%m-%d") {
                Ok(day) => day
                    .checked_add_days(Days::new(1))
                    .and_then(|next| next.and_hms_opt(0, 0, 0))
                    .map(|naive| naive.and_utc())
                    .ok_or_else(|| Error::Query(format!("date out of range: {}", to)))?,
                Err(_) => parse_bound(to)? + chrono::Duration::milliseconds(1),
            };
            self.end_before = Some(format_instant(exclusive));
        }
        Ok(self)
    }
}

fn parse_bound(raw: &str) -> Result<DateTime<Utc>> {
    parse_instant_str(raw).ok_or_else(|| Error::Query(format!("invalid date or time: {}", raw)))
}

/// Column representation of an instant.
pub(crate) fn format_instant(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Normalize a record timestamp for storage; unparsable values become NULL.
pub(crate) fn normalize_column(raw: Option<&str>) -> Option<String> {
    raw.and_then(parse_instant_str).map(format_instant)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_date_upper_bound_covers_the_day() {
        let filter = SessionFilter::new()
            .end_between(Some("2025-03-01"), Some("2025-03-01"))
            .unwrap();
        assert_eq!(filter.end_from.as_deref(), Some("2025-03-01T00:00:00.000Z"));
        assert_eq!(filter.end_before.as_deref(), Some("2025-03-02T00:00:00.000Z"));
    }

    #[test]
    fn test_instant_upper_bound_is_inclusive() {
        let filter = SessionFilter::new()
            .end_between(None, Some("2025-03-01T10:00:00Z"))
            .unwrap();
        assert_eq!(filter.end_before.as_deref(), Some("2025-03-01T10:00:00.001Z"));
    }

    #[test]
    fn test_invalid_bound_is_rejected() {
        let err = SessionFilter::new()
            .end_between(Some("last tuesday"), None)
            .unwrap_err();
        assert!(matches!(err, Error::Query(_)));
    }

    #[test]
    fn test_normalize_column() {
        assert_eq!(
            normalize_column(Some("2025-03-01T07:00:00-03:00")).as_deref(),
            Some("2025-03-01T10:00:00.000Z")
        );
        assert_eq!(normalize_column(Some("garbage")), None);
        assert_eq!(normalize_column(None), None);
    }
}
