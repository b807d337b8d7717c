use chatlens_types::SessionRecord;
use serde::Serialize;
use std::collections::BTreeMap;

/// Aggregates over a set of stored sessions.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionStats {
    pub total_sessions: usize,
    pub successful: usize,
    pub unsuccessful: usize,
    /// Fraction of successful sessions, `None` when there are none.
    pub success_rate: Option<f64>,
    pub average_duration_seconds: Option<f64>,
    pub total_tokens: u64,
    pub total_cost: f64,
    pub average_cost: Option<f64>,
    /// Mean of the per-session averages, over sessions that have one.
    pub average_latency_seconds: Option<f64>,
    pub languages: BTreeMap<String, usize>,
    pub tags: BTreeMap<String, usize>,
}

impl SessionStats {
    pub fn collect(records: &[SessionRecord]) -> Self {
        let mut stats = SessionStats {
            total_sessions: records.len(),
            ..Default::default()
        };

        let mut duration_sum = 0i64;
        let mut latency_sum = 0.0;
        let mut latency_count = 0usize;

        for record in records {
            if record.successful {
                stats.successful += 1;
            } else {
                stats.unsuccessful += 1;
            }
            duration_sum += record.duration_seconds;
            stats.total_tokens += record.token_usage.total_tokens;
            stats.total_cost += record.token_usage.cost;

            if let Some(latency) = record.latency.average_seconds {
                latency_sum += latency;
                latency_count += 1;
            }

            *stats
                .languages
                .entry(record.metadata.language.clone())
                .or_default() += 1;
            for tag in &record.tags {
                *stats.tags.entry(tag.clone()).or_default() += 1;
            }
        }

        stats.total_cost = round6(stats.total_cost);

        if !records.is_empty() {
            let n = records.len() as f64;
            stats.success_rate = Some(stats.successful as f64 / n);
            stats.average_duration_seconds = Some(duration_sum as f64 / n);
            stats.average_cost = Some(round6(stats.total_cost / n));
        }
        if latency_count > 0 {
            stats.average_latency_seconds = Some(latency_sum / latency_count as f64);
        }

        stats
    }
}

fn round6(value: f64) -> f64 {
    (value * 1_000_000.0).round() / 1_000_000.0
}
