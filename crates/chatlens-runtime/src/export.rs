use chatlens_types::SessionRecord;
use serde::Serialize;
use std::io::Write;

use crate::Result;

/// One flat CSV row per stored session.
#[derive(Debug, Serialize)]
struct SessionRow<'a> {
    #[serde(rename = "conversationId")]
    conversation_id: &'a str,
    #[serde(rename = "userId")]
    user_id: &'a str,
    #[serde(rename = "userCellphone")]
    user_cellphone: Option<&'a str>,
    #[serde(rename = "agentId")]
    agent_id: &'a str,
    #[serde(rename = "agentName")]
    agent_name: &'a str,
    #[serde(rename = "modelLLM")]
    model_llm: &'a str,
    #[serde(rename = "startTime")]
    start_time: Option<&'a str>,
    #[serde(rename = "endTime")]
    end_time: Option<&'a str>,
    #[serde(rename = "durationSeconds")]
    duration_seconds: i64,
    #[serde(rename = "userMessages")]
    user_messages: usize,
    #[serde(rename = "agentMessages")]
    agent_messages: usize,
    #[serde(rename = "totalMessages")]
    total_messages: usize,
    #[serde(rename = "promptTokens")]
    prompt_tokens: u64,
    #[serde(rename = "completionTokens")]
    completion_tokens: u64,
    #[serde(rename = "totalTokens")]
    total_tokens: u64,
    cost: f64,
    #[serde(rename = "averageLatencySeconds")]
    average_latency_seconds: Option<f64>,
    interactions: usize,
    language: &'a str,
    successful: bool,
    tags: String,
}

impl<'a> From<&'a SessionRecord> for SessionRow<'a> {
    fn from(record: &'a SessionRecord) -> Self {
        Self {
            conversation_id: &record.conversation_id,
            user_id: &record.user_id,
            user_cellphone: record.user_cellphone.as_deref(),
            agent_id: &record.agent_data.agent_id,
            agent_name: &record.agent_data.agent_name,
            model_llm: &record.agent_data.model_llm,
            start_time: record.start_time.as_deref(),
            end_time: record.end_time.as_deref(),
            duration_seconds: record.duration_seconds,
            user_messages: record.message_count.user_count,
            agent_messages: record.message_count.agent_count,
            total_messages: record.message_count.total_count,
            prompt_tokens: record.token_usage.prompt_tokens,
            completion_tokens: record.token_usage.completion_tokens,
            total_tokens: record.token_usage.total_tokens,
            cost: record.token_usage.cost,
            average_latency_seconds: record.latency.average_seconds,
            interactions: record.latency.interactions_count,
            language: &record.metadata.language,
            successful: record.successful,
            tags: record.tags.join("|"),
        }
    }
}

/// Write `records` as CSV; the header goes out with the first row.
/// Returns the number of rows.
pub fn write_sessions_csv<W: Write>(records: &[SessionRecord], writer: W) -> Result<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in records {
        csv_writer.serialize(SessionRow::from(record))?;
    }
    csv_writer.flush()?;
    Ok(records.len())
}
