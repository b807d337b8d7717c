use serde::{Deserialize, Serialize};

use super::agent::AgentData;

/// Message counts by author role.
///
/// Serialized as the `messageCount` block of a session record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageStats {
    #[serde(rename = "user")]
    pub user_count: usize,
    #[serde(rename = "agent")]
    pub agent_count: usize,
    #[serde(rename = "total")]
    pub total_count: usize,
}

/// Billed token usage for one conversation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenUsage {
    #[serde(rename = "promptTokens")]
    pub prompt_tokens: u64,
    /// Always 0 until prompt/completion accounting is split.
    #[serde(rename = "completionTokens")]
    pub completion_tokens: u64,
    #[serde(rename = "totalTokens")]
    pub total_tokens: u64,
    /// Cost in USD, rounded to 6 decimal places.
    pub cost: f64,
}

/// Responsiveness of the agent across paired user → agent turns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LatencyStats {
    /// `None` when no user message was ever answered.
    #[serde(rename = "averageSeconds")]
    pub average_seconds: Option<f64>,
    #[serde(rename = "interactionsCount")]
    pub interactions_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionMetadata {
    /// Predominant user language, or `"unknown"`.
    pub language: String,
}

/// Final analysis output for one conversation.
///
/// Built once, never mutated afterwards; the same value is handed to the
/// session store and returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "userCellphone")]
    pub user_cellphone: Option<String>,
    #[serde(rename = "agentData")]
    pub agent_data: AgentData,
    #[serde(rename = "startTime", alias = "createdAt")]
    pub start_time: Option<String>,
    #[serde(rename = "endTime")]
    pub end_time: Option<String>,
    #[serde(rename = "durationSeconds")]
    pub duration_seconds: i64,
    #[serde(rename = "tokenUsage")]
    pub token_usage: TokenUsage,
    pub successful: bool,
    pub tags: Vec<String>,
    #[serde(rename = "messageCount")]
    pub message_count: MessageStats,
    pub latency: LatencyStats,
    pub metadata: SessionMetadata,
    #[serde(rename = "conversationId")]
    pub conversation_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> SessionRecord {
        SessionRecord {
            id: "c1".to_string(),
            user_id: "u1".to_string(),
            user_cellphone: Some("+5491100000000".to_string()),
            agent_data: AgentData {
                agent_id: "a1".to_string(),
                model_llm: "gpt-4".to_string(),
                agent_name: "Soporte".to_string(),
                user_id: "u1".to_string(),
            },
            start_time: Some("2025-03-01T10:00:00Z".to_string()),
            end_time: None,
            duration_seconds: 300,
            token_usage: TokenUsage {
                prompt_tokens: 40,
                completion_tokens: 0,
                total_tokens: 40,
                cost: 0.5,
            },
            successful: true,
            tags: vec!["positive_closing".to_string(), "Successful".to_string()],
            message_count: MessageStats {
                user_count: 3,
                agent_count: 2,
                total_count: 5,
            },
            latency: LatencyStats {
                average_seconds: Some(12.5),
                interactions_count: 2,
            },
            metadata: SessionMetadata {
                language: "es".to_string(),
            },
            conversation_id: "c1".to_string(),
        }
    }

    #[test]
    fn test_session_record_wire_shape() {
        insta::assert_json_snapshot!(sample_record(), @r#"
        {
          "_id": "c1",
          "userId": "u1",
          "userCellphone": "+5491100000000",
          "agentData": {
            "agentId": "a1",
            "modelLLM": "gpt-4",
            "agentName": "Soporte",
            "userId": "u1"
          },
          "startTime": "2025-03-01T10:00:00Z",
          "endTime": null,
          "durationSeconds": 300,
          "tokenUsage": {
            "promptTokens": 40,
            "completionTokens": 0,
            "totalTokens": 40,
            "cost": 0.5
          },
          "successful": true,
          "tags": [
            "positive_closing",
            "Successful"
          ],
          "messageCount": {
            "user": 3,
            "agent": 2,
            "total": 5
          },
          "latency": {
            "averageSeconds": 12.5,
            "interactionsCount": 2
          },
          "metadata": {
            "language": "es"
          },
          "conversationId": "c1"
        }
        "#);
    }

    #[test]
    fn test_session_record_roundtrips_created_at_alias() {
        let mut value = serde_json::to_value(sample_record()).unwrap();
        let obj = value.as_object_mut().unwrap();
        let start = obj.remove("startTime").unwrap();
        obj.insert("createdAt".to_string(), start);

        let parsed: SessionRecord = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, sample_record());
    }
}
