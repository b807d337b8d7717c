use chatlens_runtime::{BatchReport, InitResult, SessionStats, SessionSummary};
use chatlens_types::{AgentRecord, SessionRecord};
use owo_colors::OwoColorize;
use serde::Serialize;
use std::fmt::Write;

use super::PlainText;

fn verdict(successful: bool, color: bool) -> String {
    match (successful, color) {
        (true, true) => format!("{}", "Successful".green()),
        (false, true) => format!("{}", "Unsuccessful".red()),
        (true, false) => "Successful".to_string(),
        (false, false) => "Unsuccessful".to_string(),
    }
}

fn or_dash(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}

impl PlainText for InitResult {
    fn plain(&self, _color: bool) -> String {
        let mut out = String::new();
        let action = if self.overwritten { "Reinitialized" } else { "Initialized" };
        let _ = writeln!(out, "{} chatlens workspace at {}", action, self.data_dir.display());
        let _ = writeln!(out, "  config:   {}", self.config_path.display());
        let _ = writeln!(out, "  database: {}", self.db_path.display());
        out
    }
}

impl PlainText for BatchReport {
    fn plain(&self, color: bool) -> String {
        let mut out = String::new();

        for record in &self.records {
            let _ = writeln!(
                out,
                "{}  {}  {}s  {} tokens  ${:.6}  lang={}  tags={}",
                record.id,
                verdict(record.successful, color),
                record.duration_seconds,
                record.token_usage.total_tokens,
                record.token_usage.cost,
                record.metadata.language,
                record.tags.join(",")
            );
        }

        for failure in &self.failures {
            let label = match &failure.source {
                Some(source) => format!("{}#{}", source, failure.index),
                None => format!("#{}", failure.index),
            };
            let line = format!(
                "failed {} {}: {}",
                label,
                or_dash(failure.conversation_id.as_deref()),
                failure.error
            );
            if color {
                let _ = writeln!(out, "{}", line.red());
            } else {
                let _ = writeln!(out, "{}", line);
            }
        }

        let _ = writeln!(
            out,
            "Analyzed {} conversation(s), {} failed",
            self.records.len(),
            self.failures.len()
        );
        out
    }
}

#[derive(Debug, Serialize)]
pub struct AgentList {
    pub agents: Vec<AgentRecord>,
}

impl PlainText for AgentList {
    fn plain(&self, color: bool) -> String {
        if self.agents.is_empty() {
            return "No agents registered.\n".to_string();
        }

        let mut out = String::new();
        let header = format!("{:<38} {:<20} {:<20} {}", "ID", "USER", "NAME", "MODEL");
        if color {
            let _ = writeln!(out, "{}", header.bold());
        } else {
            let _ = writeln!(out, "{}", header);
        }
        for agent in &self.agents {
            let _ = writeln!(
                out,
                "{:<38} {:<20} {:<20} {}",
                agent.id, agent.user_id, agent.name, agent.model_name
            );
        }
        out
    }
}

#[derive(Debug, Serialize)]
pub struct AgentAdded {
    pub agent: AgentRecord,
}

impl PlainText for AgentAdded {
    fn plain(&self, _color: bool) -> String {
        format!(
            "Registered agent {} ({}, {}) for user {}\n",
            self.agent.id, self.agent.name, self.agent.model_name, self.agent.user_id
        )
    }
}

#[derive(Debug, Serialize)]
pub struct SessionList {
    pub sessions: Vec<SessionSummary>,
}

impl PlainText for SessionList {
    fn plain(&self, color: bool) -> String {
        if self.sessions.is_empty() {
            return "No sessions found.\n".to_string();
        }

        let mut out = String::new();
        for session in &self.sessions {
            let _ = writeln!(
                out,
                "{}  {}  user={}  {}  {}s  {} tokens  ${:.6}  {}",
                or_dash(session.end_time.as_deref()),
                session.id,
                session.user_id,
                verdict(session.successful, color),
                session.duration_seconds,
                session.total_tokens,
                session.cost,
                session.language
            );
        }
        out
    }
}

#[derive(Debug, Serialize)]
pub struct SessionDetail {
    pub session: SessionRecord,
}

impl PlainText for SessionDetail {
    fn plain(&self, color: bool) -> String {
        let s = &self.session;
        let mut out = String::new();
        let title = format!("Session {}", s.id);
        if color {
            let _ = writeln!(out, "{}", title.bold());
        } else {
            let _ = writeln!(out, "{}", title);
        }
        let _ = writeln!(out, "  verdict:   {}", verdict(s.successful, color));
        let _ = writeln!(out, "  tags:      {}", s.tags.join(", "));
        let _ = writeln!(
            out,
            "  user:      {} ({})",
            s.user_id,
            or_dash(s.user_cellphone.as_deref())
        );
        let _ = writeln!(
            out,
            "  agent:     {} {} [{}]",
            s.agent_data.agent_id, s.agent_data.agent_name, s.agent_data.model_llm
        );
        let _ = writeln!(
            out,
            "  window:    {} .. {} ({}s)",
            or_dash(s.start_time.as_deref()),
            or_dash(s.end_time.as_deref()),
            s.duration_seconds
        );
        let _ = writeln!(
            out,
            "  messages:  {} user, {} agent, {} total",
            s.message_count.user_count, s.message_count.agent_count, s.message_count.total_count
        );
        let _ = writeln!(
            out,
            "  tokens:    {} prompt, {} completion, ${:.6}",
            s.token_usage.prompt_tokens, s.token_usage.completion_tokens, s.token_usage.cost
        );
        let latency = match s.latency.average_seconds {
            Some(avg) => format!("{:.1}s avg over {}", avg, s.latency.interactions_count),
            None => "-".to_string(),
        };
        let _ = writeln!(out, "  latency:   {}", latency);
        let _ = writeln!(out, "  language:  {}", s.metadata.language);
        out
    }
}

impl PlainText for SessionStats {
    fn plain(&self, _color: bool) -> String {
        fn opt(value: Option<f64>, precision: usize) -> String {
            value.map_or_else(|| "-".to_string(), |v| format!("{:.*}", precision, v))
        }

        let mut out = String::new();
        let _ = writeln!(out, "Sessions:          {}", self.total_sessions);
        let _ = writeln!(
            out,
            "Successful:        {} ({} unsuccessful)",
            self.successful, self.unsuccessful
        );
        let _ = writeln!(
            out,
            "Success rate:      {}",
            self.success_rate
                .map_or_else(|| "-".to_string(), |r| format!("{:.1}%", r * 100.0))
        );
        let _ = writeln!(out, "Avg duration:      {}s", opt(self.average_duration_seconds, 1));
        let _ = writeln!(out, "Avg latency:       {}s", opt(self.average_latency_seconds, 1));
        let _ = writeln!(out, "Total tokens:      {}", self.total_tokens);
        let _ = writeln!(out, "Total cost:        ${:.6}", self.total_cost);
        let _ = writeln!(out, "Avg cost:          ${}", opt(self.average_cost, 6));

        if !self.languages.is_empty() {
            let langs: Vec<String> = self
                .languages
                .iter()
                .map(|(lang, n)| format!("{}={}", lang, n))
                .collect();
            let _ = writeln!(out, "Languages:         {}", langs.join(", "));
        }
        if !self.tags.is_empty() {
            let tags: Vec<String> = self
                .tags
                .iter()
                .map(|(tag, n)| format!("{}={}", tag, n))
                .collect();
            let _ = writeln!(out, "Tags:              {}", tags.join(", "));
        }
        out
    }
}

#[derive(Debug, Serialize)]
pub struct ExportSummary {
    pub path: String,
    pub rows: usize,
}

impl PlainText for ExportSummary {
    fn plain(&self, _color: bool) -> String {
        format!("Exported {} session(s) to {}\n", self.rows, self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatlens_runtime::ItemFailure;

    #[test]
    fn test_batch_report_plain_without_color() {
        let report = BatchReport {
            records: Vec::new(),
            failures: vec![ItemFailure {
                index: 2,
                source: Some("in.json".to_string()),
                conversation_id: Some("c3".to_string()),
                kind: "lookup".to_string(),
                error: "no agent found for userId=u9".to_string(),
            }],
        };

        insta::assert_snapshot!(report.plain(false), @r"
        failed in.json#2 c3: no agent found for userId=u9
        Analyzed 0 conversation(s), 1 failed
        ");
    }

    #[test]
    fn test_empty_lists() {
        assert_eq!(AgentList { agents: vec![] }.plain(false), "No agents registered.\n");
        assert_eq!(
            SessionList { sessions: vec![] }.plain(true),
            "No sessions found.\n"
        );
    }

    #[test]
    fn test_stats_plain_handles_empty_set() {
        let text = SessionStats::collect(&[]).plain(false);
        assert!(text.contains("Sessions:          0"));
        assert!(text.contains("Success rate:      -"));
    }
}
