use chatlens_types::Direction;
use similar::TextDiff;

use super::context::EvaluationContext;
use super::engine::Detector;
use super::tags::{HARD_REPETITION, LONG_DURATION, LONG_USER_INTERACTION, SOFT_REPETITION};
use crate::metrics::is_long_window;

/// Tunables of the behavioral heuristics.
#[derive(Debug, Clone, PartialEq)]
pub struct BehaviorThresholds {
    /// User message count above which the interaction is considered long.
    pub long_interaction_user_messages: usize,
    /// Both messages need at least this many words to be compared.
    pub repetition_min_words: usize,
    /// Similarity ratio (0..=1) at which two user messages count as repeated.
    pub repetition_similarity: f64,
    /// Conversation window, in minutes, above which it is considered long.
    pub long_duration_minutes: f64,
}

impl Default for BehaviorThresholds {
    fn default() -> Self {
        Self {
            long_interaction_user_messages: 10,
            repetition_min_words: 20,
            repetition_similarity: 0.6,
            long_duration_minutes: 20.0,
        }
    }
}

/// Penalizes long interactions, repeated user messages and long windows.
#[derive(Debug, Clone, Default)]
pub struct BehaviorExtrasEvaluator {
    thresholds: BehaviorThresholds,
}

impl BehaviorExtrasEvaluator {
    pub fn new(thresholds: BehaviorThresholds) -> Self {
        Self { thresholds }
    }

    fn has_repeated_messages(&self, texts: &[String]) -> bool {
        texts
            .iter()
            .enumerate()
            .any(|(i, a)| texts[i + 1..].iter().any(|b| self.is_similar(a, b)))
    }

    fn is_similar(&self, a: &str, b: &str) -> bool {
        let min_words = self.thresholds.repetition_min_words;
        if a.split_whitespace().count() < min_words || b.split_whitespace().count() < min_words {
            return false;
        }
        let ratio = TextDiff::from_chars(a, b).ratio() as f64;
        ratio >= self.thresholds.repetition_similarity
    }
}

impl Detector for BehaviorExtrasEvaluator {
    fn name(&self) -> &'static str {
        "behavior"
    }

    fn run(&self, ctx: &mut EvaluationContext<'_>) {
        if ctx.message_stats.user_count > self.thresholds.long_interaction_user_messages {
            ctx.score -= 1;
            ctx.tags.insert(LONG_USER_INTERACTION);

            let texts: Vec<String> = ctx
                .messages
                .iter()
                .filter(|m| m.direction() == Direction::User)
                .map(|m| m.text().to_lowercase())
                .collect();

            if self.has_repeated_messages(&texts) {
                ctx.score -= 1;
                let tag = if ctx.tags.contains(SOFT_REPETITION) {
                    HARD_REPETITION
                } else {
                    SOFT_REPETITION
                };
                ctx.tags.insert(tag);
            }
        }

        let conversation = ctx.conversation;
        if is_long_window(
            conversation.start(),
            conversation.end(),
            self.thresholds.long_duration_minutes,
        ) {
            ctx.score -= 1;
            ctx.tags.insert(LONG_DURATION);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::message_stats;
    use crate::normalize::{NormalizedMessage, normalize_messages};
    use chatlens_types::{Conversation, RawMessage};

    const LONG_COMPLAINT: &str = "hola necesito que me ayuden con el pedido numero cuatro mil \
        doscientos que compre la semana pasada porque todavia no llego a mi casa y nadie me responde";

    fn user_messages(texts: &[&str]) -> Vec<NormalizedMessage> {
        let raw: Vec<_> = texts
            .iter()
            .enumerate()
            .map(|(i, text)| {
                RawMessage::new(Direction::User, *text, format!("2025-03-01T10:00:{:02}Z", i))
            })
            .collect();
        normalize_messages(&raw)
    }

    fn conversation(start: Option<&str>, end: Option<&str>) -> Conversation {
        let mut conv = Conversation::new("c1");
        conv.start_time = start.map(str::to_string);
        conv.end_time = end.map(str::to_string);
        conv
    }

    fn run_with(
        conv: &Conversation,
        messages: &[NormalizedMessage],
        tags: &[&str],
    ) -> (i64, Vec<String>) {
        let mut ctx = EvaluationContext::new(conv, messages, message_stats(messages));
        for tag in tags {
            ctx.tags.insert(tag);
        }
        BehaviorExtrasEvaluator::default().run(&mut ctx);
        (ctx.score, ctx.tags.into_vec())
    }

    #[test]
    fn test_ten_user_messages_is_not_long() {
        let messages = user_messages(&["hola"; 10]);
        let (score, tags) = run_with(&conversation(None, None), &messages, &[]);
        assert_eq!(score, 0);
        assert!(tags.is_empty());
    }

    #[test]
    fn test_long_interaction_without_repetition() {
        let texts: Vec<String> = (0..11).map(|i| format!("mensaje {i}")).collect();
        let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
        let (score, tags) = run_with(&conversation(None, None), &user_messages(&refs), &[]);
        assert_eq!(score, -1);
        assert_eq!(tags, vec![LONG_USER_INTERACTION]);
    }

    #[test]
    fn test_repeated_long_messages_add_soft_repetition() {
        let mut texts = vec!["ok"; 9];
        texts.push(LONG_COMPLAINT);
        texts.push(LONG_COMPLAINT);
        let (score, tags) = run_with(&conversation(None, None), &user_messages(&texts), &[]);
        assert_eq!(score, -2);
        assert_eq!(tags, vec![LONG_USER_INTERACTION, SOFT_REPETITION]);
    }

    #[test]
    fn test_existing_soft_repetition_escalates_to_hard() {
        let mut texts = vec!["ok"; 9];
        texts.push(LONG_COMPLAINT);
        texts.push(&LONG_COMPLAINT[..LONG_COMPLAINT.len() - 8]);
        let (score, tags) = run_with(
            &conversation(None, None),
            &user_messages(&texts),
            &[SOFT_REPETITION],
        );
        assert_eq!(score, -2);
        assert_eq!(tags, vec![SOFT_REPETITION, LONG_USER_INTERACTION, HARD_REPETITION]);
    }

    #[test]
    fn test_short_messages_are_never_repeated() {
        let texts = vec!["lo mismo de siempre"; 11];
        let (score, tags) = run_with(&conversation(None, None), &user_messages(&texts), &[]);
        assert_eq!(score, -1);
        assert!(!tags.iter().any(|t| t.ends_with("repetition")));
    }

    #[test]
    fn test_long_duration_window() {
        let conv = conversation(Some("2025-03-01T10:00:00Z"), Some("2025-03-01T10:25:00Z"));
        let (score, tags) = run_with(&conv, &user_messages(&["hola"]), &[]);
        assert_eq!(score, -1);
        assert_eq!(tags, vec![LONG_DURATION]);
    }

    #[test]
    fn test_created_updated_fallback_window() {
        let mut conv = Conversation::new("c1");
        conv.created_at = Some("2025-03-01T10:00:00Z".to_string());
        conv.updated_at = Some("2025-03-01T11:00:00Z".to_string());
        let (score, _) = run_with(&conv, &user_messages(&["hola"]), &[]);
        assert_eq!(score, -1);
    }

    #[test]
    fn test_malformed_window_is_not_long() {
        let conv = conversation(Some("ayer"), Some("2025-03-01T10:25:00Z"));
        let (score, tags) = run_with(&conv, &user_messages(&["hola"]), &[]);
        assert_eq!(score, 0);
        assert!(tags.is_empty());
    }

    #[test]
    fn test_similarity_ratio_bounds() {
        let evaluator = BehaviorExtrasEvaluator::default();
        assert!(evaluator.is_similar(LONG_COMPLAINT, LONG_COMPLAINT));
        let unrelated = vec!["0000"; 24].join(" ");
        assert!(!evaluator.is_similar(LONG_COMPLAINT, &unrelated));
    }
}
