use chatlens_types::Direction;
use std::sync::Arc;

use super::context::EvaluationContext;
use super::engine::Detector;
use super::keywords::{KeywordTable, NEGATIVE_CATEGORIES, POSITIVE_CLOSING, REPETITION};
use super::tags::SOFT_REPETITION;
use crate::normalize::messages_by_direction;

/// Distinct keyword hits a category needs before it counts.
const MIN_HITS: usize = 2;
/// Largest penalty a single negative category can apply.
const MAX_PENALTY: usize = 2;

/// Scores user messages against the keyword table.
#[derive(Debug, Clone)]
pub struct KeywordDetector {
    table: Arc<KeywordTable>,
}

impl KeywordDetector {
    pub fn new(table: Arc<KeywordTable>) -> Self {
        Self { table }
    }
}

impl Detector for KeywordDetector {
    fn name(&self) -> &'static str {
        "keywords"
    }

    fn run(&self, ctx: &mut EvaluationContext<'_>) {
        let texts: Vec<String> = messages_by_direction(ctx.messages, Direction::User)
            .map(|m| m.text().to_lowercase())
            .collect();

        for category in NEGATIVE_CATEGORIES {
            let hits = self.table.hits(category, &texts);
            if hits >= MIN_HITS {
                ctx.score -= hits.min(MAX_PENALTY) as i64;
                let tag = if category == REPETITION {
                    SOFT_REPETITION
                } else {
                    category
                };
                ctx.tags.insert(tag);
            }
        }

        let hits = self.table.hits(POSITIVE_CLOSING, &texts);
        ctx.score += hits as i64;
        if hits >= MIN_HITS {
            ctx.tags.insert(POSITIVE_CLOSING);
        }
    }
}
