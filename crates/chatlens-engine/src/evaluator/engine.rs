use chatlens_types::{Conversation, MessageStats};
use std::sync::Arc;

use super::behavior::{BehaviorExtrasEvaluator, BehaviorThresholds};
use super::context::EvaluationContext;
use super::keyword_detector::KeywordDetector;
use super::keywords::KeywordTable;
use crate::normalize::NormalizedMessage;

/// One heuristic module of the success evaluator.
pub trait Detector: Send + Sync {
    fn name(&self) -> &'static str;

    /// Adjust `ctx.score` and add tags. Must not fail.
    fn run(&self, ctx: &mut EvaluationContext<'_>);
}

/// Outcome of an evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub successful: bool,
    pub score: i64,
    /// Ordered tags, verdict tag last.
    pub tags: Vec<String>,
}

/// Runs detectors in a fixed order and turns the final score into a verdict.
///
/// The engine holds no per-conversation state; a single instance can
/// evaluate any number of conversations.
pub struct SuccessEngine {
    detectors: Vec<Box<dyn Detector>>,
}

impl SuccessEngine {
    /// Keyword detector first, then behavioral extras.
    pub fn new(keywords: Arc<KeywordTable>, thresholds: BehaviorThresholds) -> Self {
        Self::with_detectors(vec![
            Box::new(KeywordDetector::new(keywords)),
            Box::new(BehaviorExtrasEvaluator::new(thresholds)),
        ])
    }

    pub fn with_detectors(detectors: Vec<Box<dyn Detector>>) -> Self {
        Self { detectors }
    }

    pub fn detector_names(&self) -> Vec<&'static str> {
        self.detectors.iter().map(|d| d.name()).collect()
    }

    pub fn evaluate(
        &self,
        conversation: &Conversation,
        messages: &[NormalizedMessage],
        message_stats: MessageStats,
    ) -> Verdict {
        let mut ctx = EvaluationContext::new(conversation, messages, message_stats);

        for detector in &self.detectors {
            let before = ctx.score;
            detector.run(&mut ctx);
            tracing::debug!(
                conversation_id = %conversation.id,
                detector = detector.name(),
                delta = ctx.score - before,
                "detector applied"
            );
        }

        let successful = ctx.score > 0;
        ctx.tags.seal(successful);

        Verdict {
            successful,
            score: ctx.score,
            tags: ctx.tags.into_vec(),
        }
    }
}
