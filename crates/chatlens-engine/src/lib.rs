// Engine - conversation analysis core (normalization, metrics, scoring, assembly)
// Pure logic: storage and pricing are reached only through the collaborator
// traits in chatlens-types

pub mod error;
pub mod evaluator;
pub mod input;
pub mod metrics;
pub mod normalize;
pub mod session;

pub use error::{Error, ErrorKind, Result};
pub use evaluator::{
    BehaviorExtrasEvaluator, BehaviorThresholds, Detector, EvaluationContext, KeywordDetector,
    KeywordTable, SuccessEngine, TagSet, Verdict,
};
pub use input::{parse_payload, peek_conversation_id, split_input};
pub use metrics::{
    Encoding, EncodingRegistry, LanguageDetector, TiktokenSet, Tokenizer, TokenizerSource,
    WhatlangDetector,
};
pub use normalize::{NormalizedMessage, normalize_messages};
pub use session::SessionBuilder;

use chatlens_types::{Conversation, RawMessage};

// Façade API - what runtime and CLI layers call

/// Score a conversation with the given engine, without any collaborator.
pub fn evaluate_conversation(
    engine: &SuccessEngine,
    conversation: &Conversation,
    messages: &[RawMessage],
) -> Verdict {
    let normalized = normalize_messages(messages);
    let stats = metrics::message_stats(&normalized);
    engine.evaluate(conversation, &normalized, stats)
}
