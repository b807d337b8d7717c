// Success evaluator - rule-based scoring of a finished conversation
//
// Detectors run in a fixed sequence against one EvaluationContext:
//   1. KeywordDetector: keyword categories over user messages
//   2. BehaviorExtrasEvaluator: interaction length, repetition, window length
// A final score above zero is "Successful", anything else "Unsuccessful".

pub mod behavior;
pub mod context;
pub mod engine;
pub mod keyword_detector;
pub mod keywords;
pub mod tags;

pub use behavior::{BehaviorExtrasEvaluator, BehaviorThresholds};
pub use context::EvaluationContext;
pub use engine::{Detector, SuccessEngine, Verdict};
pub use keyword_detector::KeywordDetector;
pub use keywords::KeywordTable;
pub use tags::TagSet;
