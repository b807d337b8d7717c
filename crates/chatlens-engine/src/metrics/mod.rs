// Metrics calculators - independent, side-effect-free functions over the
// normalized message sequence

pub mod counts;
pub mod duration;
pub mod language;
pub mod latency;
pub mod tokens;

pub use counts::{count_by_direction, message_stats};
pub use duration::{conversation_duration_seconds, is_long_window};
pub use language::{
    LanguageDetector, UNKNOWN_LANGUAGE, WhatlangDetector, detect_languages, predominant_language,
};
pub use latency::calculate_latency;
pub use tokens::{
    Encoding, EncodingRegistry, TiktokenSet, Tokenizer, TokenizerSource, count_agent_tokens,
    token_usage,
};
