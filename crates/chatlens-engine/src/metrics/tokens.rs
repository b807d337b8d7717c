use chatlens_types::{AgentRecord, Conversation, Direction, PricingLookup, TokenUsage};
use once_cell::unsync::OnceCell;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tiktoken_rs::CoreBPE;

use crate::normalize::{NormalizedMessage, messages_by_direction};
use crate::{Error, Result};

/// Counts tokens in a piece of text.
pub trait Tokenizer {
    fn count_tokens(&self, text: &str) -> usize;
}

/// Hands out the tokenizer matching a model's encoding.
pub trait TokenizerSource {
    fn tokenizer_for(&self, model: &str) -> Result<&dyn Tokenizer>;
}

/// BPE vocabularies shipped with tiktoken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Encoding {
    #[serde(rename = "cl100k_base")]
    Cl100kBase,
    #[serde(rename = "o200k_base")]
    O200kBase,
    #[serde(rename = "p50k_base")]
    P50kBase,
    #[serde(rename = "r50k_base")]
    R50kBase,
}

impl Encoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            Encoding::Cl100kBase => "cl100k_base",
            Encoding::O200kBase => "o200k_base",
            Encoding::P50kBase => "p50k_base",
            Encoding::R50kBase => "r50k_base",
        }
    }

    fn load(&self) -> Result<CoreBPE> {
        let bpe = match self {
            Encoding::Cl100kBase => tiktoken_rs::cl100k_base(),
            Encoding::O200kBase => tiktoken_rs::o200k_base(),
            Encoding::P50kBase => tiktoken_rs::p50k_base(),
            Encoding::R50kBase => tiktoken_rs::r50k_base(),
        };
        bpe.map_err(|e| Error::Tokenizer(format!("{}: {}", self.as_str(), e)))
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Encoding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "cl100k_base" => Ok(Encoding::Cl100kBase),
            "o200k_base" => Ok(Encoding::O200kBase),
            "p50k_base" => Ok(Encoding::P50kBase),
            "r50k_base" => Ok(Encoding::R50kBase),
            other => Err(Error::Tokenizer(format!("unknown encoding '{}'", other))),
        }
    }
}

/// Model name → encoding, resolved by longest prefix on the lower-cased name.
#[derive(Debug, Clone)]
pub struct EncodingRegistry {
    default: Encoding,
    prefixes: Vec<(String, Encoding)>,
}

impl EncodingRegistry {
    pub fn new(default: Encoding) -> Self {
        Self {
            default,
            prefixes: Vec::new(),
        }
    }

    /// Registry preloaded with the models the analyzer has always known.
    pub fn builtin() -> Self {
        let mut registry = Self::new(Encoding::Cl100kBase);
        for (prefix, encoding) in [
            ("gpt-3.5-turbo", Encoding::Cl100kBase),
            ("gpt-4", Encoding::Cl100kBase),
            ("text-davinci-003", Encoding::P50kBase),
            ("gpt-4o", Encoding::O200kBase),
            ("gpt-4.1", Encoding::O200kBase),
            ("gpt-5", Encoding::O200kBase),
            ("o1", Encoding::O200kBase),
            ("o3", Encoding::O200kBase),
            ("o4", Encoding::O200kBase),
        ] {
            registry.insert(prefix, encoding);
        }
        registry
    }

    pub fn with_default(mut self, default: Encoding) -> Self {
        self.default = default;
        self
    }

    /// Add or replace a model prefix.
    pub fn insert(&mut self, prefix: &str, encoding: Encoding) {
        let prefix = prefix.to_lowercase();
        match self.prefixes.iter_mut().find(|(p, _)| *p == prefix) {
            Some(entry) => entry.1 = encoding,
            None => self.prefixes.push((prefix, encoding)),
        }
    }

    pub fn resolve(&self, model: &str) -> Encoding {
        let model = model.to_lowercase();
        self.prefixes
            .iter()
            .filter(|(prefix, _)| model.starts_with(prefix.as_str()))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(_, encoding)| *encoding)
            .unwrap_or(self.default)
    }
}

impl Default for EncodingRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

struct BpeTokenizer(CoreBPE);

impl Tokenizer for BpeTokenizer {
    fn count_tokens(&self, text: &str) -> usize {
        self.0.encode_ordinary(text).len()
    }
}

/// tiktoken-backed [`TokenizerSource`].
///
/// Each vocabulary is loaded on first use and kept for the lifetime of the
/// set; one set is meant to serve a whole batch.
pub struct TiktokenSet {
    registry: EncodingRegistry,
    cl100k: OnceCell<BpeTokenizer>,
    o200k: OnceCell<BpeTokenizer>,
    p50k: OnceCell<BpeTokenizer>,
    r50k: OnceCell<BpeTokenizer>,
}

impl TiktokenSet {
    pub fn new(registry: EncodingRegistry) -> Self {
        Self {
            registry,
            cl100k: OnceCell::new(),
            o200k: OnceCell::new(),
            p50k: OnceCell::new(),
            r50k: OnceCell::new(),
        }
    }

    pub fn registry(&self) -> &EncodingRegistry {
        &self.registry
    }

    fn slot(&self, encoding: Encoding) -> &OnceCell<BpeTokenizer> {
        match encoding {
            Encoding::Cl100kBase => &self.cl100k,
            Encoding::O200kBase => &self.o200k,
            Encoding::P50kBase => &self.p50k,
            Encoding::R50kBase => &self.r50k,
        }
    }
}

impl Default for TiktokenSet {
    fn default() -> Self {
        Self::new(EncodingRegistry::builtin())
    }
}

impl TokenizerSource for TiktokenSet {
    fn tokenizer_for(&self, model: &str) -> Result<&dyn Tokenizer> {
        let encoding = self.registry.resolve(model);
        let tokenizer = self
            .slot(encoding)
            .get_or_try_init(|| encoding.load().map(BpeTokenizer))?;
        Ok(tokenizer)
    }
}

/// Tokens across all agent-authored texts.
///
/// User texts are deliberately left out: only the completion side is billed.
pub fn count_agent_tokens(messages: &[NormalizedMessage], tokenizer: &dyn Tokenizer) -> u64 {
    messages_by_direction(messages, Direction::Agent)
        .map(|m| tokenizer.count_tokens(m.text()) as u64)
        .sum()
}

/// Token usage and cost for one conversation.
///
/// Fails when the conversation has no user id, the agent has no model name,
/// or the model has no price; a cost of 0 is never assumed.
pub fn token_usage(
    messages: &[NormalizedMessage],
    conversation: &Conversation,
    agent: &AgentRecord,
    tokenizers: &dyn TokenizerSource,
    pricing: &dyn PricingLookup,
) -> Result<TokenUsage> {
    let user_id = conversation
        .user_id()
        .ok_or_else(|| Error::MissingUserId {
            conversation_id: conversation.id.clone(),
        })?;

    let model = agent.model_name().ok_or_else(|| Error::MissingModelName {
        user_id: user_id.to_string(),
    })?;

    let tokenizer = tokenizers.tokenizer_for(model)?;
    let prompt_tokens = count_agent_tokens(messages, tokenizer);
    let completion_tokens = 0;
    let total_tokens = prompt_tokens + completion_tokens;

    let cost = pricing
        .cost(model, prompt_tokens, completion_tokens)
        .map_err(|source| Error::Pricing {
            model: model.to_string(),
            source,
        })?
        .ok_or_else(|| Error::UnknownModelPricing {
            model: model.to_string(),
        })?;

    tracing::debug!(model, prompt_tokens, cost, "token usage computed");

    Ok(TokenUsage {
        prompt_tokens,
        completion_tokens,
        total_tokens,
        cost: round_cost(cost),
    })
}

fn round_cost(cost: f64) -> f64 {
    (cost * 1_000_000.0).round() / 1_000_000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize_messages;
    use chatlens_types::{BoxError, RawMessage};

    struct WordTokenizer;

    impl Tokenizer for WordTokenizer {
        fn count_tokens(&self, text: &str) -> usize {
            text.split_whitespace().count()
        }
    }

    impl TokenizerSource for WordTokenizer {
        fn tokenizer_for(&self, _model: &str) -> Result<&dyn Tokenizer> {
            Ok(self)
        }
    }

    struct FlatPrice(Option<f64>);

    impl PricingLookup for FlatPrice {
        fn cost(&self, _model: &str, prompt: u64, completion: u64) -> std::result::Result<Option<f64>, BoxError> {
            Ok(self.0.map(|per_token| (prompt + completion) as f64 * per_token))
        }
    }

    fn conversation() -> Conversation {
        let mut conv = Conversation::new("c1");
        conv.user_id = Some("u1".to_string());
        conv
    }

    fn agent(model: &str) -> AgentRecord {
        AgentRecord {
            id: "a1".to_string(),
            user_id: "u1".to_string(),
            name: "Soporte".to_string(),
            model_name: model.to_string(),
        }
    }

    fn messages() -> Vec<NormalizedMessage> {
        normalize_messages(&[
            RawMessage::new(Direction::User, "one two three four", "2025-03-01T10:00:00Z"),
            RawMessage::new(Direction::Agent, "alpha beta", "2025-03-01T10:00:01Z"),
            RawMessage::new(Direction::Agent, "gamma", "2025-03-01T10:00:02Z"),
        ])
    }

    #[test]
    fn test_only_agent_text_is_counted() {
        let usage = token_usage(
            &messages(),
            &conversation(),
            &agent("gpt-4"),
            &WordTokenizer,
            &FlatPrice(Some(0.0000012345)),
        )
        .unwrap();

        assert_eq!(usage.prompt_tokens, 3);
        assert_eq!(usage.completion_tokens, 0);
        assert_eq!(usage.total_tokens, 3);
        assert_eq!(usage.cost, 0.000004);
    }

    #[test]
    fn test_missing_user_id_fails() {
        let err = token_usage(
            &messages(),
            &Conversation::new("c1"),
            &agent("gpt-4"),
            &WordTokenizer,
            &FlatPrice(Some(0.0)),
        )
        .unwrap_err();
        assert!(matches!(err, Error::MissingUserId { .. }));
    }

    #[test]
    fn test_missing_model_fails() {
        let err = token_usage(
            &messages(),
            &conversation(),
            &agent("  "),
            &WordTokenizer,
            &FlatPrice(Some(0.0)),
        )
        .unwrap_err();
        assert!(matches!(err, Error::MissingModelName { .. }));
    }

    #[test]
    fn test_unknown_pricing_is_not_zero() {
        let err = token_usage(
            &messages(),
            &conversation(),
            &agent("mystery-model"),
            &WordTokenizer,
            &FlatPrice(None),
        )
        .unwrap_err();
        assert!(matches!(err, Error::UnknownModelPricing { model } if model == "mystery-model"));
    }

    #[test]
    fn test_registry_longest_prefix() {
        let registry = EncodingRegistry::builtin();
        assert_eq!(registry.resolve("gpt-4"), Encoding::Cl100kBase);
        assert_eq!(registry.resolve("GPT-4o-mini"), Encoding::O200kBase);
        assert_eq!(registry.resolve("text-davinci-003"), Encoding::P50kBase);
        assert_eq!(registry.resolve("llama-3"), Encoding::Cl100kBase);

        let registry = registry.with_default(Encoding::R50kBase);
        assert_eq!(registry.resolve("llama-3"), Encoding::R50kBase);
    }

    #[test]
    fn test_registry_insert_overrides() {
        let mut registry = EncodingRegistry::builtin();
        registry.insert("GPT-4", Encoding::O200kBase);
        assert_eq!(registry.resolve("gpt-4-0613"), Encoding::O200kBase);
    }

    #[test]
    fn test_encoding_names_roundtrip() {
        for encoding in [
            Encoding::Cl100kBase,
            Encoding::O200kBase,
            Encoding::P50kBase,
            Encoding::R50kBase,
        ] {
            assert_eq!(encoding.as_str().parse::<Encoding>().unwrap(), encoding);
        }
        assert!("gpt2".parse::<Encoding>().is_err());
    }

    #[test]
    fn test_tiktoken_counts_agent_text() {
        let set = TiktokenSet::default();
        let tokenizer = set.tokenizer_for("gpt-3.5-turbo").unwrap();
        assert_eq!(tokenizer.count_tokens(""), 0);
        assert!(tokenizer.count_tokens("hello world") >= 2);

        let first = count_agent_tokens(&messages(), tokenizer);
        let second = count_agent_tokens(&messages(), set.tokenizer_for("gpt-3.5-turbo").unwrap());
        assert!(first > 0);
        assert_eq!(first, second);
    }
}
