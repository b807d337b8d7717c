use crate::{Error, Result};
use chatlens_engine::{BehaviorThresholds, Encoding, EncodingRegistry, KeywordTable};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const CONFIG_FILE: &str = "config.toml";
pub const DATABASE_FILE: &str = "chatlens.db";

/// Resolve the data directory based on priority:
/// 1. Explicit path (with tilde expansion)
/// 2. CHATLENS_PATH environment variable (with tilde expansion)
/// 3. XDG data directory
/// 4. ~/.chatlens
pub fn resolve_data_dir(explicit_path: Option<&str>) -> Result<PathBuf> {
    if let Some(path) = explicit_path {
        return Ok(expand_tilde(path));
    }

    if let Ok(env_path) = std::env::var("CHATLENS_PATH")
        && !env_path.is_empty()
    {
        return Ok(expand_tilde(&env_path));
    }

    if let Some(data_dir) = dirs::data_dir() {
        return Ok(data_dir.join("chatlens"));
    }

    if let Some(home) = std::env::var_os("HOME") {
        return Ok(PathBuf::from(home).join(".chatlens"));
    }

    Err(Error::Config(
        "Could not determine data directory: no HOME directory or XDG data directory found"
            .to_string(),
    ))
}

/// Expand tilde (~) in paths to the user's home directory
fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = std::env::var_os("HOME")
    {
        return PathBuf::from(home).join(stripped);
    }
    PathBuf::from(path)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationConfig {
    /// Keyword table replacing the built-in one. Relative paths are
    /// resolved against the data directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords_path: Option<PathBuf>,
    pub long_interaction_user_messages: usize,
    pub repetition_min_words: usize,
    pub repetition_similarity: f64,
    pub long_duration_minutes: f64,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        let thresholds = BehaviorThresholds::default();
        Self {
            keywords_path: None,
            long_interaction_user_messages: thresholds.long_interaction_user_messages,
            repetition_min_words: thresholds.repetition_min_words,
            repetition_similarity: thresholds.repetition_similarity,
            long_duration_minutes: thresholds.long_duration_minutes,
        }
    }
}

impl EvaluationConfig {
    pub fn thresholds(&self) -> Result<BehaviorThresholds> {
        if !(0.0..=1.0).contains(&self.repetition_similarity) {
            return Err(Error::Config(format!(
                "evaluation.repetition_similarity must be within 0..=1, got {}",
                self.repetition_similarity
            )));
        }
        if self.long_duration_minutes < 0.0 {
            return Err(Error::Config(format!(
                "evaluation.long_duration_minutes must not be negative, got {}",
                self.long_duration_minutes
            )));
        }

        Ok(BehaviorThresholds {
            long_interaction_user_messages: self.long_interaction_user_messages,
            repetition_min_words: self.repetition_min_words,
            repetition_similarity: self.repetition_similarity,
            long_duration_minutes: self.long_duration_minutes,
        })
    }

    pub fn keyword_table(&self, data_dir: &Path) -> Result<Arc<KeywordTable>> {
        let table = match &self.keywords_path {
            Some(path) => {
                let path = if path.is_relative() {
                    data_dir.join(path)
                } else {
                    path.clone()
                };
                Arc::new(KeywordTable::from_path(&path)?)
            }
            None => KeywordTable::builtin()?,
        };
        Ok(table)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenizerConfig {
    pub default_encoding: Encoding,
    /// Model prefix → encoding, on top of the built-in mapping.
    pub models: BTreeMap<String, Encoding>,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            default_encoding: Encoding::Cl100kBase,
            models: BTreeMap::new(),
        }
    }
}

impl TokenizerConfig {
    pub fn registry(&self) -> EncodingRegistry {
        let mut registry = EncodingRegistry::builtin().with_default(self.default_encoding);
        for (prefix, encoding) in &self.models {
            registry.insert(prefix, *encoding);
        }
        registry
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelPrice {
    /// USD per million prompt tokens
    pub input_per_million: f64,
    /// USD per million completion tokens
    pub output_per_million: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    pub models: BTreeMap<String, ModelPrice>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub evaluation: EvaluationConfig,
    #[serde(default)]
    pub tokenizer: TokenizerConfig,
    #[serde(default)]
    pub pricing: PricingConfig,
}

impl Config {
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn path_in(data_dir: &Path) -> PathBuf {
        data_dir.join(CONFIG_FILE)
    }
}

/// Annotated config written by `chatlens init`.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# chatlens configuration

[evaluation]
# keywords_path = "keywords.toml"
long_interaction_user_messages = 10
repetition_min_words = 20
repetition_similarity = 0.6
long_duration_minutes = 20.0

[tokenizer]
default_encoding = "cl100k_base"

[tokenizer.models]
# "my-finetune" = "o200k_base"

# Prices in USD per million tokens, merged over the built-in table.
# [pricing.models."my-model"]
# input_per_million = 1.0
# output_per_million = 2.0
"#;
