use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use crate::{Error, Result};

pub const FRUSTRATION: &str = "frustration";
pub const REPETITION: &str = "repetition";
pub const ESCALATION: &str = "escalation";
pub const CONFUSION: &str = "confusion";
pub const POSITIVE_CLOSING: &str = "positive_closing";

/// Negative categories in evaluation order.
pub const NEGATIVE_CATEGORIES: [&str; 4] = [FRUSTRATION, REPETITION, ESCALATION, CONFUSION];

const BUILTIN_KEYWORDS: &str = include_str!("../../assets/keywords.toml");

static BUILTIN: Lazy<std::result::Result<Arc<KeywordTable>, String>> = Lazy::new(|| {
    KeywordTable::from_toml_str(BUILTIN_KEYWORDS)
        .map(Arc::new)
        .map_err(|e| e.to_string())
});

#[derive(Deserialize)]
struct KeywordFile {
    #[serde(default)]
    categories: BTreeMap<String, Vec<String>>,
}

/// Category name → keyword phrases, lower-cased and deduplicated.
///
/// Loaded once and shared read-only between evaluations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordTable {
    categories: BTreeMap<String, Vec<String>>,
}

impl KeywordTable {
    pub fn new<I, C, K>(categories: I) -> Self
    where
        I: IntoIterator<Item = (C, Vec<K>)>,
        C: Into<String>,
        K: AsRef<str>,
    {
        let categories = categories
            .into_iter()
            .map(|(name, keywords)| {
                let mut phrases: Vec<String> = Vec::with_capacity(keywords.len());
                for keyword in keywords {
                    let phrase = keyword.as_ref().trim().to_lowercase();
                    if !phrase.is_empty() && !phrases.contains(&phrase) {
                        phrases.push(phrase);
                    }
                }
                (name.into(), phrases)
            })
            .collect();
        Self { categories }
    }

    /// The table compiled into the binary.
    pub fn builtin() -> Result<Arc<KeywordTable>> {
        BUILTIN.clone().map_err(Error::Keywords)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: KeywordFile =
            toml::from_str(content).map_err(|e| Error::Keywords(e.to_string()))?;
        Ok(Self::new(file.categories))
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Keywords(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    /// Keywords of `category`; empty for unknown categories.
    pub fn keywords(&self, category: &str) -> &[String] {
        self.categories
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of distinct keywords of `category` found in at least one text.
    ///
    /// `texts` must already be lower-cased.
    pub fn hits<S: AsRef<str>>(&self, category: &str, texts: &[S]) -> usize {
        self.keywords(category)
            .iter()
            .filter(|keyword| texts.iter().any(|text| text.as_ref().contains(keyword.as_str())))
            .count()
    }
}
