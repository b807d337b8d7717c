use chatlens_engine::{
    SessionBuilder, SuccessEngine, TiktokenSet, parse_payload, peek_conversation_id, split_input,
};
use chatlens_index::Database;
use chatlens_types::SessionRecord;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::Read;
use std::path::Path;

use crate::Result;
use crate::config::Config;
use crate::pricing::PriceTable;

/// One conversation of a batch that could not be analyzed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemFailure {
    /// Position of the item in its input.
    pub index: usize,
    /// Input the item came from, when there are several.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(rename = "conversationId")]
    pub conversation_id: Option<String>,
    /// `structural`, `lookup` or `collaborator`
    pub kind: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub records: Vec<SessionRecord>,
    pub failures: Vec<ItemFailure>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Label every failure with the input it came from.
    pub fn with_source(mut self, source: &str) -> Self {
        for failure in &mut self.failures {
            failure.source = Some(source.to_string());
        }
        self
    }

    pub fn merge(&mut self, other: BatchReport) {
        self.records.extend(other.records);
        self.failures.extend(other.failures);
    }
}

/// Analyzes conversations against the workspace database.
///
/// Agents are looked up in, and finished records written to, the same
/// database. Tokenizer vocabularies and the keyword table are loaded once
/// and reused for every item.
pub struct Analyzer<'a> {
    db: &'a Database,
    tokenizers: TiktokenSet,
    engine: SuccessEngine,
    pricing: PriceTable,
}

impl<'a> Analyzer<'a> {
    pub fn new(
        db: &'a Database,
        tokenizers: TiktokenSet,
        engine: SuccessEngine,
        pricing: PriceTable,
    ) -> Self {
        Self {
            db,
            tokenizers,
            engine,
            pricing,
        }
    }

    pub fn from_config(db: &'a Database, config: &Config, data_dir: &Path) -> Result<Self> {
        let keywords = config.evaluation.keyword_table(data_dir)?;
        let thresholds = config.evaluation.thresholds()?;

        Ok(Self::new(
            db,
            TiktokenSet::new(config.tokenizer.registry()),
            SuccessEngine::new(keywords, thresholds),
            PriceTable::from_config(&config.pricing),
        ))
    }

    /// Analyze a JSON document read from `reader`.
    pub fn analyze_reader<R: Read>(&self, reader: R) -> Result<BatchReport> {
        let value: Value = serde_json::from_reader(reader)?;
        self.analyze_value(value)
    }

    /// Analyze one `{conversation, messages}` object or an array of them.
    ///
    /// Only a document that is neither an object nor an array fails as a
    /// whole; everything else is reported per item.
    pub fn analyze_value(&self, value: Value) -> Result<BatchReport> {
        let items = split_document(value)?;
        Ok(self.analyze_items(items))
    }

    /// Analyze already split items, one after the other.
    pub fn analyze_items(&self, items: Vec<Value>) -> BatchReport {
        let builder = SessionBuilder::new(self.db, &self.pricing, &self.tokenizers, &self.engine);

        let mut report = BatchReport::default();
        for (index, item) in items.into_iter().enumerate() {
            let conversation_id = peek_conversation_id(&item);
            let outcome = parse_payload(item)
                .and_then(|payload| builder.build_session(&payload, self.db));

            match outcome {
                Ok(record) => report.records.push(record),
                Err(err) => {
                    tracing::warn!(
                        index,
                        conversation_id = conversation_id.as_deref().unwrap_or("-"),
                        error = %err,
                        "conversation skipped"
                    );
                    report.failures.push(ItemFailure {
                        index,
                        source: None,
                        conversation_id,
                        kind: err.kind().as_str().to_string(),
                        error: err.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            analyzed = report.records.len(),
            failed = report.failures.len(),
            "batch finished"
        );
        report
    }
}

/// Split a document into its conversation items without analyzing them.
pub fn split_document(value: Value) -> Result<Vec<Value>> {
    Ok(split_input(value)?)
}
