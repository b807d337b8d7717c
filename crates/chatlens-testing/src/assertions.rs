//! Assertions over `--format json` CLI output.

use anyhow::{Context, Result};
use serde_json::Value;

/// Assert the number of analyzed records in `analyze` output.
pub fn assert_record_count(json: &Value, expected: usize) -> Result<()> {
    let records = json["content"]["records"]
        .as_array()
        .context("Expected 'content.records' array in JSON")?;

    if records.len() != expected {
        anyhow::bail!("Expected {} records, got {}", expected, records.len());
    }
    Ok(())
}

/// Assert the number of failed items in `analyze` output.
pub fn assert_failure_count(json: &Value, expected: usize) -> Result<()> {
    let failures = json["content"]["failures"]
        .as_array()
        .context("Expected 'content.failures' array in JSON")?;

    if failures.len() != expected {
        anyhow::bail!("Expected {} failures, got {}", expected, failures.len());
    }
    Ok(())
}

/// Assert that a record's tags end with exactly one verdict tag.
pub fn assert_verdict_last(record: &Value) -> Result<()> {
    let tags: Vec<&str> = record["tags"]
        .as_array()
        .context("Expected 'tags' array in record")?
        .iter()
        .filter_map(Value::as_str)
        .collect();

    let verdicts = tags
        .iter()
        .filter(|t| **t == "Successful" || **t == "Unsuccessful")
        .count();
    if verdicts != 1 {
        anyhow::bail!("Expected exactly one verdict tag, got {:?}", tags);
    }

    let last = tags.last().copied().unwrap_or_default();
    let successful = record["successful"]
        .as_bool()
        .context("Expected boolean 'successful'")?;
    let expected = if successful { "Successful" } else { "Unsuccessful" };
    if last != expected {
        anyhow::bail!("Expected last tag {}, got {:?}", expected, tags);
    }
    Ok(())
}
