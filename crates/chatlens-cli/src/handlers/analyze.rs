use crate::presentation::{CommandResult, ConsoleRenderer};
use anyhow::{Context, Result, bail};
use chatlens_runtime::{BatchReport, ChatLens, split_document};
use serde_json::Value;
use std::fs::File;
use std::io::BufReader;

pub fn handle(workspace: &ChatLens, inputs: &[String], renderer: &ConsoleRenderer) -> Result<()> {
    // Every input is read and split before the first conversation is stored
    let documents = inputs
        .iter()
        .map(|input| read_items(input).map(|items| (input.as_str(), items)))
        .collect::<Result<Vec<_>>>()?;

    let analyzer = workspace.analyzer()?;
    let labelled = documents.len() > 1;

    let mut report = BatchReport::default();
    for (name, items) in documents {
        let part = analyzer.analyze_items(items);
        report.merge(if labelled { part.with_source(name) } else { part });
    }

    let failed = report.failures.len();
    let total = failed + report.records.len();

    let mut result = CommandResult::new(report);
    if failed > 0 && workspace.agents()?.is_empty() {
        result = result.with_suggestion(
            "No agents are registered: chatlens agent add --user-id <ID> --name <NAME> --model <MODEL>",
        );
    }
    renderer.render(result)?;

    if failed > 0 {
        bail!("{} of {} conversation(s) failed", failed, total);
    }
    Ok(())
}

fn read_items(input: &str) -> Result<Vec<Value>> {
    let value = read_document(input)?;
    let label = if input == "-" { "standard input" } else { input };
    split_document(value)
        .with_context(|| format!("{} is not a conversation or a list of them", label))
}

fn read_document(input: &str) -> Result<Value> {
    if input == "-" {
        let stdin = std::io::stdin();
        return serde_json::from_reader(stdin.lock()).context("standard input is not valid JSON");
    }

    let file = File::open(input).with_context(|| format!("Failed to open {}", input))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("{} is not valid JSON", input))
}
