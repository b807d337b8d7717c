use crate::presentation::views::ExportSummary;
use crate::presentation::{CommandResult, ConsoleRenderer};
use anyhow::{Context, Result};
use chatlens_runtime::{ChatLens, SessionFilter};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

pub fn handle(
    workspace: &ChatLens,
    output: Option<&Path>,
    user_id: Option<String>,
    from: Option<&str>,
    to: Option<&str>,
    renderer: &ConsoleRenderer,
) -> Result<()> {
    let mut filter = SessionFilter::new().end_between(from, to)?;
    if let Some(user_id) = user_id {
        filter = filter.user(user_id);
    }

    let Some(path) = output else {
        // CSV is the output; nothing else goes to stdout
        let stdout = std::io::stdout();
        workspace.export_csv(&filter, stdout.lock())?;
        return Ok(());
    };

    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let rows = workspace.export_csv(&filter, BufWriter::new(file))?;

    renderer.render(CommandResult::new(ExportSummary {
        path: path.display().to_string(),
        rows,
    }))
}
