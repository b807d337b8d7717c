use crate::presentation::views::SessionDetail;
use crate::presentation::{CommandResult, ConsoleRenderer};
use anyhow::{Result, anyhow};
use chatlens_runtime::ChatLens;

pub fn handle(workspace: &ChatLens, id: &str, renderer: &ConsoleRenderer) -> Result<()> {
    let session = workspace
        .session(id)?
        .ok_or_else(|| anyhow!("Session not found: {}", id))?;

    renderer.render(CommandResult::new(SessionDetail { session }))
}
