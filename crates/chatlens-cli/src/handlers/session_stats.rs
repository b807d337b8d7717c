use crate::presentation::{CommandResult, ConsoleRenderer};
use anyhow::Result;
use chatlens_runtime::{ChatLens, SessionFilter};

pub fn handle(
    workspace: &ChatLens,
    user_id: Option<String>,
    renderer: &ConsoleRenderer,
) -> Result<()> {
    let mut filter = SessionFilter::new();
    if let Some(user_id) = user_id {
        filter = filter.user(user_id);
    }

    let stats = workspace.stats(&filter)?;
    renderer.render(CommandResult::new(stats))
}
