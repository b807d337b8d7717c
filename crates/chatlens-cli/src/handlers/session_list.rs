use crate::presentation::views::SessionList;
use crate::presentation::{CommandResult, ConsoleRenderer};
use anyhow::Result;
use chatlens_runtime::{ChatLens, SessionFilter};

pub fn handle(
    workspace: &ChatLens,
    user_id: Option<String>,
    agent_id: Option<String>,
    from: Option<&str>,
    to: Option<&str>,
    limit: usize,
    renderer: &ConsoleRenderer,
) -> Result<()> {
    let mut filter = SessionFilter::new().limit(limit).end_between(from, to)?;

    if let Some(user_id) = user_id {
        filter = filter.user(user_id);
    }

    if let Some(agent_id) = agent_id {
        filter = filter.agent(agent_id);
    }

    let sessions = workspace.sessions(&filter)?;
    renderer.render(CommandResult::new(SessionList { sessions }))
}
