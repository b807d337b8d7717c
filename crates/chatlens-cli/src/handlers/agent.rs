use crate::presentation::views::{AgentAdded, AgentList};
use crate::presentation::{CommandResult, ConsoleRenderer};
use anyhow::Result;
use chatlens_runtime::{ChatLens, NewAgent};

pub fn add(
    workspace: &ChatLens,
    id: Option<String>,
    user_id: String,
    name: String,
    model: String,
    renderer: &ConsoleRenderer,
) -> Result<()> {
    let agent = workspace.register_agent(NewAgent {
        id,
        user_id,
        name,
        model_name: model,
    })?;

    renderer.render(CommandResult::new(AgentAdded { agent }))
}

pub fn list(workspace: &ChatLens, renderer: &ConsoleRenderer) -> Result<()> {
    let agents = workspace.agents()?;
    let empty = agents.is_empty();

    let mut result = CommandResult::new(AgentList { agents });
    if empty {
        result = result.with_suggestion(
            "Register one: chatlens agent add --user-id <ID> --name <NAME> --model <MODEL>",
        );
    }
    renderer.render(result)
}
