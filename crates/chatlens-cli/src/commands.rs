use super::args::{AgentCommand, Cli, Commands, SessionCommand};
use super::handlers;
use crate::presentation::ConsoleRenderer;
use anyhow::Result;
use chatlens_runtime::{ChatLens, resolve_data_dir};

pub fn run(cli: Cli) -> Result<()> {
    let data_dir = resolve_data_dir(cli.data_dir.as_deref())?;
    let renderer = ConsoleRenderer::for_format(cli.format);

    match cli.command {
        Commands::Init { force } => handlers::init::handle(&data_dir, force, &renderer),

        Commands::Analyze { inputs } => {
            let workspace = ChatLens::open(data_dir)?;
            handlers::analyze::handle(&workspace, &inputs, &renderer)
        }

        Commands::Agent { command } => {
            let workspace = ChatLens::open(data_dir)?;

            match command {
                AgentCommand::Add {
                    user_id,
                    name,
                    model,
                    id,
                } => handlers::agent::add(&workspace, id, user_id, name, model, &renderer),
                AgentCommand::List => handlers::agent::list(&workspace, &renderer),
            }
        }

        Commands::Session { command } => {
            let workspace = ChatLens::open(data_dir)?;

            match command {
                SessionCommand::List {
                    user_id,
                    agent_id,
                    from,
                    to,
                    limit,
                } => handlers::session_list::handle(
                    &workspace,
                    user_id,
                    agent_id,
                    from.as_deref(),
                    to.as_deref(),
                    limit,
                    &renderer,
                ),
                SessionCommand::Show { id } => {
                    handlers::session_show::handle(&workspace, &id, &renderer)
                }
                SessionCommand::Export {
                    output,
                    user_id,
                    from,
                    to,
                } => handlers::session_export::handle(
                    &workspace,
                    output.as_deref(),
                    user_id,
                    from.as_deref(),
                    to.as_deref(),
                    &renderer,
                ),
                SessionCommand::Stats { user_id } => {
                    handlers::session_stats::handle(&workspace, user_id, &renderer)
                }
            }
        }
    }
}
