use crate::presentation::{CommandResult, ConsoleRenderer};
use anyhow::Result;
use chatlens_runtime::ChatLens;
use std::path::Path;

pub fn handle(data_dir: &Path, force: bool, renderer: &ConsoleRenderer) -> Result<()> {
    let result = ChatLens::init(data_dir, force)?;

    renderer.render(CommandResult::new(result).with_suggestion(
        "Register an agent: chatlens agent add --user-id <ID> --name <NAME> --model <MODEL>",
    ))
}
