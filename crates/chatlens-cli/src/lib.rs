// chatlens CLI
// Thin layer: parse arguments, open the workspace, render results

mod args;
mod commands;
mod handlers;
mod logging;
mod presentation;
pub mod types;

pub use args::{AgentCommand, Cli, Commands, SessionCommand};
pub use commands::run;
pub use logging::init_logging;
