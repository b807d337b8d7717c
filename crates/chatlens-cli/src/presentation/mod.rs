mod renderer;
mod result;
pub mod views;

pub use renderer::{ConsoleRenderer, PlainText};
pub use result::CommandResult;
