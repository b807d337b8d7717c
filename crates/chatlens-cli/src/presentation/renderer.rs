use anyhow::Result;
use is_terminal::IsTerminal;
use owo_colors::OwoColorize;
use serde::Serialize;

use super::result::CommandResult;
use crate::types::OutputFormat;

/// Plain-text rendering of a command's content.
pub trait PlainText {
    fn plain(&self, color: bool) -> String;
}

pub struct ConsoleRenderer {
    json_mode: bool,
    color: bool,
}

impl ConsoleRenderer {
    pub fn new(json_mode: bool, color: bool) -> Self {
        Self { json_mode, color }
    }

    pub fn for_format(format: OutputFormat) -> Self {
        Self::new(
            format == OutputFormat::Json,
            std::io::stdout().is_terminal(),
        )
    }

    pub fn render<T>(&self, result: CommandResult<T>) -> Result<()>
    where
        T: Serialize + PlainText,
    {
        if self.json_mode {
            println!("{}", serde_json::to_string_pretty(&result)?);
            return Ok(());
        }

        print!("{}", result.content.plain(self.color));

        if !result.suggestions.is_empty() {
            println!();
            for tip in &result.suggestions {
                if self.color {
                    println!("{} {}", "hint:".yellow().bold(), tip);
                } else {
                    println!("hint: {}", tip);
                }
            }
        }

        Ok(())
    }
}
