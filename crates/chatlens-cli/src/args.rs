use crate::types::{LogLevel, OutputFormat};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "chatlens")]
#[command(about = "Analyze customer/agent chat conversations", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Data directory (default: $CHATLENS_PATH, then the XDG data dir)
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    #[arg(long, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the data directory with a default config.toml
    Init {
        /// Overwrite an existing config.toml
        #[arg(long)]
        force: bool,
    },

    /// Analyze conversation JSON and store the resulting sessions
    Analyze {
        /// Input files; `-` reads standard input
        #[arg(required = true, value_name = "FILE")]
        inputs: Vec<String>,
    },

    Agent {
        #[command(subcommand)]
        command: AgentCommand,
    },

    Session {
        #[command(subcommand)]
        command: SessionCommand,
    },
}

#[derive(Subcommand)]
pub enum AgentCommand {
    /// Register the agent that serves a user
    Add {
        #[arg(long)]
        user_id: String,

        #[arg(long)]
        name: String,

        /// LLM model name, e.g. gpt-4o
        #[arg(long)]
        model: String,

        /// Agent id (generated when omitted)
        #[arg(long)]
        id: Option<String>,
    },

    List,
}

#[derive(Subcommand)]
pub enum SessionCommand {
    List {
        #[arg(long)]
        user_id: Option<String>,

        #[arg(long)]
        agent_id: Option<String>,

        /// Earliest end time (RFC 3339 or YYYY-MM-DD), inclusive
        #[arg(long)]
        from: Option<String>,

        /// Latest end time (RFC 3339 or YYYY-MM-DD), inclusive
        #[arg(long)]
        to: Option<String>,

        #[arg(long, default_value = "50")]
        limit: usize,
    },

    Show {
        id: String,
    },

    /// Write stored sessions as CSV
    Export {
        /// Output file (default: stdout)
        #[arg(long, short)]
        output: Option<PathBuf>,

        #[arg(long)]
        user_id: Option<String>,

        #[arg(long)]
        from: Option<String>,

        #[arg(long)]
        to: Option<String>,
    },

    /// Aggregate statistics over stored sessions
    Stats {
        #[arg(long)]
        user_id: Option<String>,
    },
}
