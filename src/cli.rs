use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "rchat", about = "Terminal client for the pastebin support chat")]
pub struct Cli {
    /// Path to config file (default: ./config.toml, then the user config dir)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Open the chat shell
    Run {
        /// Chat to join; overrides [chat] chat_id
        #[arg(long)]
        chat_id: Option<String>,
    },
    /// Print the profile and its pastes
    Profile,
    /// Delete one paste and print what is left
    DeletePaste {
        /// Paste id as listed by `rchat profile`
        id: String,
    },
}

impl Cli {
    pub fn command_or_default(&self) -> Command {
        self.command
            .clone()
            .unwrap_or(Command::Run { chat_id: None })
    }
}
