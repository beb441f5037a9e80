use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "argo-chat",
    version,
    about = "Chat with the Argo ocean-data assistant",
    propagate_version = true
)]
pub struct Cli {
    /// Explicit settings file path
    #[arg(long = "config", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Interactive chat (default)
    Chat,
    /// Print the assistant's answer to one question and exit
    Ask {
        #[arg(required = true)]
        prompt: Vec<String>,
    },
    /// Settings management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum ConfigAction {
    /// Print the effective settings
    Show,
    /// Write the default settings file
    Init {
        /// Overwrite if it exists
        #[arg(long)]
        force: bool,
    },
}
