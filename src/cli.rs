//! CLI definitions for grocerbot.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Grocerbot CLI.
#[derive(Parser)]
#[command(name = "grocerbot")]
#[command(about = "Automated grocery ordering against an online storefront")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path
    #[arg(
        short,
        long,
        env = "GROCERBOT_CONFIG",
        default_value = "config/grocerbot.toml",
        global = true
    )]
    pub config: PathBuf,

    /// Show the browser window regardless of the configured mode
    #[arg(long, global = true)]
    pub headed: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Run a full shopping trip (default)
    Trip,

    /// Run a JSON array of shopper commands against one browser session
    Exec {
        /// File holding the commands, e.g. `[{"command": "show_cart"}]`
        file: PathBuf,
    },

    /// Validate the configuration file and exit
    CheckConfig,
}
