//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

/// Editor credentials for commands that modify the roster.
#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Editor username
    #[arg(short, long)]
    pub user: String,

    /// Editor password
    #[arg(short, long, env = "CARPOOL_PASSWORD", hide_env_values = true)]
    pub password: String,
}

/// Submit command arguments.
#[derive(Debug, Args)]
pub struct SubmitCommand {
    /// Day to record (YYYY-MM-DD)
    #[arg(short, long)]
    pub date: String,

    /// Who drove (m1-m5, any case)
    #[arg(long)]
    pub driver: String,

    /// Mark the whole day as a holiday
    #[arg(long)]
    pub holiday: bool,

    /// Slot that was absent; repeat for more than one
    #[arg(short, long = "absent", value_name = "SLOT")]
    pub absent: Vec<String>,

    /// Sub-roster driver (m1-m4), required when m5 drives
    #[arg(short, long, value_name = "SLOT")]
    pub sub_driver: Option<String>,

    /// Editor credentials
    #[command(flatten)]
    pub login: LoginArgs,

    /// Output the written records as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Delete command arguments.
#[derive(Debug, Args)]
pub struct DeleteCommand {
    /// Day to remove from both rosters (YYYY-MM-DD)
    #[arg(short, long)]
    pub date: String,

    /// Editor credentials
    #[command(flatten)]
    pub login: LoginArgs,
}

/// Show command arguments.
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Cumulative command arguments.
#[derive(Debug, Args)]
pub struct CumulativeCommand {
    /// First day of the range, inclusive (YYYY-MM-DD)
    #[arg(long)]
    pub from: String,

    /// Last day of the range, inclusive (YYYY-MM-DD)
    #[arg(long)]
    pub to: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Editor login management.
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// Create an editor login, or reset its password
    ///
    /// Needs an existing editor's credentials unless no logins exist yet.
    Add {
        /// Login name
        username: String,

        /// Password for the new login
        #[arg(
            long = "new-password",
            env = "CARPOOL_NEW_PASSWORD",
            hide_env_values = true
        )]
        new_password: String,

        /// Existing editor username
        #[arg(short, long, requires = "password")]
        user: Option<String>,

        /// Existing editor password
        #[arg(short, long, env = "CARPOOL_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Output format for report commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Aligned text tables
    #[default]
    Table,
    /// JSON output
    Json,
}
