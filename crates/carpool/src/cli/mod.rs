//! Command-line interface for carpool.
//!
//! This module provides the CLI structure for the `carpool` binary and the
//! plain-text rendering of roster reports.

mod commands;
pub mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    ConfigCommand, CumulativeCommand, DeleteCommand, LoginArgs, OutputFormat, ShowCommand,
    StatusCommand, SubmitCommand, UserCommand,
};

use crate::logging::Verbosity;

/// carpool - Track who drove, who rode, and who owes a turn
///
/// Records a main roster of five slots and a sub roster of four, and tallies
/// driving days and carry balances over any date range.
#[derive(Debug, Parser)]
#[command(name = "carpool")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Record a day, replacing any earlier entry for that date
    Submit(SubmitCommand),

    /// Delete a day from both rosters
    Delete(DeleteCommand),

    /// Show every record and the main-roster tally
    Show(ShowCommand),

    /// Show both rosters and their tallies over a date range
    Cumulative(CumulativeCommand),

    /// Show database status
    Status(StatusCommand),

    /// Manage editor logins
    #[command(subcommand)]
    User(UserCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.verbose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_name() {
        let cli = Cli::command();
        assert_eq!(cli.get_name(), "carpool");
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_flags() {
        let cli = Cli::try_parse_from(["carpool", "-q", "status"]).unwrap();
        assert_eq!(cli.verbosity(), Verbosity::Quiet);

        let cli = Cli::try_parse_from(["carpool", "status"]).unwrap();
        assert_eq!(cli.verbosity(), Verbosity::Normal);

        let cli = Cli::try_parse_from(["carpool", "-vv", "status"]).unwrap();
        assert_eq!(cli.verbosity(), Verbosity::Debug);
    }

    #[test]
    fn test_parse_submit() {
        let cli = Cli::try_parse_from([
            "carpool",
            "submit",
            "--date",
            "2024-01-01",
            "--driver",
            "M5",
            "-a",
            "m2",
            "--absent",
            "m3",
            "--sub-driver",
            "m1",
            "-u",
            "editor",
            "-p",
            "pw",
        ])
        .unwrap();

        let Command::Submit(cmd) = cli.command else {
            panic!("expected submit");
        };
        assert_eq!(cmd.date, "2024-01-01");
        assert_eq!(cmd.driver, "M5");
        assert_eq!(cmd.absent, vec!["m2", "m3"]);
        assert_eq!(cmd.sub_driver.as_deref(), Some("m1"));
        assert_eq!(cmd.login.user, "editor");
        assert!(!cmd.holiday);
        assert!(!cmd.json);
    }

    #[test]
    fn test_submit_requires_login() {
        let result =
            Cli::try_parse_from(["carpool", "submit", "--date", "2024-01-01", "--driver", "m1"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_delete() {
        let cli = Cli::try_parse_from([
            "carpool", "delete", "-d", "2024-01-01", "-u", "editor", "-p", "pw",
        ])
        .unwrap();
        assert!(matches!(cli.command, Command::Delete(ref cmd) if cmd.date == "2024-01-01"));
    }

    #[test]
    fn test_parse_show_json() {
        let cli = Cli::try_parse_from(["carpool", "show", "--format", "json"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Show(ShowCommand {
                format: OutputFormat::Json
            })
        ));
    }

    #[test]
    fn test_parse_cumulative() {
        let cli = Cli::try_parse_from([
            "carpool",
            "cumulative",
            "--from",
            "2024-01-01",
            "--to",
            "2024-01-31",
        ])
        .unwrap();
        let Command::Cumulative(cmd) = cli.command else {
            panic!("expected cumulative");
        };
        assert_eq!(cmd.from, "2024-01-01");
        assert_eq!(cmd.to, "2024-01-31");
        assert_eq!(cmd.format, OutputFormat::Table);
    }

    #[test]
    fn test_parse_user_add_first_login() {
        let cli = Cli::try_parse_from(["carpool", "user", "add", "alice", "--new-password", "pw"])
            .unwrap();
        let Command::User(UserCommand::Add {
            username,
            new_password,
            user,
            ..
        }) = cli.command
        else {
            panic!("expected user add");
        };
        assert_eq!(username, "alice");
        assert_eq!(new_password, "pw");
        assert!(user.is_none());
    }

    #[test]
    fn test_parse_user_add_as_editor() {
        let cli = Cli::try_parse_from([
            "carpool",
            "user",
            "add",
            "bob",
            "--new-password",
            "pw2",
            "-u",
            "alice",
            "-p",
            "pw",
        ])
        .unwrap();
        let Command::User(UserCommand::Add { user, password, .. }) = cli.command else {
            panic!("expected user add");
        };
        assert_eq!(user.as_deref(), Some("alice"));
        assert_eq!(password.as_deref(), Some("pw"));
    }

    #[test]
    fn test_password_from_environment() {
        std::env::set_var("CARPOOL_PASSWORD", "from-env");
        let cli = Cli::try_parse_from(["carpool", "delete", "-d", "2024-01-01", "-u", "editor"])
            .unwrap();
        let Command::Delete(cmd) = cli.command else {
            panic!("expected delete");
        };
        assert_eq!(cmd.login.password, "from-env");
    }

    #[test]
    fn test_parse_with_config() {
        let cli =
            Cli::try_parse_from(["carpool", "-c", "/custom/config.toml", "config", "path"])
                .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
        assert!(matches!(cli.command, Command::Config(ConfigCommand::Path)));
    }
}
