//! `carpool` - CLI for the carpool roster tracker
//!
//! This binary records days, prints the roster and its tallies, and manages
//! editor logins and configuration.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use anyhow::{Context, Result};
use clap::Parser;

use carpool::cli::render::{records_table, tally_table};
use carpool::cli::{
    Cli, Command, ConfigCommand, CumulativeCommand, DeleteCommand, LoginArgs, OutputFormat,
    ShowCommand, SubmitCommand, UserCommand,
};
use carpool::{
    authenticate, init_logging, register_user, Config, DayForm, Roster, RosterDate, Session,
    SqliteStore, Tracker,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let config = Config::load_from(cli.config.clone()).context("loading configuration")?;

    match cli.command {
        Command::Submit(cmd) => handle_submit(&config, &cmd),
        Command::Delete(cmd) => handle_delete(&config, &cmd),
        Command::Show(cmd) => handle_show(&config, &cmd),
        Command::Cumulative(cmd) => handle_cumulative(&config, &cmd),
        Command::Status(cmd) => handle_status(&config, cmd.json),
        Command::User(cmd) => handle_user(&config, &cmd),
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

fn open_tracker(config: &Config) -> Result<Tracker<SqliteStore>> {
    let path = config.database_path();
    let store = SqliteStore::open(&path)
        .with_context(|| format!("opening roster database {}", path.display()))?;
    Ok(Tracker::new(store, config.sub_roster_rule()))
}

fn login(tracker: &Tracker<SqliteStore>, login: &LoginArgs) -> Result<Session> {
    Ok(authenticate(tracker.store(), &login.user, &login.password)?)
}

fn handle_submit(config: &Config, cmd: &SubmitCommand) -> Result<()> {
    let form = DayForm::parse(
        &cmd.date,
        &cmd.driver,
        cmd.holiday,
        &cmd.absent,
        cmd.sub_driver.as_deref(),
    )?;

    let tracker = open_tracker(config)?;
    let session = login(&tracker, &cmd.login)?;
    let submission = tracker.submit_day(&session, &form)?;

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&submission)?);
    } else {
        print!(
            "{}",
            records_table(Roster::Main, std::slice::from_ref(&submission.main))
        );
        if let Some(sub) = &submission.sub {
            println!();
            print!("{}", records_table(Roster::Sub, std::slice::from_ref(sub)));
        }
    }
    Ok(())
}

fn handle_delete(config: &Config, cmd: &DeleteCommand) -> Result<()> {
    let date = RosterDate::parse(&cmd.date)?;
    let tracker = open_tracker(config)?;
    let session = login(&tracker, &cmd.login)?;
    tracker.delete_day(&session, &date)?;
    println!("Deleted {date} from both rosters.");
    Ok(())
}

fn handle_show(config: &Config, cmd: &ShowCommand) -> Result<()> {
    let overview = open_tracker(config)?.overview()?;

    match cmd.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&overview)?),
        OutputFormat::Table => {
            println!("Main routine");
            println!("============");
            print!("{}", records_table(Roster::Main, &overview.main_records));
            println!();
            print!("{}", tally_table(&overview.main_tally));
            println!();
            println!("Sub routine");
            println!("===========");
            print!("{}", records_table(Roster::Sub, &overview.sub_records));
        }
    }
    Ok(())
}

fn handle_cumulative(config: &Config, cmd: &CumulativeCommand) -> Result<()> {
    let start = RosterDate::parse(&cmd.from)?;
    let end = RosterDate::parse(&cmd.to)?;
    let report = open_tracker(config)?.range_report(&start, &end)?;

    match cmd.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Table => {
            println!("Cumulative {} to {}", report.start, report.end);
            println!();
            println!("Main routine");
            println!("============");
            print!("{}", records_table(Roster::Main, &report.main_records));
            println!();
            print!("{}", tally_table(&report.main_tally));
            println!();
            println!("Sub routine");
            println!("===========");
            print!("{}", records_table(Roster::Sub, &report.sub_records));
            println!();
            print!("{}", tally_table(&report.sub_tally));
        }
    }
    Ok(())
}

fn handle_status(config: &Config, json: bool) -> Result<()> {
    let tracker = open_tracker(config)?;
    let stats = tracker.store().stats()?;

    if json {
        let status = serde_json::json!({
            "database_path": tracker.store().path(),
            "main_records": stats.main_records,
            "sub_records": stats.sub_records,
            "users": stats.users,
            "first_date": stats.first_date,
            "last_date": stats.last_date,
            "db_size_bytes": stats.db_size_bytes,
            "sub_roster_rule": tracker.sub_rule(),
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("carpool status");
        println!("--------------");
        println!("Database:      {}", tracker.store().path().display());
        println!("Main records:  {}", stats.main_records);
        println!("Sub records:   {}", stats.sub_records);
        println!("Editors:       {}", stats.users);
        if let (Some(first), Some(last)) = (&stats.first_date, &stats.last_date) {
            println!("Date span:     {first} to {last}");
        }
        println!("Size:          {} bytes", stats.db_size_bytes);
    }
    Ok(())
}

fn handle_user(config: &Config, cmd: &UserCommand) -> Result<()> {
    match cmd {
        UserCommand::Add {
            username,
            new_password,
            user,
            password,
        } => {
            let tracker = open_tracker(config)?;
            let session = match (user, password) {
                (Some(user), Some(password)) => authenticate(tracker.store(), user, password)?,
                _ => Session::visitor(),
            };
            register_user(tracker.store(), &session, username, new_password)?;
            println!("Saved editor login '{username}'.");
        }
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:    {}", config.database_path().display());
                println!();
                println!("[Roster]");
                println!(
                    "  Sub roster rule:  {}",
                    serde_json::to_string(&config.sub_roster_rule())?.trim_matches('"')
                );
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
