//! To-do list web server
//!
//! Serves a single page listing tasks, with endpoints to add, complete
//! and delete them.

use anyhow::Result;
use clap::Parser;
use todolist::cli::{Cli, Command, ListArgs};
use todolist::config::Config;
use todolist::format::format_tasks;
use todolist::logging::{self, LogTarget};
use todolist::web;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(&LogTarget::parse(&cli.log), cli.verbose)?;

    let mut config = Config::resolve(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);

    if let Err(e) = config.ensure_db_dir() {
        warn!(
            path = %config.database.path.display(),
            error = %e,
            "Could not create database directory"
        );
    }

    match cli.command {
        Some(Command::InitDb) => {
            config.database().ensure_schema();
            info!(path = %config.database.path.display(), "Database initialized");
        }
        Some(Command::List(args)) => {
            run_list(&config, &args)?;
        }
        Some(Command::Serve) | None => {
            web::serve(&config).await?;
        }
    }

    Ok(())
}

/// Print every task to stdout.
fn run_list(config: &Config, args: &ListArgs) -> Result<()> {
    let tasks = config.database().list_tasks()?;
    println!("{}", format_tasks(&tasks, args.format)?);
    Ok(())
}
