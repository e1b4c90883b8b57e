//! CLI command definitions for todolist
//!
//! This module defines the CLI structure using clap's derive macros.
//! The main entry point is the `Cli` struct which contains subcommands.

use crate::config::Config;
use crate::format::OutputFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// To-do list web server and CLI tools
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to database file (overrides config)
    #[arg(short, long, global = true)]
    pub database: Option<PathBuf>,

    /// Address to bind (overrides config)
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Port to listen on (overrides config)
    #[arg(short, long, global = true)]
    pub port: Option<u16>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Apply command-line overrides to a loaded configuration.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(db_path) = &self.database {
            config.database.path = db_path.clone();
        }
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
    }
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the web server (default if no subcommand given)
    Serve,

    /// Create the database table and exit
    InitDb,

    /// Print all tasks, newest first
    List(ListArgs),
}

/// Arguments for the `list` command.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Markdown)]
    pub format: OutputFormat,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_serve() {
        let cli = Cli::parse_from(["todolist"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.log, "2");
    }

    #[test]
    fn overrides_replace_config_values() {
        let cli = Cli::parse_from([
            "todolist",
            "--database",
            "/tmp/x.db",
            "--port",
            "8081",
            "--host",
            "0.0.0.0",
        ]);
        let mut config = Config::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.database.path, PathBuf::from("/tmp/x.db"));
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn list_accepts_json_format() {
        let cli = Cli::parse_from(["todolist", "list", "--format", "json"]);
        match cli.command {
            Some(Command::List(args)) => assert_eq!(args.format, OutputFormat::Json),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
