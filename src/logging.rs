//! Logging setup.
//!
//! Installs a `tracing` fmt subscriber writing to stdout, stderr, or an
//! append-mode file. `RUST_LOG` overrides the default level.

use anyhow::Result;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Where log output goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Off,
    Stdout,
    Stderr,
    File(PathBuf),
}

impl LogTarget {
    /// Parse the `--log` option: `0`/`off`, `1`/`stdout`, `2`/`stderr`, or a filename.
    pub fn parse(s: &str) -> Self {
        match s {
            "0" | "off" => LogTarget::Off,
            "1" | "stdout" => LogTarget::Stdout,
            "2" | "stderr" => LogTarget::Stderr,
            filename => LogTarget::File(PathBuf::from(filename)),
        }
    }
}

/// Default filter directive for the given verbosity.
fn default_directive(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "info" }
}

/// Install the global subscriber.
pub fn init(target: &LogTarget, verbose: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match target {
        LogTarget::Off => {}
        LogTarget::Stdout => {
            tracing::subscriber::set_global_default(
                builder.with_writer(std::io::stdout).finish(),
            )?;
        }
        LogTarget::Stderr => {
            tracing::subscriber::set_global_default(
                builder.with_writer(std::io::stderr).finish(),
            )?;
        }
        LogTarget::File(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            tracing::subscriber::set_global_default(
                builder
                    .with_writer(Mutex::new(file))
                    .with_ansi(false)
                    .finish(),
            )?;
        }
    }

    Ok(())
}
