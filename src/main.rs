//! agntc - install and update agent skills and plugins
//!
//! Thin CLI over the `agntc` library. The project root is resolved once here
//! and passed explicitly to every operation.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use agntc::error::{AgntcError, Result};
use cli::{Cli, Commands};

/// Environment variable holding the log filter
const LOG_ENV: &str = "AGNTC_LOG";

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Project directory from the CLI argument or the current directory
fn project_dir(project: Option<PathBuf>) -> Result<PathBuf> {
    match project {
        Some(path) => Ok(path),
        None => std::env::current_dir().map_err(|e| AgntcError::IoError {
            message: format!("Failed to get current directory: {e}"),
        }),
    }
}

fn run(cli: Cli) -> Result<bool> {
    let project = project_dir(cli.project)?;
    if !project.is_dir() {
        return Err(AgntcError::PathNotFound {
            path: project.display().to_string(),
        });
    }

    match cli.command {
        Commands::Add(args) => commands::add::run(&project, args),
        Commands::Update(args) => commands::update::run(&project, args),
        Commands::Outdated(args) => commands::outdated::run(&project, args),
        Commands::List => commands::list::run(&project),
        Commands::Remove(args) => commands::remove::run(&project, args),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
