//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument types:
//! - add: Add command arguments
//! - update: Update and outdated command arguments
//! - remove: Remove command arguments

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod add;
pub mod remove;
pub mod update;

pub use add::AddArgs;
pub use remove::RemoveArgs;
pub use update::{OutdatedArgs, UpdateArgs};

/// agntc - install and update agent skills and plugins
#[derive(Parser, Debug)]
#[command(
    name = "agntc",
    author,
    version,
    about = "Install and update agent skills and plugins",
    after_help = "Examples:\n  \
                  agntc add owner/repo                 # Install from GitHub shorthand\n  \
                  agntc add owner/repo@v1.2 --agent claude\n  \
                  agntc add ./my-skill                 # Install from a local directory\n  \
                  agntc outdated                       # Check installed bundles for updates\n  \
                  agntc update owner/repo              # Update one bundle (and its collection members)\n  \
                  agntc remove owner/repo"
)]
pub struct Cli {
    /// Project directory (defaults to current directory)
    #[arg(long, short = 'p', global = true, env = "AGNTC_PROJECT")]
    pub project: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Install a bundle from git or a local directory
    Add(AddArgs),

    /// Reinstall bundles that have newer versions
    Update(UpdateArgs),

    /// Show which installed bundles have updates
    Outdated(OutdatedArgs),

    /// List installed bundles
    List,

    /// Remove an installed bundle and its files
    Remove(RemoveArgs),
}
