//! Git operations for fetching bundles and checking remotes
//!
//! This module handles:
//! - Shallow-cloning repositories through the git CLI, with retry
//! - Classifying clone failures (authentication vs transient)
//! - Resolving the checked-out commit
//! - Querying remote refs with `git ls-remote`
//!
//! Authentication is delegated entirely to git's native system:
//! - SSH keys from ~/.ssh/
//! - Git credential helpers
//! - Environment variables (`GIT_SSH_COMMAND`, etc.)

pub mod clone;
pub mod error;
pub mod fetch;
pub mod process;
pub mod refs;

use std::time::Duration;

pub use fetch::{FetchedSource, GitFetcher, SourceFetcher, fetch_source};
pub use refs::{RemoteRef, ls_remote, parse_ls_remote, resolve_head_commit};

/// Environment variable overriding both git timeouts, in seconds
pub const TIMEOUT_ENV: &str = "AGNTC_GIT_TIMEOUT_SECS";

/// Timing and retry settings for git subprocesses
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitOptions {
    pub clone_timeout: Duration,
    pub ls_remote_timeout: Duration,
    pub max_clone_attempts: u32,
}

impl Default for GitOptions {
    fn default() -> Self {
        Self {
            clone_timeout: Duration::from_secs(120),
            ls_remote_timeout: Duration::from_secs(30),
            max_clone_attempts: 3,
        }
    }
}

impl GitOptions {
    /// Defaults, with both timeouts overridden by `AGNTC_GIT_TIMEOUT_SECS` when set
    pub fn from_env() -> Self {
        Self::from_timeout_var(std::env::var(TIMEOUT_ENV).ok().as_deref())
    }

    fn from_timeout_var(value: Option<&str>) -> Self {
        let mut options = Self::default();
        if let Some(secs) = value.and_then(|v| v.trim().parse::<u64>().ok()) {
            let timeout = Duration::from_secs(secs.max(1));
            options.clone_timeout = timeout;
            options.ls_remote_timeout = timeout;
        }
        options
    }
}
