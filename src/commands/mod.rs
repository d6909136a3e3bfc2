//! Command implementations for agntc CLI
//!
//! Each command returns `Ok(true)` when everything it touched succeeded and
//! `Ok(false)` when it finished but some bundle failed.

pub mod add;
pub mod list;
pub mod outdated;
pub mod remove;
pub mod update;

use std::path::Path;

use agntc::agent::AgentRegistry;
use agntc::git::{GitFetcher, GitOptions};
use agntc::operations::OperationContext;
use agntc::update::GitRemoteRefs;

/// Production collaborators for an operation
pub struct Runtime {
    registry: AgentRegistry,
    fetcher: GitFetcher,
    remote: GitRemoteRefs,
}

impl Runtime {
    pub fn from_env() -> Self {
        let options = GitOptions::from_env();
        Self {
            registry: AgentRegistry::with_defaults(),
            fetcher: GitFetcher {
                options: options.clone(),
            },
            remote: GitRemoteRefs { options },
        }
    }

    pub fn context<'a>(&'a self, project_dir: &'a Path) -> OperationContext<'a> {
        OperationContext {
            project_dir,
            registry: &self.registry,
            fetcher: &self.fetcher,
            remote: &self.remote,
        }
    }

    pub fn registry(&self) -> &AgentRegistry {
        &self.registry
    }
}
