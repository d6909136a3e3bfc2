//! `ManifestEntry` struct for the manifest
//!
//! One installed bundle: where it came from, what it resolved to, and every
//! project-relative path it placed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::agent::AgentId;

/// An installed bundle in the manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestEntry {
    /// Requested ref (branch or tag), or null for HEAD and local installs
    #[serde(rename = "ref")]
    pub git_ref: Option<String>,

    /// Commit the bundle was installed at, or null for local installs
    pub commit: Option<String>,

    pub installed_at: DateTime<Utc>,

    /// Agents the bundle was installed for
    pub agents: Vec<AgentId>,

    /// Installed paths, relative to the project root. Directories end in `/`.
    pub files: Vec<String>,

    /// Clone URL recorded at install time, if any
    #[serde(default)]
    pub clone_url: Option<String>,
}

impl ManifestEntry {
    /// Entry for a bundle installed from a local directory
    pub fn local(agents: Vec<AgentId>, files: Vec<String>) -> Self {
        Self {
            git_ref: None,
            commit: None,
            installed_at: Utc::now(),
            agents,
            files,
            clone_url: None,
        }
    }

    /// Entry for a bundle installed from a remote at `commit`
    pub fn remote(
        git_ref: Option<String>,
        commit: String,
        clone_url: Option<String>,
        agents: Vec<AgentId>,
        files: Vec<String>,
    ) -> Self {
        Self {
            git_ref,
            commit: Some(commit),
            installed_at: Utc::now(),
            agents,
            files,
            clone_url,
        }
    }

    /// Local installs have no commit
    pub fn is_local(&self) -> bool {
        self.commit.is_none()
    }
}
