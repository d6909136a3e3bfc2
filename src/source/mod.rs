//! Bundle source handling
//!
//! This module parses a free-form source string into a [`SourceDescriptor`]:
//! - Local directory paths: `./bundles/my-skill`, `../shared`, `/abs/path`, `~/skills/x`
//! - SSH URLs: `git@github.com:owner/repo.git`, optionally with `@ref`
//! - HTTPS URLs: `https://github.com/owner/repo.git`
//! - GitHub tree URLs: `https://github.com/owner/repo/tree/main/plugins/name`
//! - GitHub shorthand: `owner/repo`, `owner/repo@v1.0.0`
//!
//! The manifest key is host-independent, so the SSH and HTTPS forms of the same
//! repository land in one manifest slot.
//!
//! ## Module Organization
//!
//! - `parser.rs`: classification and parsing of the raw input
//! - `url.rs`: URL splitting helpers shared with the update checker

pub mod parser;
pub mod url;

use std::path::PathBuf;

pub use parser::resolve_source;

/// How the source string was written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Shorthand,
    Https,
    Ssh,
    /// GitHub `tree/<ref>/<path>` URL addressing one bundle inside a repository
    DirectPath,
    LocalPath,
}

/// A fully parsed bundle source, produced once per operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDescriptor {
    pub kind: SourceKind,

    /// Repository owner (empty for local sources)
    pub owner: String,

    /// Repository name, or the directory name for local sources
    pub repo: String,

    /// Git ref (branch or tag) requested by the user
    pub git_ref: Option<String>,

    /// URL handed to `git clone` (None for local sources)
    pub clone_url: Option<String>,

    /// Manifest slot this source installs into
    pub manifest_key: String,

    /// Bundle subdirectory inside the repository (tree URLs only)
    pub target_plugin: Option<String>,

    /// Absolute directory for local sources
    pub local_path: Option<PathBuf>,
}

impl SourceDescriptor {
    /// Check if this is a local directory source
    pub fn is_local(&self) -> bool {
        self.kind == SourceKind::LocalPath
    }

    /// Key prefix shared by every bundle of this repository (`owner/repo`)
    pub fn repo_key(&self) -> String {
        if self.is_local() {
            self.manifest_key.clone()
        } else {
            format!("{}/{}", self.owner, self.repo)
        }
    }
}
