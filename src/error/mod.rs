//! Error types and handling for agntc
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`source`]: Source parsing errors
//! - [`git`]: Git subprocess errors
//! - [`config`]: Bundle config and manifest errors
//! - [`fs`]: File system errors
//!
//! Pipeline and update-check outcomes are not errors. They are closed enums in
//! [`crate::installer::pipeline`] and [`crate::update`].

pub mod config;
pub mod fs;
pub mod git;
pub mod source;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for agntc operations
#[derive(Error, Diagnostic, Debug)]
pub enum AgntcError {
    // Source errors
    #[error("Local path not found: {path}")]
    #[diagnostic(
        code(agntc::source::path_not_found),
        help("Local sources must be an existing directory")
    )]
    PathNotFound { path: String },

    #[error("Invalid source '{input}': owner is empty")]
    #[diagnostic(code(agntc::source::empty_owner))]
    EmptyOwner { input: String },

    #[error("Invalid source '{input}': repository name is empty")]
    #[diagnostic(code(agntc::source::empty_repo))]
    EmptyRepo { input: String },

    #[error("Invalid source '{input}': ref after '@' is empty")]
    #[diagnostic(code(agntc::source::empty_ref))]
    EmptyRef { input: String },

    #[error("Invalid source '{input}': expected owner/repo, found extra path segments")]
    #[diagnostic(
        code(agntc::source::too_many_segments),
        help("Use a GitHub tree URL to install a bundle from a subdirectory")
    )]
    TooManySegments { input: String },

    #[error("Invalid source '{input}': {reason}")]
    #[diagnostic(
        code(agntc::source::invalid),
        help("Valid formats: ./path, owner/repo[@ref], https://host/owner/repo, git@host:owner/repo")
    )]
    InvalidSource { input: String, reason: String },

    // Git errors
    #[error("Authentication failed for {url}: {reason}")]
    #[diagnostic(
        code(agntc::git::auth_failed),
        help("Check your SSH keys or git credential helper for this host")
    )]
    GitAuthFailed { url: String, reason: String },

    #[error("Failed to clone repository {url} after {attempts} attempt(s): {reason}")]
    #[diagnostic(
        code(agntc::git::clone_failed),
        help("Check that the URL and ref are correct and the remote is reachable")
    )]
    GitCloneFailed {
        url: String,
        attempts: u32,
        reason: String,
    },

    #[error("git {command} failed: {reason}")]
    #[diagnostic(code(agntc::git::command_failed))]
    GitCommandFailed { command: String, reason: String },

    #[error("git {command} timed out after {seconds}s")]
    #[diagnostic(code(agntc::git::timeout))]
    GitTimeout { command: String, seconds: u64 },

    #[error("Failed to resolve git ref '{git_ref}': {reason}")]
    #[diagnostic(code(agntc::git::ref_resolve_failed))]
    GitRefResolveFailed { git_ref: String, reason: String },

    // Configuration errors
    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(agntc::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration in {path}: {message}")]
    #[diagnostic(
        code(agntc::config::invalid),
        help("agntc.json must declare a non-empty \"agents\" array")
    )]
    ConfigInvalid { path: String, message: String },

    #[error("Manifest is corrupt: {path}: {reason}")]
    #[diagnostic(
        code(agntc::manifest::corrupt),
        help("Fix or delete the manifest file; agntc will not overwrite it while it is unreadable")
    )]
    ManifestCorrupt { path: String, reason: String },

    #[error("Bundle '{key}' is not installed")]
    #[diagnostic(code(agntc::manifest::not_installed))]
    NotInstalled { key: String },

    // File system errors
    #[error("Failed to read file: {path}: {reason}")]
    #[diagnostic(code(agntc::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}: {reason}")]
    #[diagnostic(code(agntc::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("Failed to remove: {path}: {reason}")]
    #[diagnostic(code(agntc::fs::remove_failed))]
    FileRemoveFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(agntc::fs::io_error))]
    IoError { message: String },
}

impl From<std::io::Error> for AgntcError {
    fn from(err: std::io::Error) -> Self {
        AgntcError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<git2::Error> for AgntcError {
    fn from(err: git2::Error) -> Self {
        AgntcError::GitRefResolveFailed {
            git_ref: "HEAD".to_string(),
            reason: err.message().to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, AgntcError>;
