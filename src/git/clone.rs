//! Shallow clone with retry
//!
//! Transient failures are retried up to `max_attempts` times with no added
//! backoff. Authentication failures are returned on the first occurrence.

use std::path::Path;

use tracing::{debug, warn};

use super::GitOptions;
use super::error::{FailureKind, classify_failure, summarize_stderr};
use super::process::run_git;
use crate::error::{self, Result};

/// A failed clone attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptFailure {
    pub kind: FailureKind,
    pub message: String,
}

/// Drive `attempt` until it succeeds, hits an auth failure, or runs out of tries
///
/// `before_retry` runs between attempts so the caller can clear a partially
/// written target directory.
pub fn with_retry<F, C>(
    url: &str,
    max_attempts: u32,
    mut attempt: F,
    mut before_retry: C,
) -> Result<()>
where
    F: FnMut(u32) -> std::result::Result<(), AttemptFailure>,
    C: FnMut(),
{
    let max_attempts = max_attempts.max(1);
    let mut last_message = String::new();

    for n in 1..=max_attempts {
        match attempt(n) {
            Ok(()) => return Ok(()),
            Err(AttemptFailure {
                kind: FailureKind::Auth,
                message,
            }) => {
                return Err(error::git::auth_failed(url, message));
            }
            Err(AttemptFailure { message, .. }) => {
                warn!(url, attempt = n, max_attempts, reason = %message, "git clone failed");
                last_message = message;
                if n < max_attempts {
                    before_retry();
                }
            }
        }
    }

    Err(error::git::clone_failed(url, max_attempts, last_message))
}

fn clone_once(
    url: &str,
    target: &Path,
    git_ref: Option<&str>,
    options: &GitOptions,
) -> std::result::Result<(), AttemptFailure> {
    let target_str = target.to_string_lossy();
    let mut args = vec!["clone", "--depth", "1"];
    if let Some(r) = git_ref {
        args.push("--branch");
        args.push(r);
    }
    args.push("--");
    args.push(url);
    args.push(target_str.as_ref());

    match run_git(&args, None, options.clone_timeout) {
        Ok(out) if out.success => Ok(()),
        Ok(out) => Err(AttemptFailure {
            kind: classify_failure(&out.stderr),
            message: summarize_stderr(&out.stderr),
        }),
        // Timeouts and spawn failures are retried like any network hiccup
        Err(e) => Err(AttemptFailure {
            kind: FailureKind::Transient,
            message: e.to_string(),
        }),
    }
}

/// `git clone --depth 1 [--branch <ref>] <url> <target>` with retries
pub fn shallow_clone(
    url: &str,
    target: &Path,
    git_ref: Option<&str>,
    options: &GitOptions,
) -> Result<()> {
    debug!(url, ?git_ref, target = %target.display(), "cloning");
    with_retry(
        url,
        options.max_clone_attempts,
        |_| clone_once(url, target, git_ref, options),
        || {
            // git refuses to clone into a non-empty directory
            let _ = std::fs::remove_dir_all(target);
        },
    )
}
