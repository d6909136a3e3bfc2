//! Outdated command implementation

use std::path::Path;

use agntc::error::Result;
use agntc::operations::UpdateOperation;
use agntc::update::UpdateCheckResult;

use super::Runtime;
use crate::cli::OutdatedArgs;

/// Run outdated command
pub fn run(project: &Path, args: OutdatedArgs) -> Result<bool> {
    let runtime = Runtime::from_env();
    let results = UpdateOperation::new(runtime.context(project)).check(args.key.as_deref())?;

    let mut ok = true;
    for (key, result) in results {
        match result {
            UpdateCheckResult::Local => println!("{key}: local"),
            UpdateCheckResult::UpToDate => println!("{key}: up to date"),
            UpdateCheckResult::UpdateAvailable { remote_commit } => {
                let short: String = remote_commit.chars().take(7).collect();
                println!("{key}: update available ({short})");
            }
            UpdateCheckResult::NewerTags { tags } => {
                println!("{key}: newer tags available: {}", tags.join(", "));
            }
            UpdateCheckResult::CheckFailed { reason } => {
                ok = false;
                println!("{key}: check failed: {reason}");
            }
        }
    }
    Ok(ok)
}
