//! Update command implementation

use std::path::Path;

use agntc::agent::AgentId;
use agntc::error::Result;
use agntc::operations::{UpdateOperation, UpdateStatus};

use super::Runtime;
use crate::cli::UpdateArgs;

/// Run update command
pub fn run(project: &Path, args: UpdateArgs) -> Result<bool> {
    let runtime = Runtime::from_env();
    let report = UpdateOperation::new(runtime.context(project)).execute(args.key.as_deref())?;

    let mut ok = true;
    for (key, status) in &report.entries {
        match status {
            UpdateStatus::Updated {
                commit,
                dropped_agents,
            } => {
                match commit {
                    Some(commit) => {
                        let short: String = commit.chars().take(7).collect();
                        println!("{key}: updated to {short}");
                    }
                    None => println!("{key}: reinstalled"),
                }
                if !dropped_agents.is_empty() {
                    let dropped: Vec<&str> = dropped_agents.iter().map(AgentId::as_str).collect();
                    println!("  no longer installed for: {}", dropped.join(", "));
                }
            }
            UpdateStatus::UpToDate => println!("{key}: up to date"),
            UpdateStatus::NewerTags { tags } => {
                println!("{key}: newer tags available: {} (reinstall with `agntc add`)", tags.join(", "));
            }
            UpdateStatus::NoAgents { declared } => {
                ok = false;
                let declared: Vec<&str> = declared.iter().map(AgentId::as_str).collect();
                println!(
                    "{key}: new version supports only {}; kept the installed version",
                    declared.join(", ")
                );
            }
            UpdateStatus::NoConfig => {
                ok = false;
                println!("{key}: new version has no agntc.json; kept the installed version");
            }
            UpdateStatus::InvalidType => {
                ok = false;
                println!("{key}: new version is not an installable bundle; kept the installed version");
            }
            UpdateStatus::CheckFailed { reason } => {
                ok = false;
                println!("{key}: check failed: {reason}");
            }
            UpdateStatus::FetchFailed { error } | UpdateStatus::Failed { error } => {
                ok = false;
                println!("{key}: failed: {error}");
            }
            UpdateStatus::CopyFailed {
                error,
                recovery_hint,
            } => {
                ok = false;
                println!("{key}: copy failed: {error}");
                println!("  {recovery_hint}");
            }
        }
    }
    Ok(ok)
}
