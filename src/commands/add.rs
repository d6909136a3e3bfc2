//! Add command implementation

use std::path::Path;

use agntc::agent::AgentId;
use agntc::error::{AgntcError, Result};
use agntc::operations::{AddOperation, AddOptions, BundleOutcome, FixedResolver, Resolution};

use super::Runtime;
use crate::cli::AddArgs;

/// Run add command
pub fn run(project: &Path, args: AddArgs) -> Result<bool> {
    let runtime = Runtime::from_env();
    for agent in &args.agent {
        if !runtime.registry().is_known(agent) {
            let known: Vec<String> = runtime
                .registry()
                .known_ids()
                .iter()
                .map(ToString::to_string)
                .collect();
            return Err(AgntcError::InvalidSource {
                input: agent.clone(),
                reason: format!("unknown agent (known: {})", known.join(", ")),
            });
        }
    }

    let base_dir = std::env::current_dir().map_err(|e| AgntcError::IoError {
        message: format!("Failed to get current directory: {e}"),
    })?;
    let options = AddOptions {
        source: args.source,
        base_dir,
        agents: args.agent.iter().map(|a| AgentId::from(a.as_str())).collect(),
    };
    let resolution = if args.force {
        Resolution::Overwrite
    } else {
        Resolution::Skip
    };

    let report = AddOperation::new(runtime.context(project))
        .execute(&options, &mut FixedResolver(resolution))?;

    for unknown in &report.unknown_agents {
        println!("warning: ignoring unknown agent '{unknown}' declared by the bundle");
    }

    let mut ok = true;
    for outcome in &report.bundles {
        match outcome {
            BundleOutcome::Installed {
                key,
                entry,
                overwritten,
            } => {
                let agents: Vec<&str> = entry.agents.iter().map(AgentId::as_str).collect();
                println!(
                    "installed {key} for {} ({} paths)",
                    agents.join(", "),
                    entry.files.len()
                );
                for path in overwritten {
                    println!("  overwrote {path}");
                }
            }
            BundleOutcome::Skipped { key, conflicts } => {
                ok = false;
                println!("skipped {key}: conflicting paths (use --force to overwrite)");
                for (owner, paths) in &conflicts.collisions {
                    for path in paths {
                        println!("  {path} (installed by {owner})");
                    }
                }
                for path in &conflicts.unmanaged {
                    println!("  {path} (not managed by agntc)");
                }
            }
            BundleOutcome::NoAgents { key, declared } => {
                ok = false;
                let declared: Vec<&str> = declared.iter().map(AgentId::as_str).collect();
                println!("skipped {key}: supports only {}", declared.join(", "));
            }
            BundleOutcome::NotAgntc { key } => {
                ok = false;
                println!("skipped {key}: not an agntc bundle");
            }
            BundleOutcome::Failed { key, error } => {
                ok = false;
                println!("failed {key}: {error}");
            }
        }
    }
    Ok(ok)
}
