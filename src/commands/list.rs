//! List command implementation

use std::path::Path;

use agntc::agent::AgentId;
use agntc::error::Result;
use agntc::operations::list_installed;

/// Run list command
pub fn run(project: &Path) -> Result<bool> {
    let entries = list_installed(project)?;
    if entries.is_empty() {
        println!("No bundles installed.");
        return Ok(true);
    }

    for (key, entry) in entries {
        let agents: Vec<&str> = entry.agents.iter().map(AgentId::as_str).collect();
        let version = match (&entry.git_ref, &entry.commit) {
            (Some(git_ref), _) => git_ref.clone(),
            (None, Some(commit)) => commit.chars().take(7).collect(),
            (None, None) => "local".to_string(),
        };
        println!(
            "{key}  {version}  [{}]  {} paths",
            agents.join(", "),
            entry.files.len()
        );
    }
    Ok(true)
}
