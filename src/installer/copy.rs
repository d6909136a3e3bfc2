//! Asset copiers
//!
//! Materialize a bundle on disk from its [`CopyPlan`]. Bare skills copy the
//! whole skill directory (minus `agntc.json` and `.git`); plugins copy each
//! immediate child of their asset dirs. The returned paths are exactly the
//! plan's install paths.

use std::path::Path;

use tracing::debug;
use walkdir::WalkDir;

use crate::agent::AgentTarget;
use crate::config::CONFIG_FILE;
use crate::error::{self, AgntcError, Result};

use super::detection::BundleType;
use super::projection::{CopyItem, CopyPlan};

/// Copy a bare skill for `agents`, returning the installed paths
pub fn copy_bare_skill(
    source_dir: &Path,
    agents: &[AgentTarget<'_>],
    project_dir: &Path,
) -> Result<Vec<String>> {
    let plan = CopyPlan::build(&BundleType::BareSkill, source_dir, agents)?;
    execute(&plan, project_dir, true)
}

/// Copy a plugin's asset dirs for `agents`, returning the installed paths
pub fn copy_plugin(
    bundle_type: &BundleType,
    source_dir: &Path,
    agents: &[AgentTarget<'_>],
    project_dir: &Path,
) -> Result<Vec<String>> {
    let plan = CopyPlan::build(bundle_type, source_dir, agents)?;
    execute(&plan, project_dir, false)
}

/// Copy any installable bundle type
pub fn copy_bundle(
    bundle_type: &BundleType,
    source_dir: &Path,
    agents: &[AgentTarget<'_>],
    project_dir: &Path,
) -> Result<Vec<String>> {
    match bundle_type {
        BundleType::BareSkill => copy_bare_skill(source_dir, agents, project_dir),
        BundleType::Plugin { .. } => copy_plugin(bundle_type, source_dir, agents, project_dir),
        BundleType::Collection { .. } | BundleType::NotAgntc => Ok(Vec::new()),
    }
}

fn execute(plan: &CopyPlan, project_dir: &Path, skip_bundle_meta: bool) -> Result<Vec<String>> {
    for item in &plan.items {
        copy_item(item, project_dir, skip_bundle_meta)?;
    }
    debug!(count = plan.items.len(), "copied bundle assets");
    Ok(plan.dests())
}

fn copy_item(item: &CopyItem, project_dir: &Path, skip_bundle_meta: bool) -> Result<()> {
    let dest = project_dir.join(item.dest.trim_end_matches('/'));
    if !item.is_dir {
        ensure_parent_dir(&dest)?;
        std::fs::copy(&item.source, &dest).map_err(|e| error::fs::write_failed(&dest, &e))?;
        return Ok(());
    }

    let walker = WalkDir::new(&item.source)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| {
            let name = entry.file_name();
            if name == ".git" {
                return false;
            }
            !(skip_bundle_meta && entry.depth() == 1 && name == CONFIG_FILE)
        });

    for entry in walker {
        let entry = entry.map_err(|e| AgntcError::FileReadFailed {
            path: item.source.display().to_string(),
            reason: e.to_string(),
        })?;
        let relative = entry
            .path()
            .strip_prefix(&item.source)
            .map_err(|e| AgntcError::IoError {
                message: e.to_string(),
            })?;
        let target = dest.join(relative);

        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&target).map_err(|e| error::fs::write_failed(&target, &e))?;
        } else {
            ensure_parent_dir(&target)?;
            std::fs::copy(entry.path(), &target)
                .map_err(|e| error::fs::write_failed(&target, &e))?;
        }
    }
    Ok(())
}

/// Ensure parent directory exists for a path
fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| error::fs::write_failed(parent, &e))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{AgentId, AgentRegistry, AssetType};
    use crate::installer::projection::project_incoming_files;
    use crate::test_fixtures::{create_temp_dir, create_test_files, write_config};

    #[test]
    fn test_copy_bare_skill_skips_config_and_git() {
        let source_root = create_temp_dir();
        let source = source_root.path().join("my-skill");
        create_test_files(
            &source,
            &[
                ("SKILL.md", "# skill"),
                ("scripts/run.sh", "echo hi"),
                (".git/HEAD", "ref"),
            ],
        );
        write_config(&source, &["claude"]);

        let project = create_temp_dir();
        let registry = AgentRegistry::with_defaults();
        let ids = vec![AgentId::from("claude")];
        let files = copy_bare_skill(&source, &registry.drivers_for(&ids), project.path()).unwrap();

        assert_eq!(files, [".claude/skills/my-skill/"]);
        let installed = project.path().join(".claude/skills/my-skill");
        assert!(installed.join("SKILL.md").is_file());
        assert!(installed.join("scripts/run.sh").is_file());
        assert!(!installed.join(CONFIG_FILE).exists());
        assert!(!installed.join(".git").exists());
    }

    #[test]
    fn test_copy_plugin_matches_projection() {
        let source = create_temp_dir();
        create_test_files(
            source.path(),
            &[
                ("skills/alpha/SKILL.md", "a"),
                ("skills/alpha/ref/deep.md", "deep"),
                ("agents/reviewer.md", "r"),
                ("hooks/", ""),
            ],
        );
        let bundle_type = BundleType::Plugin {
            asset_dirs: vec![AssetType::Skills, AssetType::Agents, AssetType::Hooks],
        };

        let project = create_temp_dir();
        let registry = AgentRegistry::with_defaults();
        let ids = vec![AgentId::from("claude"), AgentId::from("codex")];
        let targets = registry.drivers_for(&ids);

        let projected = project_incoming_files(&bundle_type, source.path(), &targets).unwrap();
        let copied = copy_bundle(&bundle_type, source.path(), &targets, project.path()).unwrap();
        assert_eq!(projected, copied);

        assert!(project.path().join(".claude/skills/alpha/ref/deep.md").is_file());
        assert!(project.path().join(".claude/agents/reviewer.md").is_file());
        assert!(project.path().join(".agents/skills/alpha/SKILL.md").is_file());
        assert!(!project.path().join(".agents/agents").exists());
    }

    #[test]
    fn test_copy_collection_is_noop() {
        let source = create_temp_dir();
        let project = create_temp_dir();
        let bundle_type = BundleType::Collection {
            plugins: vec!["a".to_string()],
        };
        let copied = copy_bundle(&bundle_type, source.path(), &[], project.path()).unwrap();
        assert!(copied.is_empty());
    }
}
