//! Incoming-file projection
//!
//! Computes the exact project-relative paths a copy would place, without
//! writing anything. Both the projector and the copiers work from the same
//! [`CopyPlan`], so conflict checks always see what the copy will produce.

use std::path::{Path, PathBuf};

use crate::agent::{AgentTarget, AssetType};
use crate::error::{self, Result};

use super::detection::BundleType;

/// One copy step: a source file or directory and its install path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyItem {
    pub source: PathBuf,
    /// Project-relative, `/`-separated; directories end in `/`
    pub dest: String,
    pub is_dir: bool,
}

/// Ordered, deduplicated copy steps for one bundle
#[derive(Debug, Clone, Default)]
pub struct CopyPlan {
    pub items: Vec<CopyItem>,
}

impl CopyPlan {
    /// Build the plan for `bundle_type` at `source_dir` for `agents`
    ///
    /// Collections and non-agntc trees plan nothing. Missing asset dirs
    /// contribute nothing.
    pub fn build(
        bundle_type: &BundleType,
        source_dir: &Path,
        agents: &[AgentTarget<'_>],
    ) -> Result<Self> {
        let mut plan = Self::default();
        match bundle_type {
            BundleType::BareSkill => {
                let name = dir_basename(source_dir);
                for agent in agents {
                    if let Some(target) = agent.driver.target_dir(AssetType::Skills) {
                        plan.push(CopyItem {
                            source: source_dir.to_path_buf(),
                            dest: format!("{}/{name}/", target.trim_end_matches('/')),
                            is_dir: true,
                        });
                    }
                }
            }
            BundleType::Plugin { asset_dirs } => {
                for agent in agents {
                    for asset in asset_dirs {
                        let Some(target) = agent.driver.target_dir(*asset) else {
                            continue;
                        };
                        let target = target.trim_end_matches('/');
                        for (name, source, is_dir) in asset_children(&source_dir.join(asset.dir_name()))? {
                            let dest = if is_dir {
                                format!("{target}/{name}/")
                            } else {
                                format!("{target}/{name}")
                            };
                            plan.push(CopyItem { source, dest, is_dir });
                        }
                    }
                }
            }
            BundleType::Collection { .. } | BundleType::NotAgntc => {}
        }
        Ok(plan)
    }

    fn push(&mut self, item: CopyItem) {
        if !self.items.iter().any(|existing| existing.dest == item.dest) {
            self.items.push(item);
        }
    }

    /// Install paths in plan order
    pub fn dests(&self) -> Vec<String> {
        self.items.iter().map(|item| item.dest.clone()).collect()
    }
}

/// Project the install paths a copy of this bundle would produce
pub fn project_incoming_files(
    bundle_type: &BundleType,
    source_dir: &Path,
    agents: &[AgentTarget<'_>],
) -> Result<Vec<String>> {
    Ok(CopyPlan::build(bundle_type, source_dir, agents)?.dests())
}

fn dir_basename(dir: &Path) -> String {
    dir.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "skill".to_string())
}

/// Immediate children of an asset dir, sorted by name
fn asset_children(dir: &Path) -> Result<Vec<(String, PathBuf, bool)>> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(error::fs::read_failed(dir, &e)),
    };

    let mut children = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| error::fs::read_failed(dir, &e))?;
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().into_owned();
        children.push((name, path.clone(), path.is_dir()));
    }
    children.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(children)
}
