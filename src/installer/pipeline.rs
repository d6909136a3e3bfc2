//! Nuke-and-reinstall pipeline
//!
//! Replaces an installed bundle with a freshly fetched copy. The stages are
//! explicit types:
//!
//! ```text
//! ReinstallRequest --plan()--> Gate::{Ready(Planned) | Abort(outcome)}
//! Planned --nuke()--> Nuked            (old files gone: destructive point)
//! Nuked  --copy()--> ReinstallOutcome  (Success | CopyFailed)
//! ```
//!
//! Every abort before `nuke()` leaves the project untouched. After `nuke()`
//! the only outcomes are success or `CopyFailed`, whose entry the caller
//! should drop from the manifest.

use std::path::Path;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::agent::{AgentId, AgentRegistry};
use crate::config::{ManifestEntry, read_config};
use crate::error::{AgntcError, Result};

use super::copy::copy_bundle;
use super::detection::{BundleType, detect_bundle_type};
use super::nuke::nuke_files;

/// Inputs for reinstalling one manifest entry
#[derive(Debug, Clone)]
pub struct ReinstallRequest<'a> {
    pub key: &'a str,
    pub entry: &'a ManifestEntry,
    /// Bundle root of the new version (already fetched)
    pub source_dir: &'a Path,
    pub project_dir: &'a Path,
    /// Replaces `entry.git_ref` when set
    pub new_ref: Option<String>,
    /// Replaces `entry.commit` when set
    pub new_commit: Option<String>,
}

/// Result of a reinstall
#[derive(Debug)]
pub enum ReinstallOutcome {
    Success {
        entry: ManifestEntry,
        dropped_agents: Vec<AgentId>,
    },
    /// No `agntc.json` at the source; nothing touched
    NoConfig,
    /// Source is a collection or not an agntc bundle; nothing touched
    InvalidType { bundle_type: BundleType },
    /// None of the installed agents are still supported; nothing touched
    NoAgents { declared: Vec<AgentId> },
    /// Old files were removed but the copy failed; the bundle is installed nowhere
    CopyFailed {
        key: String,
        error: AgntcError,
        recovery_hint: String,
    },
}

impl ReinstallOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ReinstallOutcome::Success { .. })
    }
}

/// Checked and ready to run; nothing has been touched yet
#[derive(Debug)]
pub struct Planned<'a> {
    request: ReinstallRequest<'a>,
    bundle_type: BundleType,
    effective: Vec<AgentId>,
    dropped: Vec<AgentId>,
    declared: Vec<AgentId>,
}

/// Old files removed; the copy has not run yet
#[derive(Debug)]
pub struct Nuked<'a> {
    planned: Planned<'a>,
}

/// Result of the planning stage
#[derive(Debug)]
pub enum Gate<'a> {
    Ready(Planned<'a>),
    Abort(ReinstallOutcome),
}

impl<'a> ReinstallRequest<'a> {
    /// Read config, detect type and compute effective agents
    ///
    /// Errors only on unreadable or malformed config.
    pub fn plan(self, registry: &AgentRegistry) -> Result<Gate<'a>> {
        let Some(config) = read_config(self.source_dir, registry)? else {
            debug!(key = %self.key, "no config at source");
            return Ok(Gate::Abort(ReinstallOutcome::NoConfig));
        };

        let bundle_type = detect_bundle_type(self.source_dir, true);
        if !bundle_type.is_installable() {
            return Ok(Gate::Abort(ReinstallOutcome::InvalidType { bundle_type }));
        }

        let (effective, dropped): (Vec<AgentId>, Vec<AgentId>) = self
            .entry
            .agents
            .iter()
            .cloned()
            .partition(|agent| config.agents.contains(agent));

        if effective.is_empty() {
            warn!(key = %self.key, "no previously installed agent is still supported; leaving files in place");
            return Ok(Gate::Abort(ReinstallOutcome::NoAgents {
                declared: config.agents,
            }));
        }

        Ok(Gate::Ready(Planned {
            request: self,
            bundle_type,
            effective,
            dropped,
            declared: config.agents,
        }))
    }
}

impl<'a> Planned<'a> {
    pub fn effective_agents(&self) -> &[AgentId] {
        &self.effective
    }

    pub fn dropped_agents(&self) -> &[AgentId] {
        &self.dropped
    }

    /// Notify about dropped agents, then delete the entry's files
    pub fn nuke(self, on_agents_dropped: &mut dyn FnMut(&[AgentId], &[AgentId])) -> Result<Nuked<'a>> {
        if !self.dropped.is_empty() {
            on_agents_dropped(&self.dropped, &self.declared);
        }
        nuke_files(self.request.project_dir, &self.request.entry.files)?;
        Ok(Nuked { planned: self })
    }
}

impl Nuked<'_> {
    /// Copy the new version for the effective agents and build the new entry
    pub fn copy(self, registry: &AgentRegistry) -> ReinstallOutcome {
        let Planned {
            request,
            bundle_type,
            effective,
            dropped,
            ..
        } = self.planned;

        let targets = registry.drivers_for(&effective);
        let files = match copy_bundle(&bundle_type, request.source_dir, &targets, request.project_dir) {
            Ok(files) => files,
            Err(error) => {
                warn!(key = %request.key, error = %error, "copy failed after removing old files");
                return ReinstallOutcome::CopyFailed {
                    key: request.key.to_string(),
                    recovery_hint: recovery_hint(request.key),
                    error,
                };
            }
        };

        info!(key = %request.key, files = files.len(), "reinstalled");
        let entry = ManifestEntry {
            git_ref: request.new_ref.or_else(|| request.entry.git_ref.clone()),
            commit: request.new_commit.or_else(|| request.entry.commit.clone()),
            installed_at: Utc::now(),
            agents: effective,
            files,
            clone_url: request.entry.clone_url.clone(),
        };
        ReinstallOutcome::Success {
            entry,
            dropped_agents: dropped,
        }
    }
}

/// Message telling the user how to recover from a failed copy
pub fn recovery_hint(key: &str) -> String {
    format!("'{key}' was removed but the new version could not be copied. Run `agntc update {key}` to try again.")
}

/// Run every stage for one entry
pub fn nuke_and_reinstall(
    request: ReinstallRequest<'_>,
    registry: &AgentRegistry,
    on_agents_dropped: &mut dyn FnMut(&[AgentId], &[AgentId]),
) -> Result<ReinstallOutcome> {
    match request.plan(registry)? {
        Gate::Abort(outcome) => Ok(outcome),
        Gate::Ready(planned) => Ok(planned.nuke(on_agents_dropped)?.copy(registry)),
    }
}
