//! Add operation
//!
//! Installs a bundle (or every member of a collection) into the project:
//! resolve source -> fetch -> detect type -> project incoming paths ->
//! check conflicts -> resolve -> nuke -> copy -> record in the manifest.
//!
//! Collection members are installed independently; one failing member never
//! rolls back its siblings. The manifest is written once at the end.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::agent::AgentId;
use crate::config::{Manifest, ManifestEntry, read_config};
use crate::error::Result;
use crate::installer::{
    BundleType, copy_bundle, detect_bundle_type, detect_collisions, detect_unmanaged, nuke_files,
    project_incoming_files,
};
use crate::source::{SourceDescriptor, resolve_source};

use super::OperationContext;
use super::resolver::{ConflictReport, ConflictResolver, Resolution};

/// Configuration options for add
#[derive(Debug, Clone)]
pub struct AddOptions {
    /// Source string as the user typed it
    pub source: String,
    /// Directory relative local paths are resolved against
    pub base_dir: PathBuf,
    /// Restrict installation to these agents (empty: every declared agent in use)
    pub agents: Vec<AgentId>,
}

/// Result for one bundle
#[derive(Debug)]
pub enum BundleOutcome {
    Installed {
        key: String,
        entry: ManifestEntry,
        /// Paths taken over from other entries or from unmanaged files
        overwritten: Vec<String>,
    },
    /// Conflicts were found and the resolver chose to skip
    Skipped { key: String, conflicts: ConflictReport },
    /// No declared agent is selected
    NoAgents { key: String, declared: Vec<AgentId> },
    /// Not a bare skill, plugin or collection
    NotAgntc { key: String },
    Failed { key: String, error: String },
}

impl BundleOutcome {
    pub fn key(&self) -> &str {
        match self {
            BundleOutcome::Installed { key, .. }
            | BundleOutcome::Skipped { key, .. }
            | BundleOutcome::NoAgents { key, .. }
            | BundleOutcome::NotAgntc { key }
            | BundleOutcome::Failed { key, .. } => key,
        }
    }
}

/// Summary of an add
#[derive(Debug, Default)]
pub struct AddReport {
    pub bundles: Vec<BundleOutcome>,
    /// Unknown agent ids found in bundle configs
    pub unknown_agents: Vec<String>,
}

impl AddReport {
    pub fn installed(&self) -> usize {
        self.bundles
            .iter()
            .filter(|b| matches!(b, BundleOutcome::Installed { .. }))
            .count()
    }
}

/// Where an installable bundle came from
struct Origin<'s> {
    descriptor: &'s SourceDescriptor,
    commit: Option<String>,
}

impl Origin<'_> {
    fn entry(&self, agents: Vec<AgentId>, files: Vec<String>) -> ManifestEntry {
        match &self.commit {
            None => ManifestEntry::local(agents, files),
            Some(commit) => ManifestEntry::remote(
                self.descriptor.git_ref.clone(),
                commit.clone(),
                self.descriptor.clone_url.clone(),
                agents,
                files,
            ),
        }
    }
}

/// High-level add operation
pub struct AddOperation<'a> {
    ctx: OperationContext<'a>,
}

impl<'a> AddOperation<'a> {
    pub fn new(ctx: OperationContext<'a>) -> Self {
        Self { ctx }
    }

    /// Execute add operation
    pub fn execute(
        &self,
        options: &AddOptions,
        resolver: &mut dyn ConflictResolver,
    ) -> Result<AddReport> {
        let descriptor = resolve_source(&options.source, &options.base_dir)?;
        debug!(key = %descriptor.manifest_key, kind = ?descriptor.kind, "resolved source");

        // Held until the end of this call; the clone is removed on every exit path.
        let fetched = match (&descriptor.local_path, &descriptor.clone_url) {
            (Some(_), _) => None,
            (None, Some(url)) => Some(self.ctx.fetcher.fetch(
                url,
                &descriptor.repo,
                descriptor.git_ref.as_deref(),
            )?),
            (None, None) => None,
        };

        let source_dir: PathBuf = match (&fetched, &descriptor.local_path) {
            (Some(fetched), _) => match &descriptor.target_plugin {
                Some(path) => fetched.root().join(path),
                None => fetched.root().to_path_buf(),
            },
            (None, Some(local)) => local.clone(),
            (None, None) => {
                return Err(crate::error::source::invalid(
                    &options.source,
                    "source has neither a local path nor a clone URL",
                ));
            }
        };

        let origin = Origin {
            descriptor: &descriptor,
            commit: fetched.as_ref().map(|f| f.commit.clone()),
        };

        let mut manifest = Manifest::read(self.ctx.project_dir)?;
        let mut report = AddReport::default();
        let in_use = self.agents_in_use(options);

        for (key, dir) in bundles_to_install(&descriptor, &source_dir, &mut report) {
            let outcome = self
                .install_one(&key, &dir, &origin, &in_use, &mut manifest, resolver, &mut report)
                .unwrap_or_else(|e| {
                    warn!(key = %key, error = %e, "bundle install failed");
                    BundleOutcome::Failed {
                        key: key.clone(),
                        error: e.to_string(),
                    }
                });
            report.bundles.push(outcome);
        }

        manifest.write(self.ctx.project_dir)?;
        Ok(report)
    }

    /// Agents the caller wants, or every registered agent detected in the project
    ///
    /// Falls back to every known agent when none is detected.
    fn agents_in_use(&self, options: &AddOptions) -> Vec<AgentId> {
        if !options.agents.is_empty() {
            return options.agents.clone();
        }
        let detected = self.ctx.registry.detect_all(self.ctx.project_dir);
        if detected.is_empty() {
            self.ctx.registry.known_ids()
        } else {
            detected
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn install_one(
        &self,
        key: &str,
        dir: &Path,
        origin: &Origin<'_>,
        in_use: &[AgentId],
        manifest: &mut Manifest,
        resolver: &mut dyn ConflictResolver,
        report: &mut AddReport,
    ) -> Result<BundleOutcome> {
        let Some(config) = read_config(dir, self.ctx.registry)? else {
            return Ok(BundleOutcome::NotAgntc {
                key: key.to_string(),
            });
        };
        for unknown in config.unknown_agents {
            if !report.unknown_agents.contains(&unknown) {
                report.unknown_agents.push(unknown);
            }
        }

        let bundle_type = detect_bundle_type(dir, true);
        if !bundle_type.is_installable() {
            return Ok(BundleOutcome::NotAgntc {
                key: key.to_string(),
            });
        }

        let agents: Vec<AgentId> = config
            .agents
            .iter()
            .filter(|agent| in_use.contains(agent))
            .cloned()
            .collect();
        if agents.is_empty() {
            return Ok(BundleOutcome::NoAgents {
                key: key.to_string(),
                declared: config.agents,
            });
        }

        let targets = self.ctx.registry.drivers_for(&agents);
        let incoming = project_incoming_files(&bundle_type, dir, &targets)?;

        let conflicts = ConflictReport {
            key: key.to_string(),
            collisions: detect_collisions(&incoming, manifest, Some(key)),
            unmanaged: detect_unmanaged(&incoming, manifest, self.ctx.project_dir),
        };

        let mut overwritten = Vec::new();
        if !conflicts.is_empty() {
            if resolver.resolve(&conflicts) == Resolution::Skip {
                info!(key = %key, "skipped bundle with conflicts");
                return Ok(BundleOutcome::Skipped {
                    key: key.to_string(),
                    conflicts,
                });
            }
            overwritten = self.take_over(&conflicts, manifest)?;
        }

        if let Some(previous) = manifest.get(key) {
            nuke_files(self.ctx.project_dir, &previous.files)?;
        }

        let files = match copy_bundle(&bundle_type, dir, &targets, self.ctx.project_dir) {
            Ok(files) => files,
            Err(e) => {
                // Old files are gone; drop the stale entry
                *manifest = manifest.remove_entry(key);
                return Err(e);
            }
        };

        let entry = origin.entry(agents, files);
        info!(key = %key, files = entry.files.len(), "installed bundle");
        *manifest = manifest.add_entry(key, entry.clone());

        Ok(BundleOutcome::Installed {
            key: key.to_string(),
            entry,
            overwritten,
        })
    }

    /// Strip colliding paths from their owners, then nuke every conflicting path
    fn take_over(&self, conflicts: &ConflictReport, manifest: &mut Manifest) -> Result<Vec<String>> {
        let mut taken = Vec::new();
        for (owner, paths) in &conflicts.collisions {
            let Some(owner_entry) = manifest.get(owner) else {
                continue;
            };
            let mut stripped = owner_entry.clone();
            stripped.files.retain(|f| !paths.contains(f));
            *manifest = if stripped.files.is_empty() {
                info!(key = %owner, "entry left with no files; removing");
                manifest.remove_entry(owner)
            } else {
                manifest.add_entry(owner, stripped)
            };
            nuke_files(self.ctx.project_dir, paths)?;
            taken.extend(paths.iter().cloned());
        }

        nuke_files(self.ctx.project_dir, &conflicts.unmanaged)?;
        taken.extend(conflicts.unmanaged.iter().cloned());
        Ok(taken)
    }
}

/// Single bundle, every collection member, or nothing
fn bundles_to_install(
    descriptor: &SourceDescriptor,
    source_dir: &Path,
    report: &mut AddReport,
) -> Vec<(String, PathBuf)> {
    let key = descriptor.manifest_key.clone();
    if crate::config::has_config(source_dir) {
        return vec![(key, source_dir.to_path_buf())];
    }

    match detect_bundle_type(source_dir, false) {
        BundleType::Collection { plugins } => plugins
            .into_iter()
            .map(|name| (format!("{key}/{name}"), source_dir.join(&name)))
            .collect(),
        _ => {
            report.bundles.push(BundleOutcome::NotAgntc { key });
            Vec::new()
        }
    }
}
