//! Agent detection for finding AI agents in a project
//!
//! Probes run concurrently, one per registered driver. A probe that errors or
//! panics counts as "not detected" and never affects the other probes.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::Path;

use rayon::prelude::*;
use tracing::debug;

use super::{AgentDriver, AgentId, AgentRegistry};

fn probe(driver: &dyn AgentDriver, project_dir: &Path) -> bool {
    match catch_unwind(AssertUnwindSafe(|| driver.detect(project_dir))) {
        Ok(Ok(found)) => found,
        Ok(Err(e)) => {
            debug!(agent = %driver.id(), error = %e, "agent probe failed");
            false
        }
        Err(_) => {
            debug!(agent = %driver.id(), "agent probe panicked");
            false
        }
    }
}

/// Detect which registered agents are present in the project
///
/// Returns ids in registration order.
pub fn detect_agents(registry: &AgentRegistry, project_dir: &Path) -> Vec<AgentId> {
    let drivers: Vec<&dyn AgentDriver> = registry.drivers().collect();
    let found: Vec<bool> = drivers
        .par_iter()
        .map(|driver| probe(*driver, project_dir))
        .collect();

    drivers
        .iter()
        .zip(found)
        .filter(|(_, found)| *found)
        .map(|(driver, _)| driver.id())
        .collect()
}
