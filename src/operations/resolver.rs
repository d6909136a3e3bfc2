//! Conflict resolution seam
//!
//! Detection is done by the installer; deciding what to do about a conflict
//! belongs to the caller (an interactive prompt, a `--force` flag, a test).

use crate::installer::CollisionMap;

/// What to do with a bundle whose incoming paths conflict
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Take over colliding paths and replace unmanaged ones
    Overwrite,
    /// Leave the project alone and skip this bundle
    Skip,
}

/// Conflicts found for one bundle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictReport {
    pub key: String,
    /// Paths already owned by other manifest entries, by owning key
    pub collisions: CollisionMap,
    /// Existing paths no entry owns
    pub unmanaged: Vec<String>,
}

impl ConflictReport {
    pub fn is_empty(&self) -> bool {
        self.collisions.is_empty() && self.unmanaged.is_empty()
    }
}

pub trait ConflictResolver {
    fn resolve(&mut self, conflicts: &ConflictReport) -> Resolution;
}

/// Resolver that always answers the same way
#[derive(Debug, Clone, Copy)]
pub struct FixedResolver(pub Resolution);

impl ConflictResolver for FixedResolver {
    fn resolve(&mut self, _conflicts: &ConflictReport) -> Resolution {
        self.0
    }
}

impl<F> ConflictResolver for F
where
    F: FnMut(&ConflictReport) -> Resolution,
{
    fn resolve(&mut self, conflicts: &ConflictReport) -> Resolution {
        self(conflicts)
    }
}
