//! Bundle installation
//!
//! This module handles:
//! - Bundle type detection (bare skill, plugin, collection)
//! - Projection of the exact paths a copy would place
//! - Collision and unmanaged-conflict detection
//! - Copying bundle assets and nuking tracked files
//! - The nuke-and-reinstall pipeline used by updates

pub mod conflicts;
pub mod copy;
pub mod detection;
pub mod nuke;
pub mod pipeline;
pub mod projection;

pub use conflicts::{CollisionMap, detect_collisions, detect_unmanaged};
pub use copy::{copy_bare_skill, copy_bundle, copy_plugin};
pub use detection::{BundleType, SKILL_FILE, detect_bundle_type};
pub use nuke::nuke_files;
pub use pipeline::{ReinstallOutcome, ReinstallRequest, nuke_and_reinstall};
pub use projection::{CopyPlan, project_incoming_files};
