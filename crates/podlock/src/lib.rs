//! Lock file management for a dependency manager.
//!
//! This crate provides:
//! - Parsing of dependency descriptors and version requirements
//! - The lock file model, with version and checksum lookups
//! - Lock file generation from a resolved package set
//! - Reconciliation of a lock file against fresh declarations
//! - Canonical, atomic lock file persistence

mod declarations;
mod dependency;
mod generate;
mod lockfile;
mod reconcile;
mod version;

/// The version of this crate, recorded in generated lock files.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use declarations::{
    Declaration, DeclarationSpec, Declarations, DeclarationsError, DECLARATIONS_FILE,
};
pub use dependency::{root_name, Dependency, DependencyError, ExternalSource};
pub use generate::{manifest_checksum, Platform, ResolvedPod};
pub use lockfile::{LockError, Lockfile, PodEntry, LOCK_FILE};
pub use reconcile::{ChangeKind, DependencyChanges};
pub use version::{Constraint, Op, Requirement, Version, VersionError};
