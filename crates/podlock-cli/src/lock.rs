//! Implementation of the `podlock lock` command.

use anyhow::{Context, Result};
use podlock::{Dependency, DependencyChanges, Lockfile, Platform, ResolvedPod, Version};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::diff::{load_declarations, load_lockfile};
use crate::FileArgs;

/// Default resolution file name.
pub const RESOLUTION_FILE: &str = "Pods.resolved.toml";

/// Options for the lock command.
#[derive(Debug, Default)]
pub struct LockOptions {
    /// The resolver's output.
    pub resolution: PathBuf,
    /// Perform a dry run without writing changes.
    pub dry_run: bool,
}

/// Result of a lock operation.
#[derive(Debug)]
pub struct LockResult {
    /// How the declarations differ from the previous lock file.
    pub changes: DependencyChanges,
    /// The newly generated lock file.
    pub lockfile: Lockfile,
    /// Whether the lock file on disk differs from the generated one.
    pub modified: bool,
}

/// The resolver's output: every activated package, once per platform.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ResolutionFile {
    #[serde(default, rename = "pod")]
    pods: Vec<ResolvedEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ResolvedEntry {
    name: String,
    version: Version,
    platform: Platform,
    #[serde(default)]
    dependencies: Vec<String>,
    /// Manifest path, relative to the resolution file.
    manifest: Option<PathBuf>,
}

/// Load a resolution file, reading each referenced manifest.
pub fn load_resolution(path: &Path) -> Result<Vec<ResolvedPod>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read resolution file {}", path.display()))?;
    let file: ResolutionFile = toml::from_str(&content)
        .with_context(|| format!("Failed to parse resolution file {}", path.display()))?;
    let base = path.parent().unwrap_or_else(|| Path::new("."));

    file.pods
        .into_iter()
        .map(|entry| {
            let dependencies = entry
                .dependencies
                .iter()
                .map(|d| {
                    Dependency::parse(d)
                        .with_context(|| format!("Invalid dependency of {}: {d}", entry.name))
                })
                .collect::<Result<Vec<_>>>()?;

            let manifest = entry
                .manifest
                .map(|m| {
                    let manifest_path = base.join(m);
                    fs::read_to_string(&manifest_path).with_context(|| {
                        format!("Failed to read manifest {}", manifest_path.display())
                    })
                })
                .transpose()?;

            Ok(ResolvedPod {
                name: entry.name,
                version: entry.version,
                platform: entry.platform,
                dependencies,
                manifest,
            })
        })
        .collect()
}

/// Generate the lock file from the declarations and the resolver's output.
///
/// The changes are computed against the previous lock file, or against an
/// empty one if none exists yet. The file is only rewritten when its
/// contents would change.
pub fn lock(files: &FileArgs, options: &LockOptions) -> Result<LockResult> {
    let declarations = load_declarations(&files.declarations)?;
    let resolved = load_resolution(&options.resolution)?;
    let previous = load_lockfile(&files.lockfile)?;

    let changes = previous
        .clone()
        .unwrap_or_default()
        .detect_changes(declarations.dependencies())
        .context("Previous lock file is inconsistent")?;

    let lockfile = Lockfile::generate(declarations.dependencies(), &resolved);
    let modified = previous.as_ref() != Some(&lockfile);

    if !modified {
        tracing::info!(path = %files.lockfile.display(), "lock file is up to date");
    } else if options.dry_run {
        tracing::info!(path = %files.lockfile.display(), "dry run, lock file not written");
    } else {
        lockfile
            .save_to(&files.lockfile)
            .with_context(|| format!("Failed to write {}", files.lockfile.display()))?;
        let verb = if previous.is_some() { "updated" } else { "created" };
        tracing::info!(
            path = %files.lockfile.display(),
            pods = lockfile.pods().len(),
            "{verb} lock file"
        );
    }

    Ok(LockResult {
        changes,
        lockfile,
        modified,
    })
}
