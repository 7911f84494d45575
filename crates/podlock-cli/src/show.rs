//! Implementation of the `podlock show` command.

use anyhow::{bail, Result};
use podlock::{root_name, Lockfile, Version};
use std::path::Path;

use crate::diff::load_lockfile;

/// Describe the locked state of one package.
pub fn show(lockfile_path: &Path, name: &str) -> Result<String> {
    let Some(lockfile) = load_lockfile(lockfile_path)? else {
        bail!("No lock file at {}", lockfile_path.display());
    };
    let Some(version) = lockfile.version(name) else {
        bail!("{name} is not in the lock file");
    };

    let report = PodReport {
        lockfile: &lockfile,
        name,
        version,
    };
    Ok(report.to_string())
}

struct PodReport<'a> {
    lockfile: &'a Lockfile,
    name: &'a str,
    version: &'a Version,
}

impl std::fmt::Display for PodReport<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let root = root_name(self.name);
        writeln!(f, "{} {}", self.name, self.version)?;

        if let Some(checksum) = self.lockfile.checksum(root) {
            writeln!(f, "checksum: {checksum}")?;
        }
        if let Some(source) = self.lockfile.external_sources().get(root) {
            writeln!(f, "source: {source}")?;
        }
        let dependencies = self.lockfile.dependencies_of(self.name).unwrap_or_default();
        if !dependencies.is_empty() {
            writeln!(f, "dependencies:")?;
            for dependency in dependencies {
                writeln!(f, "  {dependency}")?;
            }
        }
        Ok(())
    }
}
