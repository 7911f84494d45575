//! Lock file generation from a resolved package set.

use crate::dependency::{root_name, Dependency};
use crate::lockfile::{Lockfile, PodEntry};
use crate::version::Version;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A platform a package was resolved for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// iOS.
    Ios,
    /// macOS.
    Osx,
    /// tvOS.
    Tvos,
    /// watchOS.
    Watchos,
    /// visionOS.
    Visionos,
}

impl Platform {
    /// Returns the platform as a string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ios => "ios",
            Self::Osx => "osx",
            Self::Tvos => "tvos",
            Self::Watchos => "watchos",
            Self::Visionos => "visionos",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A package as activated by the resolver for one platform.
///
/// The same package may appear once per platform with different dependency
/// edges; generation merges those variants.
#[derive(Debug, Clone)]
pub struct ResolvedPod {
    /// Full name, possibly sub-package qualified.
    pub name: String,
    /// The version the resolver picked.
    pub version: Version,
    /// The platform this variant was activated for.
    pub platform: Platform,
    /// The package's own dependencies on this platform.
    pub dependencies: Vec<Dependency>,
    /// Contents of the package manifest, if the package has a known origin.
    pub manifest: Option<String>,
}

impl ResolvedPod {
    /// The `Name (Version)` string used in the `PODS` section.
    #[must_use]
    pub fn entry_name(&self) -> String {
        format!("{} ({})", self.name, self.version)
    }
}

/// Calculate the SHA-256 checksum of a manifest.
#[must_use]
pub fn manifest_checksum(manifest: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(manifest.as_bytes());
    hex::encode(hasher.finalize())
}

impl Lockfile {
    /// Generate a lock file from the consumer's declarations and the resolved
    /// package set.
    ///
    /// `declared` must contain only the consumer's own dependencies, not the
    /// transitive ones the resolver introduced. An empty `resolved` set is
    /// valid and yields empty `PODS` and `SPEC CHECKSUMS` sections.
    #[must_use]
    pub fn generate(declared: &[Dependency], resolved: &[ResolvedPod]) -> Self {
        let mut edges: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        let mut checksums = BTreeMap::new();

        for pod in resolved {
            tracing::trace!(
                pod = %pod.name,
                version = %pod.version,
                platform = %pod.platform,
                "merging resolved pod"
            );
            edges
                .entry(pod.entry_name())
                .or_default()
                .extend(pod.dependencies.iter().map(ToString::to_string));

            if let Some(manifest) = &pod.manifest {
                checksums
                    .entry(root_name(&pod.name).to_string())
                    .or_insert_with(|| manifest_checksum(manifest));
            }
        }

        let pods: Vec<_> = edges
            .into_iter()
            .map(|(name, deps)| PodEntry::new(name, deps.into_iter().collect()))
            .collect();

        let mut dependencies = declared.to_vec();
        dependencies.sort_by_cached_key(ToString::to_string);

        let mut with_source: Vec<_> = declared
            .iter()
            .filter_map(|dep| dep.external_source().map(|source| (dep, source)))
            .collect();
        with_source.sort_by(|(a, _), (b, _)| a.name().cmp(b.name()));
        let external_sources: BTreeMap<_, _> = with_source
            .into_iter()
            .map(|(dep, source)| (dep.root_name().to_string(), source.clone()))
            .collect();

        tracing::debug!(
            pods = pods.len(),
            dependencies = dependencies.len(),
            external_sources = external_sources.len(),
            checksums = checksums.len(),
            "generated lock file"
        );

        Self::from_parts(
            pods,
            dependencies,
            external_sources,
            checksums,
            Some(crate::VERSION.to_string()),
        )
    }
}
