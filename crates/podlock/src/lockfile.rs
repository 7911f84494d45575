//! Lock file (`Pods.lock`) model, lookups and canonical serialization.
//!
//! The lock file is a YAML document with up to five top-level sections, always
//! written in this order and separated by a blank line:
//!
//! ```yaml
//! PODS:
//! - BananaLib (1.0):
//!   - monkey (< 1.0.9)
//!   - monkey (~> 1.0.1)
//! - monkey (1.0.8)
//!
//! DEPENDENCIES:
//! - BananaLib (~> 1.0)
//!
//! EXTERNAL SOURCES:
//!   Chameleon:
//!     git: https://github.com/example/chameleon.git
//!
//! SPEC CHECKSUMS:
//!   BananaLib: 5d3c8d3a...
//!
//! GENERATOR: 0.1.0
//! ```
//!
//! Empty sections are omitted. A document without any section is still valid.

use crate::dependency::{root_name, Dependency, DependencyError, ExternalSource};
use crate::version::Version;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet};
use std::io::{self, Write};
use std::path::Path;
use std::sync::OnceLock;
use tempfile::NamedTempFile;
use thiserror::Error;

/// The conventional lock file name.
pub const LOCK_FILE: &str = "Pods.lock";

const PODS: &str = "PODS";
const DEPENDENCIES: &str = "DEPENDENCIES";

/// Errors that can occur when working with lock files.
#[derive(Error, Debug)]
pub enum LockError {
    /// Reading or writing the lock file failed.
    #[error("failed to access lock file: {0}")]
    Io(#[from] io::Error),

    /// The lock file exists but is not a well-formed document.
    #[error("malformed lock file: {reason}")]
    MalformedDocument { reason: String },

    /// A section contains an entry that cannot be interpreted.
    #[error("invalid entry '{entry}' in {section}: {reason}")]
    InvalidEntry {
        section: &'static str,
        entry: String,
        reason: String,
    },

    /// A lookup was requested for a name that was never declared.
    #[error("no declared dependency with root name '{name}'")]
    NotFound { name: String },

    /// The document could not be rendered.
    #[error("failed to serialize lock file: {0}")]
    Serialize(#[from] serde_yaml::Error),
}

impl LockError {
    fn malformed(reason: impl std::fmt::Display) -> Self {
        Self::MalformedDocument {
            reason: reason.to_string(),
        }
    }
}

/// One entry of the `PODS` section.
///
/// `name` is always `Name (Version)`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawPodEntry")]
pub enum PodEntry {
    /// A resolved package without dependencies.
    Leaf(String),
    /// A resolved package and its sorted, de-duplicated dependency strings.
    WithDeps(String, Vec<String>),
}

impl PodEntry {
    /// Create an entry, choosing the variant from the dependency list.
    #[must_use]
    pub fn new(name: impl Into<String>, dependencies: Vec<String>) -> Self {
        if dependencies.is_empty() {
            Self::Leaf(name.into())
        } else {
            Self::WithDeps(name.into(), dependencies)
        }
    }

    /// The `Name (Version)` string of this entry.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Leaf(name) | Self::WithDeps(name, _) => name,
        }
    }

    /// The dependency strings of this entry.
    #[must_use]
    pub fn dependencies(&self) -> &[String] {
        match self {
            Self::Leaf(_) => &[],
            Self::WithDeps(_, deps) => deps,
        }
    }
}

/// The on-disk shape of a `PODS` entry: a bare string or a one-key mapping.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawPodEntry {
    Leaf(String),
    WithDeps(BTreeMap<String, Option<Vec<String>>>),
}

impl TryFrom<RawPodEntry> for PodEntry {
    type Error = String;

    fn try_from(raw: RawPodEntry) -> Result<Self, Self::Error> {
        match raw {
            RawPodEntry::Leaf(name) => Ok(Self::Leaf(name)),
            RawPodEntry::WithDeps(map) => {
                if map.len() != 1 {
                    return Err(format!(
                        "expected a single package per entry, found {}",
                        map.len()
                    ));
                }
                let (name, deps) = map.into_iter().next().ok_or("empty package entry")?;
                Ok(Self::new(name, deps.unwrap_or_default()))
            }
        }
    }
}

impl Serialize for PodEntry {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeMap;

        match self {
            Self::Leaf(name) => serializer.serialize_str(name),
            Self::WithDeps(name, deps) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(name, deps)?;
                map.end()
            }
        }
    }
}

/// Split `Name (Version)` into its name and version text.
pub(crate) fn split_name_and_version(entry: &str) -> Option<(&str, &str)> {
    let (name, version) = entry.strip_suffix(')')?.rsplit_once(" (")?;
    Some((name, version))
}

/// Deserialize a section that may be present but empty (`PODS:` with no value).
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// The structural form of a lock file.
///
/// Field order is the section order on disk.
#[derive(Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
struct Document {
    #[serde(
        rename = "PODS",
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Vec::is_empty"
    )]
    pods: Vec<PodEntry>,

    #[serde(
        rename = "DEPENDENCIES",
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Vec::is_empty"
    )]
    dependencies: Vec<String>,

    #[serde(
        rename = "EXTERNAL SOURCES",
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    external_sources: BTreeMap<String, ExternalSource>,

    #[serde(
        rename = "SPEC CHECKSUMS",
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    checksums: BTreeMap<String, String>,

    #[serde(
        rename = "GENERATOR",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    generator: Option<String>,
}

/// Names and pinned versions of resolved packages, derived from `PODS`.
#[derive(Debug, Clone, Default)]
struct PodIndex {
    names: BTreeSet<String>,
    versions: BTreeMap<String, Version>,
}

impl PodIndex {
    fn build(pods: &[PodEntry]) -> Self {
        let mut index = Self::default();
        for pod in pods {
            let Some((name, version)) = split_name_and_version(pod.name()) else {
                continue;
            };
            let Ok(version) = Version::parse(version) else {
                continue;
            };
            index.names.insert(name.to_string());
            index.versions.insert(name.to_string(), version);
        }
        index
    }
}

/// A lock file: the pinned result of a previous resolution.
///
/// The model is immutable once built. A new state is produced by
/// [`Lockfile::generate`] and replaces the old one on disk as a whole.
#[derive(Debug, Clone, Default)]
pub struct Lockfile {
    pods: Vec<PodEntry>,
    dependencies: Vec<Dependency>,
    external_sources: BTreeMap<String, ExternalSource>,
    checksums: BTreeMap<String, String>,
    generator_version: Option<String>,
    index: OnceLock<PodIndex>,
}

impl Lockfile {
    pub(crate) fn from_parts(
        pods: Vec<PodEntry>,
        dependencies: Vec<Dependency>,
        external_sources: BTreeMap<String, ExternalSource>,
        checksums: BTreeMap<String, String>,
        generator_version: Option<String>,
    ) -> Self {
        Self {
            pods,
            dependencies,
            external_sources,
            checksums,
            generator_version,
            index: OnceLock::new(),
        }
    }

    /// Load a lock file from disk.
    ///
    /// A missing file means there is no prior lock state and yields `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Option<Self>, LockError> {
        let path = path.as_ref();
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no lock file found");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let lockfile = Self::parse(&content)?;
        tracing::debug!(
            path = %path.display(),
            pods = lockfile.pods.len(),
            dependencies = lockfile.dependencies.len(),
            "loaded lock file"
        );
        Ok(Some(lockfile))
    }

    /// Write the lock file to disk atomically.
    ///
    /// The document is written to a temporary file next to `path` and then
    /// renamed over it. Parent directories are created as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be rendered or written.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), LockError> {
        let path = path.as_ref();
        let content = self.to_yaml_string()?;

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::with_prefix_in(format!(".{LOCK_FILE}"), dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| LockError::Io(e.error))?;

        tracing::debug!(path = %path.display(), "wrote lock file");
        Ok(())
    }

    /// Parse a lock file from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`LockError::MalformedDocument`] if the text is not a YAML
    /// mapping with well-typed sections, and [`LockError::InvalidEntry`] if a
    /// package or dependency string cannot be interpreted.
    pub fn parse(content: &str) -> Result<Self, LockError> {
        let value: serde_yaml::Value = serde_yaml::from_str(content).map_err(LockError::malformed)?;
        if !value.is_mapping() {
            return Err(LockError::malformed("expected a mapping at the top level"));
        }
        let document: Document = serde_yaml::from_value(value).map_err(LockError::malformed)?;
        Self::from_document(document)
    }

    /// Render the lock file in canonical form.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml_string(&self) -> Result<String, LockError> {
        let serde_yaml::Value::Mapping(sections) = serde_yaml::to_value(self.to_document())? else {
            return Err(LockError::malformed("lock file did not serialize to a mapping"));
        };
        if sections.is_empty() {
            return Ok("{}\n".to_string());
        }

        let mut rendered = Vec::with_capacity(sections.len());
        for (key, value) in sections {
            let mut section = serde_yaml::Mapping::new();
            section.insert(key, value);
            rendered.push(serde_yaml::to_string(&section)?);
        }
        Ok(rendered.join("\n"))
    }

    fn from_document(document: Document) -> Result<Self, LockError> {
        for pod in &document.pods {
            let invalid = |reason: &str| LockError::InvalidEntry {
                section: PODS,
                entry: pod.name().to_string(),
                reason: reason.to_string(),
            };
            let (_, version) = split_name_and_version(pod.name())
                .ok_or_else(|| invalid("expected 'Name (Version)'"))?;
            Version::parse(version).map_err(|e| invalid(&e.to_string()))?;
        }

        let dependencies = document
            .dependencies
            .iter()
            .map(|entry| {
                let dependency =
                    Dependency::parse(entry).map_err(|e: DependencyError| LockError::InvalidEntry {
                        section: DEPENDENCIES,
                        entry: entry.clone(),
                        reason: e.to_string(),
                    })?;
                Ok(match document.external_sources.get(dependency.root_name()) {
                    Some(source) => dependency.with_external_source(source.clone()),
                    None => dependency,
                })
            })
            .collect::<Result<Vec<_>, LockError>>()?;

        Ok(Self::from_parts(
            document.pods,
            dependencies,
            document.external_sources,
            document.checksums,
            document.generator,
        ))
    }

    fn to_document(&self) -> Document {
        Document {
            pods: self.pods.clone(),
            dependencies: self.dependencies.iter().map(ToString::to_string).collect(),
            external_sources: self.external_sources.clone(),
            checksums: self.checksums.clone(),
            generator: self.generator_version.clone(),
        }
    }

    fn index(&self) -> &PodIndex {
        self.index.get_or_init(|| PodIndex::build(&self.pods))
    }

    /// The resolved package entries, sorted by name.
    #[must_use]
    pub fn pods(&self) -> &[PodEntry] {
        &self.pods
    }

    /// The consumer's declared dependencies, with external sources attached.
    #[must_use]
    pub fn dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }

    /// External sources keyed by root name.
    #[must_use]
    pub fn external_sources(&self) -> &BTreeMap<String, ExternalSource> {
        &self.external_sources
    }

    /// Manifest checksums keyed by root name.
    #[must_use]
    pub fn checksums(&self) -> &BTreeMap<String, String> {
        &self.checksums
    }

    /// The version of the tool that generated this lock file.
    #[must_use]
    pub fn generator_version(&self) -> Option<&str> {
        self.generator_version.as_deref()
    }

    /// Names of all resolved packages (without versions), sorted.
    pub fn pod_names(&self) -> impl Iterator<Item = &str> {
        self.index().names.iter().map(String::as_str)
    }

    /// The pinned version of a package.
    ///
    /// If `name` has no entry of its own, the first sub-package whose root name
    /// is `name` supplies the version.
    #[must_use]
    pub fn version(&self, name: &str) -> Option<&Version> {
        let index = self.index();
        index.versions.get(name).or_else(|| {
            index
                .names
                .iter()
                .find(|candidate| root_name(candidate) == name)
                .and_then(|candidate| index.versions.get(candidate))
        })
    }

    /// The recorded manifest checksum for a root name.
    ///
    /// Checksums are stored per root package; a sub-package name never matches.
    #[must_use]
    pub fn checksum(&self, name: &str) -> Option<&str> {
        self.checksums.get(name).map(String::as_str)
    }

    /// Compare a manifest against the recorded checksum.
    ///
    /// Returns `None` if no checksum is recorded for `name`.
    #[must_use]
    pub fn verify_checksum(&self, name: &str, manifest: &str) -> Option<bool> {
        self.checksum(name)
            .map(|recorded| recorded == crate::generate::manifest_checksum(manifest))
    }

    /// The dependency strings of a resolved package, looked up by name.
    #[must_use]
    pub fn dependencies_of(&self, name: &str) -> Option<&[String]> {
        self.pods
            .iter()
            .find(|pod| split_name_and_version(pod.name()).is_some_and(|(n, _)| n == name))
            .map(PodEntry::dependencies)
    }

    /// Locked forms of every declared dependency whose root name is `name`.
    ///
    /// # Errors
    ///
    /// Returns [`LockError::NotFound`] if nothing with that root name was
    /// declared. Callers are expected to only ask for declared names.
    pub fn dependencies_to_lock(&self, name: &str) -> Result<Vec<Dependency>, LockError> {
        let locked: Vec<_> = self
            .dependencies
            .iter()
            .filter(|dep| dep.root_name() == name)
            .map(|dep| dep.locked(self.version(dep.name())))
            .collect();

        if locked.is_empty() {
            return Err(LockError::NotFound {
                name: name.to_string(),
            });
        }
        Ok(locked)
    }
}

impl PartialEq for Lockfile {
    fn eq(&self, other: &Self) -> bool {
        self.to_document() == other.to_document()
    }
}

impl Eq for Lockfile {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::Requirement;

    const SAMPLE: &str = "\
PODS:
- BananaLib/Subspec (1.0):
  - monkey (< 1.0.9)
- Chameleon (2.1)
- JSONKit (1.4)
- monkey (1.0.8)

DEPENDENCIES:
- BananaLib/Subspec (~> 1.0)
- Chameleon (from `https://example.com/chameleon.git`, tag `2.1`)
- JSONKit (= 1.4)

EXTERNAL SOURCES:
  Chameleon:
    git: https://example.com/chameleon.git
    tag: '2.1'

SPEC CHECKSUMS:
  BananaLib: abc123
  JSONKit: def456

GENERATOR: 0.1.0
";

    fn sample() -> Lockfile {
        Lockfile::parse(SAMPLE).unwrap()
    }

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    #[test]
    fn test_parse_sections() {
        let lock = sample();
        assert_eq!(lock.pods().len(), 4);
        assert_eq!(lock.dependencies().len(), 3);
        assert_eq!(lock.external_sources().len(), 1);
        assert_eq!(lock.checksums().len(), 2);
        assert_eq!(lock.generator_version(), Some("0.1.0"));
        assert_eq!(
            lock.pods()[0].dependencies(),
            ["monkey (< 1.0.9)".to_string()]
        );
        assert!(matches!(lock.pods()[1], PodEntry::Leaf(_)));
    }

    #[test]
    fn test_external_sources_are_attached() {
        let lock = sample();
        let chameleon = &lock.dependencies()[1];
        assert_eq!(chameleon.name(), "Chameleon");
        assert_eq!(
            chameleon.external_source().and_then(|s| s.get("tag")),
            Some("2.1")
        );
        assert!(lock.dependencies()[0].external_source().is_none());
    }

    #[test]
    fn test_version_lookup_falls_back_to_root() {
        let lock = sample();
        assert_eq!(lock.version("JSONKit"), Some(&v("1.4")));
        assert_eq!(lock.version("BananaLib/Subspec"), Some(&v("1.0")));
        assert_eq!(lock.version("BananaLib"), Some(&v("1.0")));
        assert_eq!(lock.version("Unknown"), None);
    }

    #[test]
    fn test_checksum_lookup_is_exact() {
        let lock = sample();
        assert_eq!(lock.checksum("BananaLib"), Some("abc123"));
        assert_eq!(lock.checksum("BananaLib/Subspec"), None);
        assert_eq!(lock.checksum("monkey"), None);
    }

    #[test]
    fn test_pod_names_and_dependencies_of() {
        let lock = sample();
        let names: Vec<_> = lock.pod_names().collect();
        assert_eq!(
            names,
            ["BananaLib/Subspec", "Chameleon", "JSONKit", "monkey"]
        );
        assert_eq!(
            lock.dependencies_of("BananaLib/Subspec"),
            Some(&["monkey (< 1.0.9)".to_string()][..])
        );
        assert_eq!(lock.dependencies_of("monkey"), Some(&[][..]));
        assert_eq!(lock.dependencies_of("Unknown"), None);
    }

    #[test]
    fn test_dependencies_to_lock() {
        let lock = sample();
        let locked = lock.dependencies_to_lock("BananaLib").unwrap();
        assert_eq!(locked.len(), 1);
        assert_eq!(locked[0].name(), "BananaLib/Subspec");
        assert_eq!(locked[0].exact_version(), Some(&v("1.0")));
        assert_eq!(locked[0].requirement(), &Requirement::exact(v("1.0")));
    }

    #[test]
    fn test_dependencies_to_lock_unknown() {
        let lock = sample();
        let err = lock.dependencies_to_lock("Unknown").unwrap_err();
        assert!(matches!(err, LockError::NotFound { name } if name == "Unknown"));
    }

    #[test]
    fn test_render_is_canonical() {
        let lock = sample();
        assert_eq!(lock.to_yaml_string().unwrap(), SAMPLE);
    }

    #[test]
    fn test_round_trip() {
        let lock = sample();
        let reparsed = Lockfile::parse(&lock.to_yaml_string().unwrap()).unwrap();
        assert_eq!(lock, reparsed);
    }

    #[test]
    fn test_generated_document_round_trip() {
        use crate::generate::{Platform, ResolvedPod};

        let source = ExternalSource::new()
            .with("git", "https://example.com/chameleon.git")
            .with("branch", "main")
            .with("commit", "0f1e2d3");
        let declared = vec![
            Dependency::parse("BananaLib/Core (~> 1.0)").unwrap(),
            Dependency::parse("BananaLib/UI (~> 1.0)").unwrap(),
            Dependency::new("Chameleon/Core", Requirement::any()).with_external_source(source),
        ];
        let pod = |name: &str, version: &str, deps: &[&str], manifest: Option<&str>| ResolvedPod {
            name: name.to_string(),
            version: v(version),
            platform: Platform::Ios,
            dependencies: deps.iter().map(|d| Dependency::parse(d).unwrap()).collect(),
            manifest: manifest.map(str::to_string),
        };
        let resolved = vec![
            pod("BananaLib/Core", "1.0", &["monkey (< 1.0.9)"], Some("banana")),
            pod("BananaLib/UI", "1.0", &["BananaLib/Core (= 1.0)"], Some("banana")),
            pod("Chameleon/Core", "2.0.0-beta.1", &[], Some("chameleon")),
            pod("monkey", "1.0.8", &[], None),
        ];

        let lock = Lockfile::generate(&declared, &resolved);
        let rendered = lock.to_yaml_string().unwrap();
        let reparsed = Lockfile::parse(&rendered).unwrap();

        assert_eq!(reparsed, lock);
        assert_eq!(reparsed.to_yaml_string().unwrap(), rendered);
        assert_eq!(reparsed.version("Chameleon"), Some(&v("2.0.0-beta.1")));
        assert!(reparsed.version("Chameleon").unwrap().is_prerelease());
        assert_eq!(reparsed.version("BananaLib"), Some(&v("1.0")));
        assert_eq!(
            reparsed.checksums().keys().collect::<Vec<_>>(),
            ["BananaLib", "Chameleon"]
        );

        let chameleon = reparsed.external_sources().get("Chameleon").unwrap();
        assert_eq!(chameleon.get("git"), Some("https://example.com/chameleon.git"));
        assert_eq!(chameleon.get("branch"), Some("main"));
        assert_eq!(chameleon.get("commit"), Some("0f1e2d3"));
        assert_eq!(reparsed.dependencies(), lock.dependencies());
    }

    #[test]
    fn test_empty_sections_are_omitted() {
        let lock = Lockfile::parse("DEPENDENCIES:\n- JSONKit\n").unwrap();
        let rendered = lock.to_yaml_string().unwrap();
        assert_eq!(rendered, "DEPENDENCIES:\n- JSONKit\n");
        assert!(!rendered.contains("EXTERNAL SOURCES"));

        let reparsed = Lockfile::parse(&rendered).unwrap();
        assert!(reparsed.external_sources().is_empty());
        assert!(reparsed.pods().is_empty());
    }

    #[test]
    fn test_document_without_sections_is_valid() {
        let lock = Lockfile::parse("GENERATOR: 0.1.0\n").unwrap();
        assert!(lock.pods().is_empty());
        assert!(lock.dependencies().is_empty());

        let empty = Lockfile::parse("{}").unwrap();
        assert_eq!(empty, Lockfile::default());
        assert_eq!(empty.to_yaml_string().unwrap(), "{}\n");
    }

    #[test]
    fn test_null_sections_are_empty() {
        let lock = Lockfile::parse("PODS:\nSPEC CHECKSUMS:\n").unwrap();
        assert!(lock.pods().is_empty());
        assert!(lock.checksums().is_empty());
    }

    #[test]
    fn test_malformed_documents() {
        for content in ["- just\n- a list\n", "PODS: [unclosed", "plain text", ""] {
            let err = Lockfile::parse(content).unwrap_err();
            assert!(
                matches!(err, LockError::MalformedDocument { .. }),
                "expected malformed for {content:?}, got {err:?}"
            );
        }
        let err = Lockfile::parse("PODS: 3\n").unwrap_err();
        assert!(matches!(err, LockError::MalformedDocument { .. }));
    }

    #[test]
    fn test_invalid_entries() {
        let err = Lockfile::parse("PODS:\n- BananaLib\n").unwrap_err();
        assert!(matches!(err, LockError::InvalidEntry { section: "PODS", .. }));

        let err = Lockfile::parse("DEPENDENCIES:\n- BananaLib (~> x)\n").unwrap_err();
        assert!(matches!(
            err,
            LockError::InvalidEntry {
                section: "DEPENDENCIES",
                ..
            }
        ));
    }

    #[test]
    fn test_pod_entry_with_two_keys_is_malformed() {
        let content = "PODS:\n- A (1.0):\n  - B\n  C (1.0):\n  - D\n";
        let err = Lockfile::parse(content).unwrap_err();
        assert!(matches!(err, LockError::MalformedDocument { .. }));
    }

    #[test]
    fn test_split_name_and_version() {
        assert_eq!(
            split_name_and_version("BananaLib/Subspec (1.0)"),
            Some(("BananaLib/Subspec", "1.0"))
        );
        assert_eq!(split_name_and_version("BananaLib"), None);
    }
}
