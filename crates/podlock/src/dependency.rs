//! Dependency descriptors.
//!
//! A [`Dependency`] is what a consumer declares (`BananaLib (~> 1.0)`) or what
//! the lockfile pins (`BananaLib (= 1.0)`). Identity between a package and its
//! sub-packages always goes through [`root_name`].

use crate::version::{Requirement, Version, VersionError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use thiserror::Error;

/// Keys that name where an external source lives, in order of preference.
const LOCATION_KEYS: [&str; 4] = ["git", "path", "podspec", "http"];

/// Errors that can occur when parsing a dependency string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DependencyError {
    /// The dependency string is empty.
    #[error("dependency cannot be empty")]
    Empty,

    /// The dependency string does not follow `Name` or `Name (clauses)`.
    #[error("malformed dependency '{input}': expected 'Name' or 'Name (requirement)'")]
    Malformed { input: String },

    /// The requirement inside the parentheses is invalid.
    #[error("invalid requirement for '{name}': {source}")]
    Requirement {
        name: String,
        #[source]
        source: VersionError,
    },
}

/// Returns the package name before the first `/`.
///
/// `BananaLib/Subspec` and `BananaLib` share the root name `BananaLib`.
#[must_use]
pub fn root_name(name: &str) -> &str {
    name.split_once('/').map_or(name, |(root, _)| root)
}

/// Where a package comes from when it is not fetched from the registry.
///
/// The descriptor is opaque to this crate: an ordered set of `key = value`
/// pairs such as `git` + `tag`, or a single `path`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExternalSource(BTreeMap<String, String>);

impl ExternalSource {
    /// Create an empty external source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a key to this source.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Get the value for a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Iterate over all keys and values in sorted key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns true if the source has no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The key naming the location (`git`, `path`, ...), if any.
    fn location_key(&self) -> Option<&str> {
        LOCATION_KEYS
            .iter()
            .copied()
            .find(|key| self.0.contains_key(*key))
            .or_else(|| self.0.keys().next().map(String::as_str))
    }
}

impl std::fmt::Display for ExternalSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Some(location) = self.location_key() else {
            return Ok(());
        };
        write!(f, "from `{}`", self.0[location])?;
        for (key, value) in self.iter().filter(|(k, _)| *k != location) {
            write!(f, ", {key} `{value}`")?;
        }
        Ok(())
    }
}

/// A dependency on a package.
///
/// A dependency with an exact version is *locked*: it denotes the version a
/// previous resolution pinned, and its requirement is exactly `= version`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Dependency {
    name: String,
    requirement: Requirement,
    external_source: Option<ExternalSource>,
    exact_version: Option<Version>,
}

impl Dependency {
    /// Create an unlocked dependency.
    #[must_use]
    pub fn new(name: impl Into<String>, requirement: Requirement) -> Self {
        Self {
            name: name.into(),
            requirement,
            external_source: None,
            exact_version: None,
        }
    }

    /// Attach an external source to this dependency.
    #[must_use]
    pub fn with_external_source(mut self, source: ExternalSource) -> Self {
        self.external_source = Some(source);
        self
    }

    /// Clone this dependency in locked form.
    ///
    /// When `version` is `None` (nothing was pinned) the clone keeps the
    /// original requirement and stays unlocked.
    #[must_use]
    pub fn locked(&self, version: Option<&Version>) -> Self {
        let mut locked = self.clone();
        if let Some(version) = version {
            locked.requirement = Requirement::exact(version.clone());
            locked.exact_version = Some(version.clone());
        }
        locked
    }

    /// The full name, possibly sub-package qualified.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The name of the root package.
    #[must_use]
    pub fn root_name(&self) -> &str {
        root_name(&self.name)
    }

    /// The version requirement.
    #[must_use]
    pub fn requirement(&self) -> &Requirement {
        &self.requirement
    }

    /// The external source, if any.
    #[must_use]
    pub fn external_source(&self) -> Option<&ExternalSource> {
        self.external_source.as_ref()
    }

    /// The pinned version, if this dependency is locked.
    #[must_use]
    pub fn exact_version(&self) -> Option<&Version> {
        self.exact_version.as_ref()
    }

    /// Returns true if this dependency is pinned to one version.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.exact_version.is_some()
    }

    /// Check whether a locked dependency still satisfies this declaration.
    ///
    /// This is not equality: the pinned version must satisfy this requirement
    /// and both external sources must be the same. A locked dependency that
    /// has no pinned version only satisfies an unconstrained requirement.
    #[must_use]
    pub fn is_compatible_with(&self, locked: &Dependency) -> bool {
        let version_ok = match locked.exact_version() {
            Some(version) => self.requirement.matches(version),
            None => self.requirement.is_any(),
        };
        version_ok && self.external_source == locked.external_source
    }

    /// Parse a dependency string such as `Name`, `Name (~> 1.0)` or
    /// `Name (from `url`)`.
    ///
    /// The `from` form carries no requirement; the external source itself is
    /// stored separately and re-attached by the caller.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is empty, malformed, or the requirement
    /// is invalid.
    pub fn parse(input: &str) -> Result<Self, DependencyError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(DependencyError::Empty);
        }
        let malformed = || DependencyError::Malformed {
            input: input.to_string(),
        };

        let (name, clause) = match input.split_once(" (") {
            Some((name, rest)) => (name, Some(rest.strip_suffix(')').ok_or_else(malformed)?)),
            None => (input, None),
        };
        if name.is_empty() || name.contains(char::is_whitespace) || name.contains(['(', ')']) {
            return Err(malformed());
        }

        let requirement = match clause {
            Some(clause) if clause.starts_with("from ") => Requirement::any(),
            Some(clause) => {
                Requirement::parse(clause).map_err(|source| DependencyError::Requirement {
                    name: name.to_string(),
                    source,
                })?
            }
            None => Requirement::any(),
        };

        Ok(Self::new(name, requirement))
    }
}

impl std::fmt::Display for Dependency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)?;
        if let Some(source) = &self.external_source {
            write!(f, " ({source})")
        } else if !self.requirement.is_any() {
            write!(f, " ({})", self.requirement)
        } else {
            Ok(())
        }
    }
}

impl FromStr for Dependency {
    type Err = DependencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
