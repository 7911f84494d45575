//! Declarations file (`Podfile.toml`) parsing and validation.
//!
//! The declarations file lists the consumer's own dependencies, in order:
//!
//! ```toml
//! [dependencies]
//! BananaLib = "~> 1.0"
//! "BananaLib/Subspec" = "~> 1.0"
//! JSONKit = { version = "= 1.4" }
//! Chameleon = { git = "https://github.com/example/chameleon.git", tag = "2.0" }
//! Local = { path = "../Local" }
//! ```

use crate::dependency::{root_name, Dependency, ExternalSource};
use crate::version::{Requirement, VersionError};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// The conventional declarations file name.
pub const DECLARATIONS_FILE: &str = "Podfile.toml";

/// Errors that can occur when working with declarations files.
#[derive(Error, Debug)]
pub enum DeclarationsError {
    #[error("failed to read declarations file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse declarations file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid dependency name '{0}': {1}")]
    InvalidName(String, &'static str),

    #[error("invalid requirement for '{name}': {source}")]
    InvalidRequirement {
        name: String,
        #[source]
        source: VersionError,
    },

    #[error("dependency '{0}' names more than one source")]
    ConflictingSources(String),

    #[error("dependency '{0}' uses git options without a git url")]
    GitOptionsWithoutGit(String),
}

/// Dependency specification.
///
/// Can be either a simple requirement string or a detailed specification.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DeclarationSpec {
    /// Simple requirement string: `"~> 1.0"` or `">= 2.0, < 3.0"`.
    Simple(String),

    /// Detailed dependency specification.
    Detailed(Declaration),
}

/// Detailed dependency specification.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Declaration {
    /// Version requirement.
    #[serde(default)]
    pub version: Option<String>,

    /// Path to a local checkout.
    #[serde(default)]
    pub path: Option<String>,

    /// Path or URL of a standalone manifest.
    #[serde(default)]
    pub podspec: Option<String>,

    /// Git repository URL.
    #[serde(default)]
    pub git: Option<String>,

    /// Git branch name.
    #[serde(default)]
    pub branch: Option<String>,

    /// Git tag name.
    #[serde(default)]
    pub tag: Option<String>,

    /// Git commit.
    #[serde(default)]
    pub commit: Option<String>,
}

impl Declaration {
    /// The external source named by this declaration, if any.
    fn external_source(&self, name: &str) -> Result<Option<ExternalSource>, DeclarationsError> {
        let locations = [
            ("git", &self.git),
            ("path", &self.path),
            ("podspec", &self.podspec),
        ];
        let mut present = locations
            .into_iter()
            .filter_map(|(key, value)| value.as_ref().map(|v| (key, v)));

        let Some((key, location)) = present.next() else {
            if self.branch.is_some() || self.tag.is_some() || self.commit.is_some() {
                return Err(DeclarationsError::GitOptionsWithoutGit(name.to_string()));
            }
            return Ok(None);
        };
        if present.next().is_some() {
            return Err(DeclarationsError::ConflictingSources(name.to_string()));
        }

        let mut source = ExternalSource::new().with(key, location.clone());
        if key == "git" {
            let options = [
                ("branch", &self.branch),
                ("tag", &self.tag),
                ("commit", &self.commit),
            ];
            for (option, value) in options {
                if let Some(value) = value {
                    source = source.with(option, value.clone());
                }
            }
        } else if self.branch.is_some() || self.tag.is_some() || self.commit.is_some() {
            return Err(DeclarationsError::GitOptionsWithoutGit(name.to_string()));
        }

        Ok(Some(source))
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDeclarations {
    #[serde(default)]
    dependencies: toml::Table,
}

/// The consumer's declared dependencies, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct Declarations {
    dependencies: Vec<Dependency>,
}

impl Declarations {
    /// Load declarations from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DeclarationsError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse declarations from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or a dependency is invalid.
    pub fn parse(content: &str) -> Result<Self, DeclarationsError> {
        let raw: RawDeclarations = toml::from_str(content)?;

        let mut dependencies = Vec::with_capacity(raw.dependencies.len());
        for (name, value) in raw.dependencies {
            let spec: DeclarationSpec = value.try_into()?;
            dependencies.push(Self::declare(name, &spec)?);
        }

        tracing::debug!(dependencies = dependencies.len(), "parsed declarations");
        Ok(Self { dependencies })
    }

    /// Turn one `name = spec` entry into a dependency.
    fn declare(name: String, spec: &DeclarationSpec) -> Result<Dependency, DeclarationsError> {
        validate_name(&name)?;

        let (requirement, source) = match spec {
            DeclarationSpec::Simple(requirement) => (Some(requirement.as_str()), None),
            DeclarationSpec::Detailed(declaration) => (
                declaration.version.as_deref(),
                declaration.external_source(&name)?,
            ),
        };

        let requirement = match requirement {
            Some(requirement) => Requirement::parse(requirement).map_err(|source| {
                DeclarationsError::InvalidRequirement {
                    name: name.clone(),
                    source,
                }
            })?,
            None => Requirement::any(),
        };

        let dependency = Dependency::new(name, requirement);
        Ok(match source {
            Some(source) => dependency.with_external_source(source),
            None => dependency,
        })
    }

    /// The declared dependencies, in declaration order.
    #[must_use]
    pub fn dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }

    /// Consume the declarations, returning the dependencies.
    #[must_use]
    pub fn into_dependencies(self) -> Vec<Dependency> {
        self.dependencies
    }

    /// Returns true if nothing is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty()
    }
}

/// Validate a dependency name.
fn validate_name(name: &str) -> Result<(), DeclarationsError> {
    if name.is_empty() {
        return Err(DeclarationsError::InvalidName(
            name.to_string(),
            "name cannot be empty",
        ));
    }

    if root_name(name).is_empty() || name.ends_with('/') || name.contains("//") {
        return Err(DeclarationsError::InvalidName(
            name.to_string(),
            "sub-package names must be 'Root/Sub'",
        ));
    }

    if name
        .chars()
        .any(|c| c.is_whitespace() || c == '(' || c == ')')
    {
        return Err(DeclarationsError::InvalidName(
            name.to_string(),
            "name cannot contain whitespace or parentheses",
        ));
    }

    Ok(())
}
