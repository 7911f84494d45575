//! Pinned versions and version requirements.
//!
//! This module provides:
//! - [`Version`], a pinned version that may omit trailing components (`1.0`)
//! - [`Requirement`], a list of clauses (`~> 1.0`, `>= 2.0, < 3.0`) that a
//!   version must satisfy
//!
//! Comparison is delegated to `semver` after padding missing components with
//! zeroes, so `1.0` and `1.0.0` compare equal.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur when parsing versions and requirements.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    /// The version string is not a valid version.
    #[error("invalid version '{version}': {reason}")]
    InvalidVersion { version: String, reason: String },

    /// The requirement string is not a valid requirement.
    #[error("invalid requirement '{requirement}': {reason}")]
    InvalidRequirement { requirement: String, reason: String },
}

/// A pinned package version.
///
/// The text is kept exactly as written so that `1.0` renders back as `1.0`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Version {
    raw: String,
    parsed: semver::Version,
    segments: usize,
}

impl Version {
    /// Parse a version string.
    ///
    /// Accepts one to three numeric components, optionally followed by a
    /// pre-release (`-beta.1`) and/or build (`+sha`) suffix.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is empty, has more than three numeric
    /// components, or the suffix is not valid.
    pub fn parse(version: &str) -> Result<Self, VersionError> {
        let raw = version.trim();
        let invalid = |reason: &str| VersionError::InvalidVersion {
            version: version.to_string(),
            reason: reason.to_string(),
        };

        if raw.is_empty() {
            return Err(invalid("version cannot be empty"));
        }

        let (core, suffix) = raw
            .find(['-', '+'])
            .map_or((raw, ""), |idx| raw.split_at(idx));

        let mut numbers = Vec::with_capacity(3);
        for part in core.split('.') {
            let number = part
                .parse::<u64>()
                .map_err(|_| invalid("components must be non-negative integers"))?;
            numbers.push(number);
        }
        if numbers.len() > 3 {
            return Err(invalid("at most three numeric components are supported"));
        }
        let segments = numbers.len();
        numbers.resize(3, 0);

        let padded = format!("{}.{}.{}{suffix}", numbers[0], numbers[1], numbers[2]);
        let parsed = semver::Version::parse(&padded).map_err(|e| invalid(&e.to_string()))?;

        Ok(Self {
            raw: raw.to_string(),
            parsed,
            segments,
        })
    }

    /// The version text as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The zero-padded semantic version used for comparison.
    #[must_use]
    pub fn semver(&self) -> &semver::Version {
        &self.parsed
    }

    /// Whether this is a pre-release version.
    #[must_use]
    pub fn is_prerelease(&self) -> bool {
        !self.parsed.pre.is_empty()
    }

    /// Upper bound for a pessimistic (`~>`) requirement on this version.
    ///
    /// `~> 1.2.3` allows `< 1.3`, `~> 1.2` allows `< 2.0`, `~> 1` allows `< 2`.
    /// A minor component at its limit bumps the major one instead; `None` when
    /// the major component is at its limit too, leaving no upper bound.
    fn pessimistic_bound(&self) -> Option<semver::Version> {
        let semver::Version { major, minor, .. } = self.parsed;
        let next_minor = if self.segments >= 3 {
            minor.checked_add(1)
        } else {
            None
        };
        match next_minor {
            Some(minor) => Some(semver::Version::new(major, minor, 0)),
            None => major
                .checked_add(1)
                .map(|major| semver::Version::new(major, 0, 0)),
        }
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.parsed == other.parsed
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.parsed.cmp(&other.parsed)
    }
}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.parsed.hash(state);
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Version {
    type Error = VersionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Version> for String {
    fn from(version: Version) -> Self {
        version.raw
    }
}

/// A comparison operator in a requirement clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// `=`
    Exact,
    /// `!=`
    NotEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterEq,
    /// `<`
    Less,
    /// `<=`
    LessEq,
    /// `~>`: at least the given version, below the next significant release.
    Pessimistic,
}

impl Op {
    /// Returns the operator as written in a requirement.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "=",
            Self::NotEqual => "!=",
            Self::Greater => ">",
            Self::GreaterEq => ">=",
            Self::Less => "<",
            Self::LessEq => "<=",
            Self::Pessimistic => "~>",
        }
    }

    /// Split a clause into its operator and the remaining version text.
    ///
    /// A clause without an operator is an exact requirement.
    fn split(clause: &str) -> (Self, &str) {
        // Two-character operators must be tried first.
        const OPS: [(&str, Op); 7] = [
            ("~>", Op::Pessimistic),
            (">=", Op::GreaterEq),
            ("<=", Op::LessEq),
            ("!=", Op::NotEqual),
            (">", Op::Greater),
            ("<", Op::Less),
            ("=", Op::Exact),
        ];

        OPS.iter()
            .find_map(|(prefix, op)| clause.strip_prefix(prefix).map(|rest| (*op, rest)))
            .unwrap_or((Self::Exact, clause))
    }
}

impl std::fmt::Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One clause of a requirement, e.g. `>= 2.0`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Constraint {
    /// The comparison operator.
    pub op: Op,
    /// The version being compared against.
    pub version: Version,
}

impl Constraint {
    /// Check whether a version satisfies this clause.
    #[must_use]
    pub fn matches(&self, version: &Version) -> bool {
        let v = version.semver();
        let base = self.version.semver();
        match self.op {
            Op::Exact => v == base,
            Op::NotEqual => v != base,
            Op::Greater => v > base,
            Op::GreaterEq => v >= base,
            Op::Less => v < base,
            Op::LessEq => v <= base,
            Op::Pessimistic => {
                v >= base
                    && self
                        .version
                        .pessimistic_bound()
                        .map_or(true, |bound| *v < bound)
            }
        }
    }
}

impl std::fmt::Display for Constraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.op, self.version)
    }
}

/// A version requirement: every clause must be satisfied.
///
/// A requirement without clauses accepts any version.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Requirement {
    constraints: Vec<Constraint>,
}

impl Requirement {
    /// A requirement that accepts any version.
    #[must_use]
    pub fn any() -> Self {
        Self::default()
    }

    /// A requirement that accepts exactly one version.
    #[must_use]
    pub fn exact(version: Version) -> Self {
        Self {
            constraints: vec![Constraint {
                op: Op::Exact,
                version,
            }],
        }
    }

    /// Parse a comma-separated list of clauses.
    ///
    /// An empty string yields [`Requirement::any`].
    ///
    /// # Errors
    ///
    /// Returns an error if a clause is empty or its version is invalid.
    pub fn parse(requirement: &str) -> Result<Self, VersionError> {
        let trimmed = requirement.trim();
        if trimmed.is_empty() {
            return Ok(Self::any());
        }

        let mut constraints = Vec::new();
        for clause in trimmed.split(',') {
            let clause = clause.trim();
            if clause.is_empty() {
                return Err(VersionError::InvalidRequirement {
                    requirement: requirement.to_string(),
                    reason: "empty clause".to_string(),
                });
            }
            let (op, version) = Op::split(clause);
            let version =
                Version::parse(version).map_err(|e| VersionError::InvalidRequirement {
                    requirement: requirement.to_string(),
                    reason: e.to_string(),
                })?;
            constraints.push(Constraint { op, version });
        }

        Ok(Self { constraints })
    }

    /// Whether this requirement accepts any version.
    #[must_use]
    pub fn is_any(&self) -> bool {
        self.constraints.is_empty()
    }

    /// The clauses of this requirement, in declaration order.
    #[must_use]
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Check whether a version satisfies every clause.
    #[must_use]
    pub fn matches(&self, version: &Version) -> bool {
        self.constraints.iter().all(|c| c.matches(version))
    }
}

impl std::fmt::Display for Requirement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.constraints.is_empty() {
            return f.write_str(">= 0");
        }
        for (i, constraint) in self.constraints.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{constraint}")?;
        }
        Ok(())
    }
}

impl FromStr for Requirement {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
