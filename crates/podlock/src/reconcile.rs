//! Reconciliation of a lock file against fresh declarations.
//!
//! Every name that was declared before or is declared now ends up in exactly
//! one of four categories. A dependency is only *changed* when its pinned
//! version no longer satisfies the new requirement or its external source
//! moved; loosening or tightening a requirement around the pinned version is
//! not a change.

use crate::dependency::Dependency;
use crate::lockfile::{LockError, Lockfile};
use std::collections::{BTreeMap, HashSet};

/// How a dependency relates to the previous lock state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChangeKind {
    /// Declared now, never locked.
    Added,
    /// Locked, but the lock no longer satisfies the declaration.
    Changed,
    /// Locked, no longer declared.
    Removed,
    /// Locked and still satisfied.
    Unchanged,
}

impl ChangeKind {
    /// All kinds, in report order.
    pub const ALL: [Self; 4] = [Self::Added, Self::Changed, Self::Removed, Self::Unchanged];

    /// Returns the kind as a lowercase label.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Changed => "changed",
            Self::Removed => "removed",
            Self::Unchanged => "unchanged",
        }
    }
}

impl std::fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The classification of every dependency name.
///
/// Names within each list keep the order in which they were first seen:
/// previously declared names first, then newly declared ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyChanges {
    /// Names declared now that were never locked.
    pub added: Vec<String>,
    /// Names whose lock no longer satisfies the declaration.
    pub changed: Vec<String>,
    /// Names that were locked and are no longer declared.
    pub removed: Vec<String>,
    /// Names whose lock still satisfies the declaration.
    pub unchanged: Vec<String>,
}

impl DependencyChanges {
    fn push(&mut self, kind: ChangeKind, name: String) {
        match kind {
            ChangeKind::Added => self.added.push(name),
            ChangeKind::Changed => self.changed.push(name),
            ChangeKind::Removed => self.removed.push(name),
            ChangeKind::Unchanged => self.unchanged.push(name),
        }
    }

    /// The names in one category.
    #[must_use]
    pub fn get(&self, kind: ChangeKind) -> &[String] {
        match kind {
            ChangeKind::Added => &self.added,
            ChangeKind::Changed => &self.changed,
            ChangeKind::Removed => &self.removed,
            ChangeKind::Unchanged => &self.unchanged,
        }
    }

    /// The category a name was classified into.
    #[must_use]
    pub fn kind_of(&self, name: &str) -> Option<ChangeKind> {
        ChangeKind::ALL
            .into_iter()
            .find(|kind| self.get(*kind).iter().any(|n| n == name))
    }

    /// Returns true if anything was added, changed or removed.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        !(self.added.is_empty() && self.changed.is_empty() && self.removed.is_empty())
    }

    /// The total number of classified names.
    #[must_use]
    pub fn len(&self) -> usize {
        ChangeKind::ALL.iter().map(|kind| self.get(*kind).len()).sum()
    }

    /// Returns true if no names were classified.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The classification as a label-to-names map.
    #[must_use]
    pub fn to_map(&self) -> BTreeMap<ChangeKind, Vec<String>> {
        ChangeKind::ALL
            .into_iter()
            .map(|kind| (kind, self.get(kind).to_vec()))
            .collect()
    }
}

/// Classify a single name given its locked and declared forms.
fn classify(locked: Option<&Dependency>, declared: Option<&Dependency>) -> ChangeKind {
    match (locked, declared) {
        (None, _) => ChangeKind::Added,
        (Some(_), None) => ChangeKind::Removed,
        (Some(locked), Some(declared)) if declared.is_compatible_with(locked) => {
            ChangeKind::Unchanged
        }
        (Some(_), Some(_)) => ChangeKind::Changed,
    }
}

impl Lockfile {
    /// Compare this lock file against the consumer's current declarations.
    ///
    /// # Errors
    ///
    /// Only fails if the lock file's own declared dependencies cannot be
    /// locked, which indicates an inconsistent document.
    pub fn detect_changes(&self, declared: &[Dependency]) -> Result<DependencyChanges, LockError> {
        let mut roots = HashSet::new();
        let mut locked = Vec::with_capacity(self.dependencies().len());
        for dependency in self.dependencies() {
            if roots.insert(dependency.root_name()) {
                locked.extend(self.dependencies_to_lock(dependency.root_name())?);
            }
        }

        let mut seen = HashSet::new();
        let all_names: Vec<&str> = self
            .dependencies()
            .iter()
            .chain(declared)
            .map(Dependency::name)
            .filter(|name| seen.insert(*name))
            .collect();

        let mut changes = DependencyChanges::default();
        for name in all_names {
            let locked_match = locked.iter().find(|dep| dep.name() == name);
            let declared_match = declared.iter().find(|dep| dep.name() == name);
            let kind = classify(locked_match, declared_match);
            tracing::trace!(dependency = name, %kind, "classified dependency");
            changes.push(kind, name.to_string());
        }

        tracing::debug!(
            added = changes.added.len(),
            changed = changes.changed.len(),
            removed = changes.removed.len(),
            unchanged = changes.unchanged.len(),
            "reconciled declarations against lock file"
        );
        Ok(changes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dependency::ExternalSource;
    use crate::version::Requirement;

    const LOCK: &str = "\
PODS:
- BananaLib (1.0):
  - monkey (< 1.0.9)
- JSONKit (1.4)
- monkey (1.0.8)

DEPENDENCIES:
- BananaLib (~> 1.0)
- JSONKit (= 1.4)
";

    fn dep(s: &str) -> Dependency {
        Dependency::parse(s).unwrap()
    }

    fn lock() -> Lockfile {
        Lockfile::parse(LOCK).unwrap()
    }

    #[test]
    fn test_added_removed_unchanged() {
        let declared = vec![dep("BananaLib (~> 1.0)"), dep("Chameleon (>= 2.0)")];
        let changes = lock().detect_changes(&declared).unwrap();

        assert_eq!(changes.added, ["Chameleon"]);
        assert!(changes.changed.is_empty());
        assert_eq!(changes.removed, ["JSONKit"]);
        assert_eq!(changes.unchanged, ["BananaLib"]);
    }

    #[test]
    fn test_changed_when_requirement_excludes_pin() {
        let declared = vec![dep("BananaLib (~> 2.0)"), dep("JSONKit (= 1.4)")];
        let changes = lock().detect_changes(&declared).unwrap();
        assert_eq!(changes.changed, ["BananaLib"]);
        assert_eq!(changes.unchanged, ["JSONKit"]);
    }

    #[test]
    fn test_loosened_requirement_is_unchanged() {
        let declared = vec![dep("BananaLib"), dep("JSONKit (>= 1.0, < 2.0)")];
        let changes = lock().detect_changes(&declared).unwrap();
        assert!(!changes.has_changes());
        assert_eq!(changes.unchanged, ["BananaLib", "JSONKit"]);
    }

    #[test]
    fn test_changed_when_source_moves() {
        let source = ExternalSource::new().with("path", "../BananaLib");
        let declared = vec![
            Dependency::new("BananaLib", Requirement::any()).with_external_source(source),
            dep("JSONKit (= 1.4)"),
        ];
        let changes = lock().detect_changes(&declared).unwrap();
        assert_eq!(changes.kind_of("BananaLib"), Some(ChangeKind::Changed));
    }

    #[test]
    fn test_subspecs_are_classified_by_full_name() {
        let content = "\
PODS:
- BananaLib/Core (1.0)
- BananaLib/UI (1.0)

DEPENDENCIES:
- BananaLib/Core (~> 1.0)
- BananaLib/UI (~> 1.0)
";
        let lock = Lockfile::parse(content).unwrap();
        let declared = vec![
            dep("BananaLib/Core (~> 1.0)"),
            dep("BananaLib/UI (~> 2.0)"),
            dep("BananaLib/Extras"),
        ];
        let changes = lock.detect_changes(&declared).unwrap();

        assert_eq!(changes.unchanged, ["BananaLib/Core"]);
        assert_eq!(changes.changed, ["BananaLib/UI"]);
        assert_eq!(changes.added, ["BananaLib/Extras"]);
        assert!(changes.removed.is_empty());
    }

    #[test]
    fn test_every_name_classified_once() {
        let declared = vec![
            dep("JSONKit (~> 2.0)"),
            dep("Chameleon"),
            dep("Chameleon"),
            dep("Other/Sub"),
        ];
        let changes = lock().detect_changes(&declared).unwrap();

        assert_eq!(changes.len(), 4);
        for name in ["BananaLib", "JSONKit", "Chameleon", "Other/Sub"] {
            let hits = ChangeKind::ALL
                .iter()
                .filter(|kind| changes.get(**kind).iter().any(|n| n == name))
                .count();
            assert_eq!(hits, 1, "{name} classified {hits} times");
        }
    }

    #[test]
    fn test_order_follows_first_seen() {
        let declared = vec![dep("Zeta"), dep("Alpha")];
        let changes = Lockfile::default().detect_changes(&declared).unwrap();
        assert_eq!(changes.added, ["Zeta", "Alpha"]);
    }

    #[test]
    fn test_empty_lock_and_declarations() {
        let changes = Lockfile::default().detect_changes(&[]).unwrap();
        assert!(changes.is_empty());
        assert!(!changes.has_changes());
    }

    #[test]
    fn test_to_map() {
        let declared = vec![dep("BananaLib (~> 1.0)"), dep("Chameleon (>= 2.0)")];
        let map = lock().detect_changes(&declared).unwrap().to_map();
        assert_eq!(map.len(), 4);
        assert_eq!(map[&ChangeKind::Added], ["Chameleon"]);
        assert_eq!(map[&ChangeKind::Removed], ["JSONKit"]);
        assert_eq!(map[&ChangeKind::Unchanged], ["BananaLib"]);
        assert!(map[&ChangeKind::Changed].is_empty());
    }
}
