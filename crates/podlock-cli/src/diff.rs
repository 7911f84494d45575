//! Implementation of the `podlock diff` and `podlock check` commands.

use anyhow::{Context, Result};
use podlock::{Declarations, DependencyChanges, Lockfile};
use std::path::Path;

use crate::FileArgs;

/// Load the declarations file.
pub(crate) fn load_declarations(path: &Path) -> Result<Declarations> {
    Declarations::from_path(path)
        .with_context(|| format!("Failed to load declarations from {}", path.display()))
}

/// Load the lock file, if there is one.
pub(crate) fn load_lockfile(path: &Path) -> Result<Option<Lockfile>> {
    Lockfile::load_from(path)
        .with_context(|| format!("Failed to load lock file {}", path.display()))
}

/// Compare the declarations against the lock file.
///
/// Without a lock file every declared dependency is reported as added.
pub fn diff(files: &FileArgs) -> Result<DependencyChanges> {
    let declarations = load_declarations(&files.declarations)?;
    let lockfile = match load_lockfile(&files.lockfile)? {
        Some(lockfile) => lockfile,
        None => {
            tracing::info!(path = %files.lockfile.display(), "no lock file found");
            Lockfile::default()
        }
    };

    lockfile
        .detect_changes(declarations.dependencies())
        .context("Lock file is inconsistent")
}

/// Render a summary of the changes, one line per dependency.
#[must_use]
pub fn format_summary(changes: &DependencyChanges) -> String {
    Summary(changes).to_string()
}

struct Summary<'a>(&'a DependencyChanges);

impl std::fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let changes = self.0;
        if !changes.has_changes() {
            return writeln!(f, "Dependencies are in sync with the lock file.");
        }

        let groups = [
            ("Added:", '+', &changes.added),
            ("Changed:", '~', &changes.changed),
            ("Removed:", '-', &changes.removed),
        ];
        for (title, marker, names) in groups {
            if names.is_empty() {
                continue;
            }
            writeln!(f, "{title}")?;
            for name in names {
                writeln!(f, "  {marker} {name}")?;
            }
        }

        if !changes.unchanged.is_empty() {
            writeln!(f, "{} unchanged", changes.unchanged.len())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn files_in(dir: &TempDir) -> FileArgs {
        FileArgs {
            lockfile: dir.path().join(podlock::LOCK_FILE),
            declarations: dir.path().join(podlock::DECLARATIONS_FILE),
        }
    }

    #[test]
    fn test_summary_in_sync() {
        let changes = DependencyChanges {
            unchanged: vec!["JSONKit".to_string()],
            ..Default::default()
        };
        assert_eq!(
            format_summary(&changes),
            "Dependencies are in sync with the lock file.\n"
        );
    }

    #[test]
    fn test_summary_groups() {
        let changes = DependencyChanges {
            added: vec!["Kiwi".to_string()],
            changed: vec!["Chameleon".to_string()],
            removed: vec!["JSONKit".to_string()],
            unchanged: vec!["BananaLib".to_string()],
        };
        assert_eq!(
            format_summary(&changes),
            "Added:\n  + Kiwi\nChanged:\n  ~ Chameleon\nRemoved:\n  - JSONKit\n1 unchanged\n"
        );
    }

    #[test]
    fn test_diff_without_lock_file() {
        let dir = TempDir::new().unwrap();
        let files = files_in(&dir);
        fs::write(
            &files.declarations,
            "[dependencies]\nJSONKit = \"1.4\"\nBananaLib = \"~> 1.0\"\n",
        )
        .unwrap();

        let changes = diff(&files).unwrap();
        assert_eq!(changes.added, ["JSONKit", "BananaLib"]);
        assert!(changes.has_changes());
    }

    #[test]
    fn test_diff_missing_declarations() {
        let dir = TempDir::new().unwrap();
        let err = diff(&files_in(&dir)).unwrap_err();
        assert!(err.to_string().contains("Failed to load declarations"));
    }
}
