#![deny(missing_docs)]

//! # File Patching
//!
//! Groups patch targets by file, applies them to in-memory copies and writes
//! the results back only once every target of every file has been resolved.

use crate::error::{AppError, AppResult};
use crate::patcher::anchor::{apply_patch, PatchOutcome, PatchTarget};
use indexmap::IndexMap;
use std::fs;
use std::path::{Path, PathBuf};

/// The pending rewrite of one existing file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePatch {
    /// File path relative to the project root.
    pub path: PathBuf,
    /// Contents before patching.
    pub original: String,
    /// Contents after every applicable target.
    pub patched: String,
    /// Labels of inserted fragments.
    pub applied: Vec<String>,
    /// Labels of fragments skipped because they were already present.
    pub skipped: Vec<String>,
}

impl FilePatch {
    /// True if at least one fragment was inserted.
    pub fn is_modified(&self) -> bool {
        self.original != self.patched
    }
}

/// Resolves every target against the current file contents.
///
/// Files are read once each, in first-mention order; targets for the same file
/// are applied in the given order. Nothing is written. Any missing file or
/// anchor aborts the whole plan.
pub fn plan_patches(root: &Path, targets: &[PatchTarget]) -> AppResult<Vec<FilePatch>> {
    let mut by_file: IndexMap<&Path, Vec<&PatchTarget>> = IndexMap::new();
    for target in targets {
        by_file.entry(target.file.as_path()).or_default().push(target);
    }

    let mut plans = Vec::with_capacity(by_file.len());

    for (rel_path, file_targets) in by_file {
        let full_path = root.join(rel_path);
        if !full_path.is_file() {
            return Err(AppError::Precondition(format!(
                "Composition file not found: {}",
                rel_path.display()
            )));
        }

        let original = fs::read_to_string(&full_path)?;
        let mut patched = original.clone();
        let mut applied = Vec::new();
        let mut skipped = Vec::new();

        for target in file_targets {
            match apply_patch(&patched, rel_path, target)? {
                PatchOutcome::Applied(next) => {
                    log::debug!("Patched {}: {}", rel_path.display(), target.label);
                    patched = next;
                    applied.push(target.label.clone());
                }
                PatchOutcome::AlreadyPresent => {
                    log::warn!(
                        "Skipped {} in {}: already present",
                        target.label,
                        rel_path.display()
                    );
                    skipped.push(target.label.clone());
                }
            }
        }

        plans.push(FilePatch {
            path: rel_path.to_path_buf(),
            original,
            patched,
            applied,
            skipped,
        });
    }

    Ok(plans)
}

/// Writes every modified file of the plan.
pub fn write_patches(root: &Path, plans: &[FilePatch]) -> AppResult<()> {
    for plan in plans.iter().filter(|p| p.is_modified()) {
        let full_path = root.join(&plan.path);
        fs::write(&full_path, &plan.patched).map_err(|e| {
            AppError::General(format!("Failed to update {}: {}", plan.path.display(), e))
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patcher::anchor::InsertionMode;
    use tempfile::tempdir;

    #[test]
    fn test_plan_groups_targets_and_leaves_disk_untouched() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.go"), "import (\n)\ntype A struct {\n}\n").unwrap();

        let targets = vec![
            PatchTarget::import("a.go", "example.com/x", None),
            PatchTarget::new("a.go", "type A struct {", InsertionMode::After, "\tX int", "field"),
            PatchTarget::new("a.go", "type A struct {", InsertionMode::After, "\tX int", "field again"),
        ];

        let plans = plan_patches(dir.path(), &targets).unwrap();
        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].applied, vec!["import example.com/x", "field"]);
        assert_eq!(plans[0].skipped, vec!["field again"]);
        assert!(plans[0].is_modified());

        let on_disk = fs::read_to_string(dir.path().join("a.go")).unwrap();
        assert_eq!(on_disk, "import (\n)\ntype A struct {\n}\n");

        write_patches(dir.path(), &plans).unwrap();
        let on_disk = fs::read_to_string(dir.path().join("a.go")).unwrap();
        assert_eq!(on_disk, "import (\n\t\"example.com/x\"\n)\ntype A struct {\n\tX int\n}\n");
    }

    #[test]
    fn test_missing_file_is_a_precondition_failure() {
        let dir = tempdir().unwrap();
        let targets = vec![PatchTarget::import("missing.go", "example.com/x", None)];
        let err = plan_patches(dir.path(), &targets).unwrap_err();
        assert!(matches!(err, AppError::Precondition(_)));
    }

    #[test]
    fn test_anchor_miss_in_second_file_aborts_plan() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.go"), "import (\n)\n").unwrap();
        fs::write(dir.path().join("b.go"), "package b\n").unwrap();

        let targets = vec![
            PatchTarget::import("a.go", "example.com/x", None),
            PatchTarget::import("b.go", "example.com/x", None),
        ];
        let err = plan_patches(dir.path(), &targets).unwrap_err();
        assert!(matches!(err, AppError::AnchorNotFound { .. }));
    }
}
