#![deny(missing_docs)]

//! # Anchor Patching
//!
//! Inserts generated lines next to a literal anchor inside an existing file.
//!
//! The file is treated as opaque text. The first line containing the anchor
//! is the insertion point; the payload goes on the line(s) directly before or
//! after it. A missing anchor is an error, never a silent no-op.

use crate::error::{AppError, AppResult};
use std::path::{Path, PathBuf};

/// Where the payload goes relative to the anchored line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertionMode {
    /// On the lines preceding the anchored line.
    Before,
    /// On the lines following the anchored line.
    After,
}

/// One additive mutation of a pre-existing file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchTarget {
    /// File to patch, relative to the project root.
    pub file: PathBuf,
    /// Literal text that locates the insertion line.
    pub anchor: String,
    /// Side of the anchored line that receives the payload.
    pub mode: InsertionMode,
    /// Complete lines to insert, each terminated by `\n`.
    pub payload: String,
    /// Text whose presence means the payload was already applied.
    pub guard: String,
    /// Short label used in reports, e.g. `import controllers`.
    pub label: String,
}

impl PatchTarget {
    /// Creates a target whose idempotency guard is the payload itself.
    pub fn new(
        file: impl Into<PathBuf>,
        anchor: impl Into<String>,
        mode: InsertionMode,
        payload: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        let mut payload = payload.into();
        if !payload.ends_with('\n') {
            payload.push('\n');
        }
        Self {
            file: file.into(),
            anchor: anchor.into(),
            mode,
            guard: payload.clone(),
            payload,
            label: label.into(),
        }
    }

    /// Creates an import-list insertion guarded by the quoted import path, so an
    /// aliased or differently-indented import of the same path also counts.
    pub fn import(file: impl Into<PathBuf>, import_path: &str, alias: Option<&str>) -> Self {
        let line = match alias {
            Some(alias) => format!("\t{} \"{}\"\n", alias, import_path),
            None => format!("\t\"{}\"\n", import_path),
        };
        let mut target = Self::new(
            file,
            "import (",
            InsertionMode::After,
            line,
            format!("import {}", import_path),
        );
        target.guard = format!("\"{}\"", import_path);
        target
    }

    /// Overrides the idempotency guard.
    pub fn with_guard(mut self, guard: impl Into<String>) -> Self {
        self.guard = guard.into();
        self
    }
}

/// Result of applying one target to an in-memory source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchOutcome {
    /// The payload was inserted; holds the new source.
    Applied(String),
    /// Equivalent text already exists; the source is unchanged.
    AlreadyPresent,
}

/// Applies a single patch target to `source`.
///
/// `file` is only used for diagnostics.
pub fn apply_patch(source: &str, file: &Path, target: &PatchTarget) -> AppResult<PatchOutcome> {
    let anchor_at = source
        .find(&target.anchor)
        .ok_or_else(|| AppError::AnchorNotFound {
            file: file.to_path_buf(),
            anchor: target.anchor.clone(),
        })?;

    if contains_normalized(source, &target.guard) {
        return Ok(PatchOutcome::AlreadyPresent);
    }

    let insert_pos = match target.mode {
        InsertionMode::Before => line_start(source, anchor_at),
        InsertionMode::After => line_end(source, anchor_at),
    };

    let mut patch = String::new();
    // An anchor on the last line without a trailing newline
    if insert_pos == source.len() && !source.is_empty() && !source.ends_with('\n') {
        patch.push('\n');
    }
    patch.push_str(&target.payload);

    let mut new_source = source.to_string();
    new_source.insert_str(insert_pos, &patch);

    Ok(PatchOutcome::Applied(new_source))
}

/// Byte offset of the start of the line containing `pos`.
fn line_start(source: &str, pos: usize) -> usize {
    source[..pos].rfind('\n').map(|i| i + 1).unwrap_or(0)
}

/// Byte offset just past the newline ending the line containing `pos`.
fn line_end(source: &str, pos: usize) -> usize {
    source[pos..]
        .find('\n')
        .map(|i| pos + i + 1)
        .unwrap_or(source.len())
}

/// Whitespace-insensitive containment, so formatter realignment of an
/// already-inserted fragment still counts as present.
pub(crate) fn contains_normalized(haystack: &str, needle: &str) -> bool {
    let needle = collapse_whitespace(needle);
    if needle.is_empty() {
        return false;
    }
    collapse_whitespace(haystack).contains(&needle)
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const MODULE_SOURCE: &str = "package catalog\n\nimport (\n\t\"database/sql\"\n)\n\ntype CatalogModule struct {\n}\n\nfunc NewCatalogModule(db *sql.DB) *CatalogModule {\n\treturn &CatalogModule{\n\t}\n}\n";

    fn applied(outcome: PatchOutcome) -> String {
        match outcome {
            PatchOutcome::Applied(s) => s,
            PatchOutcome::AlreadyPresent => panic!("expected the patch to apply"),
        }
    }

    #[test]
    fn test_insert_after_anchor_line() {
        let target = PatchTarget::new(
            "module.go",
            "type CatalogModule struct {",
            InsertionMode::After,
            "\tProductController *controllers.ProductController",
            "struct field",
        );
        let out = applied(apply_patch(MODULE_SOURCE, Path::new("module.go"), &target).unwrap());
        assert!(out.contains(
            "type CatalogModule struct {\n\tProductController *controllers.ProductController\n}\n"
        ));
    }

    #[test]
    fn test_insert_before_anchor_line() {
        let target = PatchTarget::new(
            "module.go",
            "return &CatalogModule{",
            InsertionMode::Before,
            "\tproductRepo := repositories.NewProductRepository(db)\n\n",
            "wiring",
        );
        let out = applied(apply_patch(MODULE_SOURCE, Path::new("module.go"), &target).unwrap());
        assert!(out.contains(
            "*CatalogModule {\n\tproductRepo := repositories.NewProductRepository(db)\n\n\treturn &CatalogModule{"
        ));
    }

    #[test]
    fn test_only_first_match_is_patched() {
        let source = "a {\nx\na {\n";
        let target = PatchTarget::new("f", "a {", InsertionMode::After, "y", "first");
        let out = applied(apply_patch(source, Path::new("f"), &target).unwrap());
        assert_eq!(out, "a {\ny\nx\na {\n");
    }

    #[test]
    fn test_missing_anchor_is_fatal() {
        let target = PatchTarget::new(
            "container.go",
            "type Container struct {",
            InsertionMode::After,
            "\tCatalogModule *catalog.CatalogModule",
            "struct field",
        );
        let err = apply_patch("package container\n", Path::new("container.go"), &target)
            .unwrap_err();
        match err {
            AppError::AnchorNotFound { file, anchor } => {
                assert_eq!(file, PathBuf::from("container.go"));
                assert_eq!(anchor, "type Container struct {");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_existing_payload_is_skipped_even_when_realigned() {
        let source = "type M struct {\n\tProductController   *controllers.ProductController\n}\n";
        let target = PatchTarget::new(
            "m.go",
            "type M struct {",
            InsertionMode::After,
            "\tProductController *controllers.ProductController",
            "struct field",
        );
        assert_eq!(
            apply_patch(source, Path::new("m.go"), &target).unwrap(),
            PatchOutcome::AlreadyPresent
        );
    }

    #[test]
    fn test_import_guard_matches_aliased_import() {
        let source = "import (\n\twebcontext \"example.com/app/internal/shared/web/context\"\n)\n";
        let target =
            PatchTarget::import("routes.go", "example.com/app/internal/shared/web/context", None);
        assert_eq!(
            apply_patch(source, Path::new("routes.go"), &target).unwrap(),
            PatchOutcome::AlreadyPresent
        );
    }

    #[test]
    fn test_import_inserted_into_block() {
        let target = PatchTarget::import(
            "container.go",
            "example.com/app/internal/catalog/infra",
            Some("catalogInfra"),
        );
        let out = applied(apply_patch(MODULE_SOURCE, Path::new("container.go"), &target).unwrap());
        assert!(out.contains(
            "import (\n\tcatalogInfra \"example.com/app/internal/catalog/infra\"\n\t\"database/sql\"\n)"
        ));
    }

    #[test]
    fn test_anchor_on_last_line_without_newline() {
        let target = PatchTarget::new("f", "end", InsertionMode::After, "tail", "tail");
        let out = applied(apply_patch("start\nend", Path::new("f"), &target).unwrap());
        assert_eq!(out, "start\nend\ntail\n");
    }
}
