#![deny(missing_docs)]

//! # Code Generation
//!
//! The emission engine: renders the new files of a module or entity through
//! the selected template set and writes them without ever replacing an
//! existing file.
//!
//! Rendering is pure. Writing happens in a separate step so callers can
//! verify every precondition (including composition patches) first.

use crate::error::{AppError, AppResult};
use crate::patcher::PatchTarget;
use crate::schema::{EntityDescriptor, ModuleDescriptor};
use crate::templates::columns::ColumnPlan;
use crate::templates::{GeneratedFile, TemplateSet};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Everything an entity contributes: new files, module patches and its table.
#[derive(Debug, Clone)]
pub struct EntityArtifacts {
    /// Files to create.
    pub files: Vec<GeneratedFile>,
    /// Fragments to insert into the module's wiring and route files.
    pub patches: Vec<PatchTarget>,
    /// Column plan the files were rendered from.
    pub columns: ColumnPlan,
}

/// Renders every artifact of `entity` inside `module`.
pub fn render_entity(
    set: &TemplateSet,
    module: &ModuleDescriptor,
    entity: &EntityDescriptor,
) -> EntityArtifacts {
    let ctx = set.context(module, entity);
    let files = set.render_entity(&ctx);
    let patches = set.render_fragments(&ctx);
    log::debug!(
        "Rendered {} files and {} patches for {} ({})",
        files.len(),
        patches.len(),
        entity.pascal_name(),
        set.style
    );
    EntityArtifacts {
        files,
        patches,
        columns: ctx.columns,
    }
}

/// Files and directories of a new, empty module.
#[derive(Debug, Clone)]
pub struct ModuleArtifacts {
    /// Directories to create, relative to the project root.
    pub directories: Vec<PathBuf>,
    /// Skeleton files carrying the patch anchors.
    pub files: Vec<GeneratedFile>,
}

/// Renders the skeleton of `module`.
pub fn render_module(set: &TemplateSet, module: &ModuleDescriptor) -> ModuleArtifacts {
    let base = PathBuf::from(module.relative_dir());
    let directories = set
        .layout
        .directories
        .iter()
        .map(|dir| base.join(dir))
        .collect();
    ModuleArtifacts {
        directories,
        files: set.render_module(module),
    }
}

/// Target paths that already exist on disk, in render order.
pub fn existing_files(root: &Path, files: &[GeneratedFile]) -> Vec<PathBuf> {
    files
        .iter()
        .filter(|f| root.join(&f.path).exists())
        .map(|f| f.path.clone())
        .collect()
}

/// Fails if any target path already exists, naming every clash.
pub fn ensure_absent(root: &Path, files: &[GeneratedFile]) -> AppResult<()> {
    let clashes = existing_files(root, files);
    if clashes.is_empty() {
        Ok(())
    } else {
        Err(AppError::Precondition(format!(
            "Refusing to overwrite existing files: {}",
            display_paths(&clashes)
        )))
    }
}

/// `a.go, b.go`
pub(crate) fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Creates directories (and their parents).
pub fn create_directories(root: &Path, directories: &[PathBuf]) -> AppResult<()> {
    for dir in directories {
        fs::create_dir_all(root.join(dir))?;
    }
    Ok(())
}

/// Writes new files. A file that appeared since planning is never replaced.
pub fn write_files(root: &Path, files: &[GeneratedFile]) -> AppResult<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(files.len());
    for file in files {
        let full_path = root.join(&file.path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut handle = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&full_path)
            .map_err(|e| {
                AppError::General(format!("Failed to create {}: {}", file.path.display(), e))
            })?;
        handle.write_all(file.contents.as_bytes())?;

        log::debug!("Wrote {} ({})", file.path.display(), file.kind);
        written.push(file.path.clone());
    }
    Ok(written)
}
