#![deny(missing_docs)]

//! # Scaffolding
//!
//! The two generator workflows: create an empty module and add an entity with
//! full CRUD to an existing module.
//!
//! Each workflow is split into `plan_*` and `commit`. Planning renders every
//! file, checks every precondition and resolves every patch in memory; it
//! never touches the disk. Commit writes the plan. A missing anchor or an
//! existing target therefore aborts the run before anything is written.

use crate::codegen::{
    create_directories, display_paths, ensure_absent, existing_files, render_entity,
    render_module, write_files, EntityArtifacts, ModuleArtifacts,
};
use crate::error::{AppError, AppResult};
use crate::patcher::workflows::{is_entity_wired, is_registered};
use crate::patcher::{
    module_registration_targets, plan_patches, write_patches, FilePatch, PatchTarget,
};
use crate::project::ProjectLayout;
use crate::report::{OperationLine, PatchLine, RunReport};
use crate::schema::{ArchitectureStyle, EntityDescriptor, ModuleDescriptor};
use crate::templates::{TemplateRegistry, TemplateSet};
use std::fs;
use std::path::{Path, PathBuf};

/// A fully resolved module run.
#[derive(Debug, Clone)]
pub struct ModulePlan {
    /// Module being created.
    pub module: ModuleDescriptor,
    /// Directories and skeleton files.
    pub artifacts: ModuleArtifacts,
    /// Container and global route table rewrites.
    pub patches: Vec<FilePatch>,
}

/// A fully resolved entity run.
#[derive(Debug, Clone)]
pub struct EntityPlan {
    /// Hosting module.
    pub module: ModuleDescriptor,
    /// Entity being added.
    pub entity: EntityDescriptor,
    /// New files and column plan.
    pub artifacts: EntityArtifacts,
    /// Module wiring and route table rewrites.
    pub patches: Vec<FilePatch>,
}

/// Runs the generator workflows against one project.
#[derive(Debug)]
pub struct Scaffolder<'a> {
    project: &'a ProjectLayout,
    registry: &'a TemplateRegistry,
}

impl<'a> Scaffolder<'a> {
    /// Creates a scaffolder for `project` using the given templates.
    pub fn new(project: &'a ProjectLayout, registry: &'a TemplateRegistry) -> Self {
        Self { project, registry }
    }

    /// Plans the creation of a new, empty module.
    pub fn plan_module(&self, raw_name: &str, style: ArchitectureStyle) -> AppResult<ModulePlan> {
        let module = self.project.module(raw_name, style)?;
        let set = self.registry.select(style)?;
        let module_dir = self.project.resolve(module.relative_dir());

        if module_dir.exists() {
            return Err(self.existing_module_error(&module, set));
        }

        let artifacts = render_module(set, &module);
        ensure_absent(&self.project.root, &artifacts.files)?;

        let targets =
            module_registration_targets(&self.project.composition_root(), &module, &set.layout);
        let patches = plan_patches(&self.project.root, &targets)?;

        log::info!(
            "Planned module {} ({}): {} files, {} composition files",
            module.dir_name(),
            style,
            artifacts.files.len(),
            patches.len()
        );

        Ok(ModulePlan {
            module,
            artifacts,
            patches,
        })
    }

    /// Distinguishes a finished module from the leftovers of an interrupted run.
    fn existing_module_error(
        &self,
        module: &ModuleDescriptor,
        set: &TemplateSet,
    ) -> AppError {
        let container = self.project.resolve(&self.project.config.container_file);
        let registered = fs::read_to_string(container)
            .map(|source| is_registered(&source, module, &set.layout))
            .unwrap_or(false);

        if registered {
            AppError::Precondition(format!(
                "Module '{}' already exists at {}",
                module.dir_name(),
                module.relative_dir()
            ))
        } else {
            AppError::Precondition(format!(
                "Directory {} exists but is not referenced by {}; a previous run was probably interrupted. Remove the directory or wire it by hand",
                module.relative_dir(),
                self.project.config.container_file.display()
            ))
        }
    }

    /// Resolves a module that entities can be added to.
    ///
    /// Fails unless the module directory and its wiring file exist, so callers
    /// can check this before collecting an entity schema.
    pub fn locate_module(&self, raw_module: &str, style: ArchitectureStyle) -> AppResult<ModuleDescriptor> {
        let module = self.project.module(raw_module, style)?;
        let set = self.registry.select(style)?;

        if !self.project.resolve(module.relative_dir()).is_dir() {
            return Err(AppError::Precondition(format!(
                "Module '{}' not found at {}; create it first",
                module.dir_name(),
                module.relative_dir()
            )));
        }

        let wiring_file = set.layout.wiring_file(&module);
        if !self.project.resolve(&wiring_file).is_file() {
            return Err(AppError::Precondition(format!(
                "{} not found; is '{}' really a {} module?",
                wiring_file.display(),
                module.dir_name(),
                style
            )));
        }

        Ok(module)
    }

    /// Plans the addition of an entity to an existing module.
    pub fn plan_entity(
        &self,
        raw_module: &str,
        style: ArchitectureStyle,
        entity: EntityDescriptor,
    ) -> AppResult<EntityPlan> {
        let module = self.locate_module(raw_module, style)?;
        let set = self.registry.select(style)?;

        let artifacts = render_entity(set, &module, &entity);
        let clashes = existing_files(&self.project.root, &artifacts.files);
        if !clashes.is_empty() {
            let wiring_file = set.layout.wiring_file(&module);
            return Err(self.existing_entity_error(&entity, &wiring_file, &artifacts.patches, &clashes));
        }
        let patches = plan_patches(&self.project.root, &artifacts.patches)?;

        log::info!(
            "Planned entity {} in {} ({}): {} files, {} patched files",
            entity.pascal_name(),
            module.dir_name(),
            style,
            artifacts.files.len(),
            patches.len()
        );

        Ok(EntityPlan {
            module,
            entity,
            artifacts,
            patches,
        })
    }

    /// Distinguishes a wired entity from files left behind by an interrupted run.
    fn existing_entity_error(
        &self,
        entity: &EntityDescriptor,
        wiring_file: &Path,
        targets: &[PatchTarget],
        clashes: &[PathBuf],
    ) -> AppError {
        let wired = fs::read_to_string(self.project.resolve(wiring_file))
            .map(|source| is_entity_wired(&source, wiring_file, targets))
            .unwrap_or(false);

        if wired {
            AppError::Precondition(format!(
                "Refusing to overwrite existing files: {}",
                display_paths(clashes)
            ))
        } else {
            AppError::Precondition(format!(
                "Files {} exist but {} is not wired into {}; a previous run was probably interrupted. Remove the files or wire them by hand",
                display_paths(clashes),
                entity.pascal_name(),
                wiring_file.display()
            ))
        }
    }

    /// Writes a module plan (unless `dry_run`) and reports it.
    pub fn commit_module(&self, plan: ModulePlan, dry_run: bool) -> AppResult<RunReport> {
        let root = &self.project.root;
        if !dry_run {
            create_directories(root, &plan.artifacts.directories)?;
            write_files(root, &plan.artifacts.files)?;
            write_patches(root, &plan.patches)?;
        }

        let mut report = RunReport::new(
            format!("module {}", plan.module.dir_name()),
            plan.module.style,
            dry_run,
        );
        report.directories = plan.artifacts.directories;
        report.files = plan.artifacts.files.into_iter().map(|f| f.path).collect();
        report.patches = plan.patches.iter().map(PatchLine::from).collect();
        report.next_steps.push(format!(
            "Add an entity with: scaffold entity (module '{}', architecture {})",
            plan.module.dir_name(),
            plan.module.style.choice()
        ));
        Ok(report)
    }

    /// Writes an entity plan (unless `dry_run`) and reports it.
    pub fn commit_entity(&self, plan: EntityPlan, dry_run: bool) -> AppResult<RunReport> {
        let root = &self.project.root;
        if !dry_run {
            write_files(root, &plan.artifacts.files)?;
            write_patches(root, &plan.patches)?;
        }

        let mut report = RunReport::new(
            format!(
                "entity {} in module {}",
                plan.entity.pascal_name(),
                plan.module.dir_name()
            ),
            plan.module.style,
            dry_run,
        );
        report.files = plan
            .artifacts
            .files
            .iter()
            .map(|f| f.path.clone())
            .collect();
        report.patches = plan.patches.iter().map(PatchLine::from).collect();
        report.table_statement = Some(plan.artifacts.columns.create_table_statement());
        report.operations = OperationLine::for_entity(&plan.entity);
        report
            .next_steps
            .push("Run the CREATE TABLE statement against your database".to_string());
        report
            .next_steps
            .push("Regenerate the API documentation (swag init)".to_string());
        Ok(report)
    }
}
