#![deny(missing_docs)]

//! # Module Registration
//!
//! Patch recipes that wire a new module into the application's composition
//! root (the dependency container) and the global route table.

use crate::naming::normalize;
use crate::patcher::anchor::{contains_normalized, InsertionMode, PatchTarget};
use crate::schema::ModuleDescriptor;
use crate::templates::ModuleLayout;
use std::path::{Path, PathBuf};

/// Struct declaration the module field goes under.
pub const CONTAINER_STRUCT_ANCHOR: &str = "type Container struct {";

/// Container literal; module factories are called just before it.
pub const CONTAINER_RETURN_ANCHOR: &str = "return &Container{";

/// Opening of the closure that registers every module's routes.
pub const GLOBAL_ROUTES_ANCHOR: &str = "return func(router *gin.Engine) {";

/// The two shared files every module is registered in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositionRoot {
    /// Dependency container, relative to the project root.
    pub container_file: PathBuf,
    /// Global route table, relative to the project root.
    pub routes_file: PathBuf,
}

impl Default for CompositionRoot {
    fn default() -> Self {
        Self {
            container_file: PathBuf::from("cmd/server/container/container.go"),
            routes_file: PathBuf::from("internal/infra/web/routes/routes.go"),
        }
    }
}

/// Local variable holding the module instance in the container factory.
fn module_var(module: &ModuleDescriptor) -> String {
    normalize(&module.struct_name()).camel
}

/// Field declaration added to the container struct.
fn container_field(module: &ModuleDescriptor, layout: &ModuleLayout) -> String {
    let wiring = layout.wiring_import(module);
    format!(
        "\t{} *{}.{}\n",
        module.struct_name(),
        wiring.ident,
        module.struct_name()
    )
}

/// Builds every patch needed to register `module` in the composition root.
///
/// Order matters only within a file: imports first, then declarations, then
/// the factory call and the literal field.
pub fn module_registration_targets(
    root: &CompositionRoot,
    module: &ModuleDescriptor,
    layout: &ModuleLayout,
) -> Vec<PatchTarget> {
    let wiring = layout.wiring_import(module);
    let routes = layout.routes_import(module);
    let struct_name = module.struct_name();
    let var = module_var(module);

    let mut targets = vec![
        PatchTarget::import(
            root.container_file.clone(),
            &wiring.import_path,
            wiring.alias.as_deref(),
        ),
        PatchTarget::new(
            root.container_file.clone(),
            CONTAINER_STRUCT_ANCHOR,
            InsertionMode::After,
            container_field(module, layout),
            format!("container field {}", struct_name),
        ),
        PatchTarget::new(
            root.container_file.clone(),
            CONTAINER_RETURN_ANCHOR,
            InsertionMode::Before,
            format!("\t{} := {}.New{}(db)\n\n", var, wiring.ident, struct_name),
            format!("container wiring {}", struct_name),
        )
        .with_guard(format!("{}.New{}(", wiring.ident, struct_name)),
        PatchTarget::new(
            root.container_file.clone(),
            CONTAINER_RETURN_ANCHOR,
            InsertionMode::After,
            format!("\t\t{}: {},\n", struct_name, var),
            format!("container literal {}", struct_name),
        ),
    ];

    targets.push(PatchTarget::import(
        root.routes_file.clone(),
        &routes.import_path,
        routes.alias.as_deref(),
    ));
    targets.push(
        PatchTarget::new(
            root.routes_file.clone(),
            GLOBAL_ROUTES_ANCHOR,
            InsertionMode::After,
            format!("\t\t{}.RegisterRoutes(router, c.{})\n", routes.ident, struct_name),
            format!("global routes {}", struct_name),
        )
        .with_guard(format!("{}.RegisterRoutes(router, c.{})", routes.ident, struct_name)),
    );

    targets
}

/// True if the container source already declares the module's field.
///
/// Used to tell an interrupted earlier run apart from a genuine name clash.
pub fn is_registered(container_source: &str, module: &ModuleDescriptor, layout: &ModuleLayout) -> bool {
    contains_normalized(container_source, &container_field(module, layout))
}

/// True if the module wiring source already holds one of an entity's own
/// fragments. Import lines are shared between entities and do not count.
pub fn is_entity_wired(wiring_source: &str, wiring_file: &Path, targets: &[PatchTarget]) -> bool {
    targets
        .iter()
        .filter(|t| t.file == wiring_file && t.anchor != "import (")
        .any(|t| contains_normalized(wiring_source, &t.guard))
}
