#![deny(missing_docs)]

//! # Scaffold Core
//!
//! Core library of the Go service scaffolder: descriptors, naming and type
//! resolution, template sets, the emission engine, the anchor patcher and
//! the run report.

/// Shared error types.
pub mod error;

/// Identifier normalization.
pub mod naming;

/// Type mapping logic (storage -> host).
pub mod type_mapping;

/// Module, entity and field descriptors.
pub mod schema;

/// Template sets per architecture style.
pub mod templates;

/// Code generation utilities.
pub mod codegen;

/// Code patching utilities.
pub mod patcher;

/// Hosting project discovery and configuration.
pub mod project;

/// Human-readable run summaries.
pub mod report;

/// Generator workflows.
pub mod scaffold;

pub use error::{AppError, AppResult};
pub use naming::{normalize, NameForms};
pub use project::{ProjectLayout, ScaffoldConfig};
pub use report::RunReport;
pub use scaffold::{EntityPlan, ModulePlan, Scaffolder};
pub use schema::{
    ArchitectureStyle, EntityBuilder, EntityDescriptor, FieldSpec, ModuleDescriptor,
    FIELD_SENTINEL,
};
pub use templates::{ArtifactKind, Operation, TemplateRegistry, TemplateSet};
pub use type_mapping::{HostType, MySqlTypeMapper, TypeMapper};
