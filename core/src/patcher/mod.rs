#![deny(missing_docs)]

//! # Code Patching
//!
//! Additive, anchor-based edits of existing source files.
//!
//! - **anchor**: Single insertion next to a literal anchor line.
//! - **files**: Plans and writes the patches of several files at once.
//! - **workflows**: High-level patching recipes (module registration).

/// Anchor location and insertion.
pub mod anchor;

/// File-level planning and writing.
pub mod files;

/// High-level patching workflows.
pub mod workflows;

pub use anchor::{apply_patch, InsertionMode, PatchOutcome, PatchTarget};
pub use files::{plan_patches, write_patches, FilePatch};
pub use workflows::{module_registration_targets, CompositionRoot};
