#![deny(missing_docs)]

//! # Entity Command
//!
//! Adds an entity with create/get/list/update/delete to an existing module.

use crate::config::ProjectArgs;
use crate::error::CliResult;
use crate::prompt::Prompter;
use scaffold_core::{MySqlTypeMapper, RunReport, Scaffolder, TemplateRegistry};
use std::io::{BufRead, Write};

/// Executes the entity generator.
///
/// Prompts: module name, architecture, entity name, then fields until `done`.
/// The module must already exist before the entity prompts start. Nothing is
/// written unless every file and patch could be planned.
pub fn execute<R: BufRead, W: Write>(
    args: &ProjectArgs,
    prompter: &mut Prompter<R, W>,
) -> CliResult<RunReport> {
    let layout = args.layout()?;
    let registry = TemplateRegistry::with_defaults();
    let scaffolder = Scaffolder::new(&layout, &registry);

    let module_name = prompter.module_name()?;
    let style = prompter.architecture()?;
    let module = scaffolder.locate_module(&module_name, style)?;
    log::debug!("Adding entity to {}", module.relative_dir());

    let builder = prompter.entity(MySqlTypeMapper)?;
    let entity = prompter.fields(builder)?;
    log::debug!(
        "Entity {} with {} fields",
        entity.pascal_name(),
        entity.fields().len()
    );

    let plan = scaffolder.plan_entity(&module_name, style, entity)?;
    Ok(scaffolder.commit_entity(plan, args.dry_run)?)
}
