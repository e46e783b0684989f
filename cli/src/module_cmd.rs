#![deny(missing_docs)]

//! # Module Command
//!
//! Creates an empty feature module and registers it in the dependency
//! container and the global route table.

use crate::config::ProjectArgs;
use crate::error::CliResult;
use crate::prompt::Prompter;
use scaffold_core::{RunReport, Scaffolder, TemplateRegistry};
use std::io::{BufRead, Write};

/// Executes the module generator.
///
/// Prompts: module name, architecture.
pub fn execute<R: BufRead, W: Write>(
    args: &ProjectArgs,
    prompter: &mut Prompter<R, W>,
) -> CliResult<RunReport> {
    let layout = args.layout()?;

    let name = prompter.module_name()?;
    let style = prompter.architecture()?;
    layout.module(&name, style)?;

    let registry = TemplateRegistry::with_defaults();
    let scaffolder = Scaffolder::new(&layout, &registry);
    let plan = scaffolder.plan_module(&name, style)?;
    Ok(scaffolder.commit_module(plan, args.dry_run)?)
}
