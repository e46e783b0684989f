#![deny(missing_docs)]

//! # Scaffold CLI
//!
//! Interactive generator for feature modules and CRUD entities of a Gin
//! service.
//!
//! Supported Commands:
//! - `module`: Creates an empty module and registers it in the composition root.
//! - `entity`: Adds an entity with five REST operations to an existing module.

use crate::config::ProjectArgs;
use crate::error::CliResult;
use crate::prompt::Prompter;
use clap::{Parser, Subcommand};
use std::io;
use std::process::ExitCode;

mod config;
mod entity_cmd;
mod error;
mod module_cmd;
mod prompt;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Module and CRUD entity generator for Gin services")]
struct Cli {
    #[clap(flatten)]
    project: ProjectArgs,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create an empty feature module.
    Module,
    /// Add an entity with full CRUD to an existing module.
    Entity,
}

fn run(cli: &Cli) -> CliResult<()> {
    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());

    let report = match cli.command {
        Commands::Module => module_cmd::execute(&cli.project, &mut prompter)?,
        Commands::Entity => entity_cmd::execute(&cli.project, &mut prompter)?,
    };

    let skipped = report.skipped_count();
    if skipped > 0 {
        log::warn!("{} fragments were already present and left untouched", skipped);
    }

    println!();
    println!("{}", report);
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.project.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("❌ {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli_structure() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["scaffold", "entity", "--dry-run", "--project-dir", "/tmp/app"]).unwrap();
        assert!(matches!(cli.command, Commands::Entity));
        assert!(cli.project.dry_run);
        assert_eq!(cli.project.project_dir, std::path::PathBuf::from("/tmp/app"));
    }
}
