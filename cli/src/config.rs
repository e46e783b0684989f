#![deny(missing_docs)]

//! # Project Options
//!
//! Flags shared by every command. A flag wins over its environment variable,
//! which wins over `.scaffold.yaml`, which wins over the built-in defaults.

use crate::error::CliResult;
use scaffold_core::{ProjectLayout, ScaffoldConfig};
use std::path::PathBuf;

/// Where the hosting project lives and how the run behaves.
#[derive(clap::Args, Debug, Clone)]
pub struct ProjectArgs {
    /// Root of the hosting project (the directory holding go.mod).
    #[clap(long, env = "SCAFFOLD_PROJECT_DIR", default_value = ".", global = true)]
    pub project_dir: PathBuf,

    /// Dependency container file, relative to the project root.
    #[clap(long, env = "SCAFFOLD_CONTAINER_FILE", global = true)]
    pub container_file: Option<PathBuf>,

    /// Global route table file, relative to the project root.
    #[clap(long, env = "SCAFFOLD_ROUTES_FILE", global = true)]
    pub routes_file: Option<PathBuf>,

    /// Check and render everything but write nothing.
    #[clap(long, global = true)]
    pub dry_run: bool,

    /// Enable debug logging.
    #[clap(short, long, global = true)]
    pub verbose: bool,
}

impl ProjectArgs {
    /// Effective conventions: the project file with command-line overrides applied.
    pub fn config(&self) -> CliResult<ScaffoldConfig> {
        let mut config = ScaffoldConfig::load(&self.project_dir)?;
        if let Some(path) = &self.container_file {
            config.container_file = path.clone();
        }
        if let Some(path) = &self.routes_file {
            config.routes_file = path.clone();
        }
        Ok(config)
    }

    /// Locates the hosting project.
    pub fn layout(&self) -> CliResult<ProjectLayout> {
        let config = self.config()?;
        let layout = ProjectLayout::discover(&self.project_dir, config)?;
        log::debug!(
            "Project {} at {}",
            layout.module_path,
            layout.root.display()
        );
        Ok(layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn args(dir: PathBuf) -> ProjectArgs {
        ProjectArgs {
            project_dir: dir,
            container_file: None,
            routes_file: None,
            dry_run: false,
            verbose: false,
        }
    }

    #[test]
    fn test_flags_override_project_file() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(".scaffold.yaml"),
            "container_file: app/container.go\nroutes_file: app/routes.go\n",
        )
        .unwrap();

        let mut project = args(dir.path().to_path_buf());
        project.routes_file = Some(PathBuf::from("web/routes.go"));
        let config = project.config().unwrap();
        assert_eq!(config.container_file, PathBuf::from("app/container.go"));
        assert_eq!(config.routes_file, PathBuf::from("web/routes.go"));
    }

    #[test]
    fn test_layout_requires_manifest() {
        let dir = tempdir().unwrap();
        assert!(args(dir.path().to_path_buf()).layout().is_err());

        fs::write(dir.path().join("go.mod"), "module example.com/app\n").unwrap();
        let layout = args(dir.path().to_path_buf()).layout().unwrap();
        assert_eq!(layout.module_path, "example.com/app");
    }
}
