#![deny(missing_docs)]

//! # Project Layout
//!
//! Locates the hosting project: its module identity (from the `go.mod`
//! manifest), the feature-module directory and the two composition files.
//! Conventions can be overridden by an optional `.scaffold.yaml` at the
//! project root.

use crate::error::{AppError, AppResult};
use crate::patcher::CompositionRoot;
use crate::schema::{ArchitectureStyle, ModuleDescriptor};
use regex::Regex;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Name of the optional configuration file at the project root.
pub const CONFIG_FILE_NAME: &str = ".scaffold.yaml";

/// Project conventions. Every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScaffoldConfig {
    /// Directory holding feature modules.
    pub modules_dir: String,
    /// Dependency container file.
    pub container_file: PathBuf,
    /// Global route table file.
    pub routes_file: PathBuf,
    /// Manifest declaring the module identity.
    pub manifest_file: PathBuf,
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        let root = CompositionRoot::default();
        Self {
            modules_dir: "internal".to_string(),
            container_file: root.container_file,
            routes_file: root.routes_file,
            manifest_file: PathBuf::from("go.mod"),
        }
    }
}

impl ScaffoldConfig {
    /// Parses a YAML document.
    pub fn from_yaml(source: &str) -> AppResult<Self> {
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(source)
            .map_err(|e| AppError::Config(format!("Invalid {}: {}", CONFIG_FILE_NAME, e)))
    }

    /// Loads `.scaffold.yaml` from `root`, falling back to the defaults when it is absent.
    pub fn load(root: &Path) -> AppResult<Self> {
        let path = root.join(CONFIG_FILE_NAME);
        if !path.is_file() {
            log::debug!("No {} in {}, using defaults", CONFIG_FILE_NAME, root.display());
            return Ok(Self::default());
        }
        log::debug!("Loading {}", path.display());
        let source = fs::read_to_string(&path)?;
        Self::from_yaml(&source)
    }
}

fn module_line_re() -> &'static Regex {
    static MODULE_RE: OnceLock<Regex> = OnceLock::new();
    MODULE_RE.get_or_init(|| {
        Regex::new(r#"(?m)^\s*module\s+"?([^\s"]+)"?\s*$"#).expect("Invalid module regex")
    })
}

/// Extracts the module identity from a `go.mod` manifest.
pub fn parse_module_path(manifest: &str) -> Option<String> {
    module_line_re()
        .captures(manifest)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// The hosting project as seen by the generators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    /// Project root directory.
    pub root: PathBuf,
    /// Module identity, used as the import path prefix.
    pub module_path: String,
    /// Effective conventions.
    pub config: ScaffoldConfig,
}

impl ProjectLayout {
    /// Reads the manifest under `root` and fixes the conventions.
    pub fn discover(root: &Path, config: ScaffoldConfig) -> AppResult<Self> {
        let manifest = root.join(&config.manifest_file);
        if !manifest.is_file() {
            return Err(AppError::Precondition(format!(
                "{} not found in {}; run from the project root or pass --project-dir",
                config.manifest_file.display(),
                root.display()
            )));
        }

        let source = fs::read_to_string(&manifest)?;
        let module_path = parse_module_path(&source).ok_or_else(|| {
            AppError::Config(format!(
                "No module declaration in {}",
                config.manifest_file.display()
            ))
        })?;
        log::debug!("Project module path: {}", module_path);

        Ok(Self {
            root: root.to_path_buf(),
            module_path,
            config,
        })
    }

    /// The files every new module is registered in.
    pub fn composition_root(&self) -> CompositionRoot {
        CompositionRoot {
            container_file: self.config.container_file.clone(),
            routes_file: self.config.routes_file.clone(),
        }
    }

    /// Describes a module of this project.
    pub fn module(&self, raw_name: &str, style: ArchitectureStyle) -> AppResult<ModuleDescriptor> {
        ModuleDescriptor::new(raw_name, &self.module_path, &self.config.modules_dir, style)
    }

    /// Absolute path of a project-relative path.
    pub fn resolve(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root.join(relative)
    }
}
