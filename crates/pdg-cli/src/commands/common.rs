//! Shared helpers for command implementations

use anyhow::{Context, Result};
use pdg_core::Config;
use pdg_db::DuckDbBackend;
use std::path::{Path, PathBuf};

use crate::cli::GlobalArgs;

/// A loaded project: its root directory and parsed configuration.
pub struct Project {
    pub root: PathBuf,
    pub config: Config,
}

impl Project {
    /// Path the run manifest is written to.
    pub fn manifest_path(&self) -> PathBuf {
        self.root.join("target/manifest.json")
    }
}

/// Load the project from the global arguments, honoring --config.
pub fn load_project(global: &GlobalArgs) -> Result<Project> {
    let root = PathBuf::from(&global.project_dir);
    let config = match &global.config {
        Some(path) => Config::load(Path::new(path)),
        None => Config::load_from_dir(&root),
    }
    .context("Failed to load project config")?;

    if global.verbose {
        eprintln!("[verbose] project '{}' at {}", config.name, root.display());
    }

    Ok(Project { root, config })
}

/// Open the configured warehouse database.
pub fn open_database(project: &Project) -> Result<DuckDbBackend> {
    let path = project.config.database_path_absolute(&project.root);
    log::debug!("opening warehouse database at {path}");
    DuckDbBackend::new(&path).context("Failed to connect to database")
}
