//! Configuration types and parsing for pedigraph.yml

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file name looked up in the project directory.
pub const CONFIG_FILE: &str = "pedigraph.yml";

/// Main project configuration from pedigraph.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Project name
    pub name: String,

    /// Project version
    #[serde(default = "default_version")]
    pub version: String,

    /// Path to the normalized raw cats CSV, relative to the project root
    pub source: String,

    /// Relational database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Graph store configuration
    #[serde(default)]
    pub graph: GraphConfig,

    /// Directory CSV exports are written to, relative to the project root
    #[serde(default = "default_export_path")]
    pub export_path: String,
}

/// Relational database connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// DuckDB database file path, or ":memory:"
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        DatabaseConfig {
            path: default_db_path(),
        }
    }
}

/// Graph store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GraphConfig {
    /// Path of the graph snapshot file
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: String,

    /// Path of the zero-byte seeding marker; its presence skips reseeding
    #[serde(default = "default_marker_path")]
    pub marker_path: String,

    /// Rows per merge batch when seeding the store
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        GraphConfig {
            snapshot_path: default_snapshot_path(),
            marker_path: default_marker_path(),
            batch_size: default_batch_size(),
        }
    }
}

fn default_version() -> String {
    "0.1.0".to_string()
}

fn default_export_path() -> String {
    "target/export".to_string()
}

fn default_db_path() -> String {
    "target/pedigraph.duckdb".to_string()
}

fn default_snapshot_path() -> String {
    "target/graph.json".to_string()
}

fn default_marker_path() -> String {
    "target/graph.seeded".to_string()
}

fn default_batch_size() -> usize {
    25_000
}

impl Config {
    /// Load configuration from an explicit file path.
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }
        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `pedigraph.yml` from a project directory.
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        Self::load(&dir.join(CONFIG_FILE))
    }

    fn validate(&self) -> CoreResult<()> {
        if self.name.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "project name must not be empty".to_string(),
            });
        }
        if self.source.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "source must point at the raw cats CSV".to_string(),
            });
        }
        if self.graph.batch_size == 0 {
            return Err(CoreError::ConfigInvalid {
                message: "graph.batch_size must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Absolute path of the raw source CSV.
    pub fn source_absolute(&self, root: &Path) -> PathBuf {
        root.join(&self.source)
    }

    /// Absolute path of the database file (":memory:" passes through).
    pub fn database_path_absolute(&self, root: &Path) -> String {
        if self.database.path == ":memory:" {
            self.database.path.clone()
        } else {
            root.join(&self.database.path).display().to_string()
        }
    }

    /// Absolute path of the graph snapshot file.
    pub fn snapshot_absolute(&self, root: &Path) -> PathBuf {
        root.join(&self.graph.snapshot_path)
    }

    /// Absolute path of the seeding marker file.
    pub fn marker_absolute(&self, root: &Path) -> PathBuf {
        root.join(&self.graph.marker_path)
    }

    /// Absolute path of the CSV export directory.
    pub fn export_absolute(&self, root: &Path) -> PathBuf {
        root.join(&self.export_path)
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
