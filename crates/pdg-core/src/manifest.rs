//! Run manifest written after each successful pipeline run.
//!
//! Records what was built and the dimension checksums, so a rerun over the
//! same source can be verified to have produced identical id assignment.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::pipeline::DimensionalModel;

/// Manifest of one completed pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunManifest {
    /// Unique identifier for this run
    pub run_id: String,

    /// When the run started
    pub started_at: DateTime<Utc>,

    /// When the manifest was written
    pub completed_at: DateTime<Utc>,

    /// Path of the raw source the model was built from
    pub source: String,

    /// Number of linked fact rows
    pub fact_rows: usize,

    /// Row counts per dimension table, sentinel row included
    pub dimension_rows: BTreeMap<String, usize>,

    /// SHA-256 checksums per dimension table
    pub dimension_checksums: BTreeMap<String, String>,
}

impl RunManifest {
    /// Build a manifest for a finished model.
    pub fn for_model(model: &DimensionalModel, source: &str, started_at: DateTime<Utc>) -> Self {
        RunManifest {
            run_id: Uuid::new_v4().to_string(),
            started_at,
            completed_at: Utc::now(),
            source: source.to_string(),
            fact_rows: model.facts.len(),
            dimension_rows: model
                .dimensions
                .iter()
                .map(|t| (t.kind.table_name().to_string(), t.len()))
                .collect(),
            dimension_checksums: model.dimension_checksums(),
        }
    }

    /// Write the manifest as pretty JSON.
    pub fn save(&self, path: &Path) -> CoreResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Read a manifest back.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        Ok(serde_json::from_str(&content)?)
    }
}

#[cfg(test)]
#[path = "manifest_test.rs"]
mod tests;
