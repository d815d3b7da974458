//! The seeding marker file.
//!
//! A zero-byte flag whose presence means "the store has been fully seeded".
//! It is created only after a seeding pass completes, and it is the source of
//! truth over any in-memory assumption about store contents: absence is the
//! one and only trigger for (re)seeding.

use crate::error::{GraphError, GraphResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Handle on the marker file.
#[derive(Debug, Clone)]
pub struct SeedMarker {
    path: PathBuf,
}

impl SeedMarker {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SeedMarker { path: path.into() }
    }

    /// The marker's location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the marker exists.
    pub fn is_present(&self) -> bool {
        self.path.exists()
    }

    /// Create the zero-byte marker, creating parent directories as needed.
    pub fn create(&self) -> GraphResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.io_err(e))?;
        }
        fs::File::create(&self.path).map_err(|e| self.io_err(e))?;
        Ok(())
    }

    /// Remove the marker if present.
    pub fn clear(&self) -> GraphResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_err(e)),
        }
    }

    fn io_err(&self, source: std::io::Error) -> GraphError {
        GraphError::MarkerIo {
            path: self.path.display().to_string(),
            source,
        }
    }
}
