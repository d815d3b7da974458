//! Error types for pdg-graph

use crate::model::NodeKey;
use thiserror::Error;

/// Graph store errors
#[derive(Error, Debug)]
pub enum GraphError {
    /// Snapshot file IO (G001)
    #[error("[G001] Snapshot IO failed for '{path}': {source}")]
    SnapshotIo {
        path: String,
        source: std::io::Error,
    },

    /// Snapshot encoding/decoding (G002)
    #[error("[G002] Snapshot serialization failed: {0}")]
    SnapshotFormat(#[from] serde_json::Error),

    /// An edge referenced a node absent from the store (G003)
    #[error("[G003] Edge endpoint not in store: {key}")]
    MissingNode { key: NodeKey },

    /// Seeding marker IO (G004)
    #[error("[G004] Marker IO failed for '{path}': {source}")]
    MarkerIo {
        path: String,
        source: std::io::Error,
    },
}

/// Result type alias for GraphError
pub type GraphResult<T> = Result<T, GraphError>;
