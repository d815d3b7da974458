//! pdg-graph - Property-graph backend for Pedigraph
//!
//! This crate projects the dimensional model into a labeled property graph,
//! seeds it through idempotent batched merges gated by a marker file, and
//! provides the graph-pattern formulation of the ancestry traversal.

pub mod ancestry;
pub mod error;
pub mod marker;
pub mod model;
pub mod projector;
pub mod seed;
pub mod store;

pub use ancestry::GraphAncestry;
pub use error::GraphError;
pub use marker::SeedMarker;
pub use model::{EdgeRecord, Label, NodeKey, NodeRecord, RelType};
pub use projector::{GraphModelProjector, ProjectionStats};
pub use seed::{SeedOutcome, Seeder};
pub use store::{MergeStats, PropertyGraph};
