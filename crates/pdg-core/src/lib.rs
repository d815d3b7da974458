//! pdg-core - Core library for Pedigraph
//!
//! This crate provides the dimensional model of the pedigree warehouse:
//! natural-key normalization, deterministic surrogate-id assignment, fact
//! linking, and the backend-neutral ancestry-traversal contract shared by
//! the relational and graph backends.

pub mod ancestry;
pub mod checksum;
pub mod config;
pub mod dimension;
pub mod error;
pub mod fact;
pub mod manifest;
pub mod normalize;
pub mod pipeline;
pub mod schema;

pub use ancestry::{
    compare_backends, AncestorTriple, AncestryBackend, BackendComparison, Parentage,
};
pub use checksum::compute_checksum;
pub use config::{Config, DatabaseConfig, GraphConfig};
pub use dimension::{
    DimensionBuilder, DimensionId, DimensionMapping, DimensionRow, DimensionTable, KeyLookup,
    NaturalKey,
};
pub use error::CoreError;
pub use fact::{DimensionMappings, FactLinker, LinkedCat, RawCat};
pub use manifest::RunManifest;
pub use normalize::UNKNOWN_TOKEN;
pub use pipeline::{build_model, DimensionalModel};
pub use schema::{DimensionKind, FACT_ATTR_COLUMNS, FACT_CSV_FILE, FACT_FK_COLUMNS, FACT_TABLE};
