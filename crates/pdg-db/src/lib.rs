//! pdg-db - Relational backend for Pedigraph
//!
//! This crate provides the `Database` trait, its DuckDB implementation, the
//! warehouse schema with typed IO, and the recursive-join formulation of the
//! ancestry traversal.

pub mod ancestry;
pub mod duckdb;
pub mod error;
pub mod traits;
pub mod warehouse;

pub use ancestry::RelationalAncestry;
pub use duckdb::DuckDbBackend;
pub use error::DbError;
pub use traits::Database;
pub use warehouse::Warehouse;
