//! Command implementations

pub mod ancestry;
pub mod build;
pub mod common;
pub mod compare;
pub mod export;
pub mod seed;
