//! The shared ancestry-traversal contract.
//!
//! Both physical backends answer the same question: which ancestors of a
//! root cat are reachable through father/mother edges within a bounded number
//! of hops, and through which relationship was each one discovered. The
//! contract lives here as a trait plus a comparison harness; the relational
//! and graph adapters live with their backends.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// The two parent relationships of the pedigree.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Parentage {
    /// `HAS_FATHER`. Ordered before mother, matching the lexicographic
    /// order of the edge labels so both backends sort identically.
    #[serde(rename = "HAS_FATHER")]
    Father,
    /// `HAS_MOTHER`
    #[serde(rename = "HAS_MOTHER")]
    Mother,
}

impl Parentage {
    /// The edge label used in the graph view and in result rows.
    pub fn edge_label(&self) -> &'static str {
        match self {
            Parentage::Father => "HAS_FATHER",
            Parentage::Mother => "HAS_MOTHER",
        }
    }

    /// Parse an edge label back into a relationship.
    pub fn from_edge_label(label: &str) -> Option<Self> {
        match label {
            "HAS_FATHER" => Some(Parentage::Father),
            "HAS_MOTHER" => Some(Parentage::Mother),
            _ => None,
        }
    }
}

impl fmt::Display for Parentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.edge_label())
    }
}

/// One ancestor discovery: who, how many hops out, and via which
/// relationship on the final hop of the discovering path.
///
/// Ordering is `(depth, ancestor_id, relationship)`, the contract's result
/// order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord,
)]
pub struct AncestorTriple {
    pub depth: u32,
    pub ancestor_id: i64,
    pub relationship: Parentage,
}

impl AncestorTriple {
    pub fn new(ancestor_id: i64, depth: u32, relationship: Parentage) -> Self {
        AncestorTriple {
            depth,
            ancestor_id,
            relationship,
        }
    }
}

/// A storage backend able to answer the bounded ancestry traversal.
///
/// Semantics every implementation must honor:
/// - `max_depth = 0` yields an empty result; so does an unknown root.
/// - results are de-duplicated by `(ancestor_id, relationship)`, each pair
///   reported at its minimal discovery depth;
/// - sentinel parent references terminate the branch silently;
/// - the depth bound guarantees termination even on cyclic bad data;
/// - results come back sorted by `(depth, ancestor_id, relationship)`.
pub trait AncestryBackend {
    /// Short backend name, used in comparison reports and errors.
    fn name(&self) -> &'static str;

    /// Ancestors of `root_id` reachable within `max_depth` hops.
    fn ancestors(&self, root_id: i64, max_depth: u32) -> CoreResult<Vec<AncestorTriple>>;
}

/// Helper for adapters: wrap a backend-specific failure into a [`CoreError`].
pub fn backend_error(backend: &str, err: impl fmt::Display) -> CoreError {
    CoreError::Backend {
        backend: backend.to_string(),
        message: err.to_string(),
    }
}

/// Outcome of running the same traversal against two backends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendComparison {
    pub left: String,
    pub right: String,
    pub root_id: i64,
    pub max_depth: u32,
    /// Triples only the left backend produced.
    pub left_only: Vec<AncestorTriple>,
    /// Triples only the right backend produced.
    pub right_only: Vec<AncestorTriple>,
    /// Size of the agreed-upon triple set.
    pub matched: usize,
}

impl BackendComparison {
    /// Whether the two backends produced identical triple sets.
    pub fn is_equivalent(&self) -> bool {
        self.left_only.is_empty() && self.right_only.is_empty()
    }
}

/// Run both backends for the same `(root_id, max_depth)` and diff the
/// results as unordered triple sets.
pub fn compare_backends(
    left: &dyn AncestryBackend,
    right: &dyn AncestryBackend,
    root_id: i64,
    max_depth: u32,
) -> CoreResult<BackendComparison> {
    let left_set: BTreeSet<AncestorTriple> =
        left.ancestors(root_id, max_depth)?.into_iter().collect();
    let right_set: BTreeSet<AncestorTriple> =
        right.ancestors(root_id, max_depth)?.into_iter().collect();

    Ok(BackendComparison {
        left: left.name().to_string(),
        right: right.name().to_string(),
        root_id,
        max_depth,
        left_only: left_set.difference(&right_set).copied().collect(),
        right_only: right_set.difference(&left_set).copied().collect(),
        matched: left_set.intersection(&right_set).count(),
    })
}

#[cfg(test)]
#[path = "ancestry_test.rs"]
mod tests;
