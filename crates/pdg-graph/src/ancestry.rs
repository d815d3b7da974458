//! Graph-pattern ancestry adapter over the property graph.
//!
//! Level-order breadth-first expansion: each cat node is expanded once, at
//! its first-discovery depth, and each `(ancestor, relationship)` arrival is
//! recorded at the minimal depth it is seen. This mirrors what the
//! relational formulation computes with its recursive walk plus
//! `MIN(depth)` aggregation.

use crate::store::PropertyGraph;
use pdg_core::ancestry::{AncestorTriple, AncestryBackend, Parentage};
use pdg_core::error::CoreResult;
use std::collections::{HashMap, HashSet};

/// The graph formulation of the ancestry traversal.
pub struct GraphAncestry<'a> {
    graph: &'a PropertyGraph,
}

impl<'a> GraphAncestry<'a> {
    pub fn new(graph: &'a PropertyGraph) -> Self {
        GraphAncestry { graph }
    }
}

impl AncestryBackend for GraphAncestry<'_> {
    fn name(&self) -> &'static str {
        "graph"
    }

    fn ancestors(&self, root_id: i64, max_depth: u32) -> CoreResult<Vec<AncestorTriple>> {
        if max_depth == 0 {
            return Ok(Vec::new());
        }

        let mut discovered: HashMap<(i64, Parentage), u32> = HashMap::new();
        let mut expanded: HashSet<i64> = HashSet::from([root_id]);
        let mut frontier = vec![root_id];

        for depth in 1..=max_depth {
            let mut next = Vec::new();
            for cat in frontier {
                for (parent, relationship) in self.graph.parents_of(cat) {
                    discovered.entry((parent, relationship)).or_insert(depth);
                    if expanded.insert(parent) {
                        next.push(parent);
                    }
                }
            }
            if next.is_empty() {
                break;
            }
            frontier = next;
        }

        let mut triples: Vec<AncestorTriple> = discovered
            .into_iter()
            .map(|((ancestor_id, relationship), depth)| {
                AncestorTriple::new(ancestor_id, depth, relationship)
            })
            .collect();
        triples.sort();
        Ok(triples)
    }
}
