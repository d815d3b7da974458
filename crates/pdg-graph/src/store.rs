//! The in-process property-graph store.
//!
//! A `petgraph` digraph with a keyed node map on top, mirroring how the
//! external graph engines this store stands in for index their nodes. All
//! writes are merges: matching on `(label, id)` for nodes and on the full
//! `(from, rel, to)` triple for edges, so re-sending a batch is a no-op.

use crate::error::{GraphError, GraphResult};
use crate::model::{EdgeRecord, NodeKey, NodeRecord, RelType};
use pdg_core::ancestry::Parentage;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Counters returned by a merge batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub created: usize,
    pub matched: usize,
}

impl MergeStats {
    pub fn absorb(&mut self, other: MergeStats) {
        self.created += other.created;
        self.matched += other.matched;
    }
}

/// On-disk form of the store: plain node and edge lists, sorted for
/// reproducible output.
#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    nodes: Vec<NodeRecord>,
    edges: Vec<EdgeRecord>,
}

/// The property graph both the projector and the graph traversal run
/// against.
#[derive(Debug, Default)]
pub struct PropertyGraph {
    graph: DiGraph<NodeRecord, RelType>,
    node_map: HashMap<NodeKey, NodeIndex>,
    edge_set: HashSet<(NodeIndex, RelType, NodeIndex)>,
}

impl PropertyGraph {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes in the store.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges in the store.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Merge a batch of nodes: create the missing ones, match the rest.
    pub fn merge_nodes(&mut self, batch: &[NodeRecord]) -> MergeStats {
        let mut stats = MergeStats::default();
        for record in batch {
            if self.node_map.contains_key(&record.key) {
                stats.matched += 1;
            } else {
                let idx = self.graph.add_node(record.clone());
                self.node_map.insert(record.key, idx);
                stats.created += 1;
            }
        }
        stats
    }

    /// Merge a batch of edges. Both endpoints must already exist; the node
    /// batches of a projection land before its edge batches.
    pub fn merge_edges(&mut self, batch: &[EdgeRecord]) -> GraphResult<MergeStats> {
        let mut stats = MergeStats::default();
        for record in batch {
            let from = self.index_of(&record.from)?;
            let to = self.index_of(&record.to)?;
            if self.edge_set.insert((from, record.rel, to)) {
                self.graph.add_edge(from, to, record.rel);
                stats.created += 1;
            } else {
                stats.matched += 1;
            }
        }
        Ok(stats)
    }

    fn index_of(&self, key: &NodeKey) -> GraphResult<NodeIndex> {
        self.node_map
            .get(key)
            .copied()
            .ok_or(GraphError::MissingNode { key: *key })
    }

    /// The parent edges of a cat: `(parent_id, relationship)` pairs.
    /// Unknown cats have no parents.
    pub fn parents_of(&self, cat_id: i64) -> Vec<(i64, Parentage)> {
        let Some(&idx) = self.node_map.get(&NodeKey::cat(cat_id)) else {
            return Vec::new();
        };

        let mut parents: Vec<(i64, Parentage)> = self
            .graph
            .edges(idx)
            .filter_map(|edge| {
                let parentage = edge.weight().parentage()?;
                Some((self.graph[edge.target()].key.id, parentage))
            })
            .collect();
        parents.sort();
        parents
    }

    /// Write the store to a snapshot file, creating parent directories.
    pub fn save(&self, path: &Path) -> GraphResult<()> {
        let mut nodes: Vec<NodeRecord> = self.graph.node_weights().cloned().collect();
        nodes.sort_by(|a, b| a.key.cmp(&b.key));

        let mut edges: Vec<EdgeRecord> = self
            .graph
            .edge_references()
            .map(|e| EdgeRecord {
                from: self.graph[e.source()].key,
                rel: *e.weight(),
                to: self.graph[e.target()].key,
            })
            .collect();
        edges.sort_by(|a, b| (a.from, a.rel, a.to).cmp(&(b.from, b.rel, b.to)));

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| GraphError::SnapshotIo {
                path: path.display().to_string(),
                source: e,
            })?;
        }
        let json = serde_json::to_string(&Snapshot { nodes, edges })?;
        std::fs::write(path, json).map_err(|e| GraphError::SnapshotIo {
            path: path.display().to_string(),
            source: e,
        })?;
        Ok(())
    }

    /// Load a store from a snapshot file.
    pub fn load(path: &Path) -> GraphResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| GraphError::SnapshotIo {
            path: path.display().to_string(),
            source: e,
        })?;
        let snapshot: Snapshot = serde_json::from_str(&content)?;

        let mut store = PropertyGraph::new();
        store.merge_nodes(&snapshot.nodes);
        store.merge_edges(&snapshot.edges)?;
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Label;
    use std::collections::BTreeMap;

    fn node(label: Label, id: i64) -> NodeRecord {
        NodeRecord {
            key: NodeKey::new(label, id),
            props: BTreeMap::new(),
        }
    }

    fn edge(from: NodeKey, rel: RelType, to: NodeKey) -> EdgeRecord {
        EdgeRecord { from, rel, to }
    }

    #[test]
    fn test_merge_nodes_is_idempotent() {
        let mut store = PropertyGraph::new();
        let batch = vec![node(Label::Cat, 1), node(Label::Cat, 2)];

        let first = store.merge_nodes(&batch);
        assert_eq!(first, MergeStats { created: 2, matched: 0 });

        let second = store.merge_nodes(&batch);
        assert_eq!(second, MergeStats { created: 0, matched: 2 });
        assert_eq!(store.node_count(), 2);
    }

    #[test]
    fn test_merge_edges_is_idempotent() {
        let mut store = PropertyGraph::new();
        store.merge_nodes(&[node(Label::Cat, 1), node(Label::Cat, 2)]);
        let batch = vec![edge(NodeKey::cat(1), RelType::HasFather, NodeKey::cat(2))];

        assert_eq!(
            store.merge_edges(&batch).unwrap(),
            MergeStats { created: 1, matched: 0 }
        );
        assert_eq!(
            store.merge_edges(&batch).unwrap(),
            MergeStats { created: 0, matched: 1 }
        );
        assert_eq!(store.edge_count(), 1);
    }

    #[test]
    fn test_same_id_different_label_are_distinct_nodes() {
        let mut store = PropertyGraph::new();
        store.merge_nodes(&[node(Label::Cat, 1), node(Label::Breed, 1)]);
        assert_eq!(store.node_count(), 2);
    }

    #[test]
    fn test_edge_to_missing_node_is_an_error() {
        let mut store = PropertyGraph::new();
        store.merge_nodes(&[node(Label::Cat, 1)]);

        let err = store
            .merge_edges(&[edge(NodeKey::cat(1), RelType::HasMother, NodeKey::cat(99))])
            .unwrap_err();
        assert!(matches!(err, GraphError::MissingNode { .. }));
    }

    #[test]
    fn test_parents_of() {
        let mut store = PropertyGraph::new();
        store.merge_nodes(&[node(Label::Cat, 1), node(Label::Cat, 2), node(Label::Cat, 3)]);
        store
            .merge_edges(&[
                edge(NodeKey::cat(1), RelType::HasFather, NodeKey::cat(2)),
                edge(NodeKey::cat(1), RelType::HasMother, NodeKey::cat(3)),
            ])
            .unwrap();

        assert_eq!(
            store.parents_of(1),
            vec![(2, Parentage::Father), (3, Parentage::Mother)]
        );
        assert!(store.parents_of(2).is_empty());
        assert!(store.parents_of(42).is_empty());
    }

    #[test]
    fn test_entity_edges_are_not_parents() {
        let mut store = PropertyGraph::new();
        store.merge_nodes(&[node(Label::Cat, 1), node(Label::Breed, 2)]);
        store
            .merge_edges(&[edge(
                NodeKey::cat(1),
                RelType::BelongsToBreed,
                NodeKey::new(Label::Breed, 2),
            )])
            .unwrap();

        assert!(store.parents_of(1).is_empty());
    }

    #[test]
    fn test_snapshot_round_trip() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("graph/graph.json");

        let mut store = PropertyGraph::new();
        store.merge_nodes(&[node(Label::Cat, 1), node(Label::Cat, 2)]);
        store
            .merge_edges(&[edge(NodeKey::cat(1), RelType::HasFather, NodeKey::cat(2))])
            .unwrap();
        store.save(&path).unwrap();

        let loaded = PropertyGraph::load(&path).unwrap();
        assert_eq!(loaded.node_count(), 2);
        assert_eq!(loaded.edge_count(), 1);
        assert_eq!(loaded.parents_of(1), vec![(2, Parentage::Father)]);
    }
}
