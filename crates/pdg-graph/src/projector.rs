//! Projection of the dimensional model into the property graph.
//!
//! Every dimension row and every fact row becomes a labeled node; every
//! non-sentinel foreign key becomes a typed edge, and the parent
//! self-references become `HAS_FATHER`/`HAS_MOTHER` edges. The sentinel
//! asymmetry is enforced here: the "unknown" row of each dimension is
//! projected as a node, but nothing ever links to it.

use crate::error::GraphResult;
use crate::model::{EdgeRecord, Label, NodeKey, NodeRecord, RelType};
use crate::store::{MergeStats, PropertyGraph};
use pdg_core::dimension::DimensionTable;
use pdg_core::fact::LinkedCat;
use pdg_core::schema::{FACT_ATTR_COLUMNS, FACT_FK_COLUMNS};
use std::collections::BTreeMap;

/// Counters for one projection pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectionStats {
    pub nodes: MergeStats,
    pub edges: MergeStats,
    pub batches: usize,
}

/// Projects dimension and fact tables into a [`PropertyGraph`] as batched,
/// idempotent merges.
#[derive(Debug)]
pub struct GraphModelProjector {
    batch_size: usize,
}

impl GraphModelProjector {
    /// Create a projector; `batch_size` bounds how many records go into one
    /// merge call.
    pub fn new(batch_size: usize) -> Self {
        assert!(batch_size > 0, "batch size must be at least 1");
        GraphModelProjector { batch_size }
    }

    /// The node records a projection emits, dimensions first.
    pub fn node_records(dimensions: &[DimensionTable], facts: &[LinkedCat]) -> Vec<NodeRecord> {
        let mut nodes = Vec::new();

        for table in dimensions {
            let label = Label::for_dimension(table.kind);
            let columns: Vec<&str> = table
                .kind
                .key_columns()
                .iter()
                .chain(table.kind.attr_columns())
                .copied()
                .collect();
            for row in &table.rows {
                let values = row.key.parts().iter().chain(row.attributes.iter());
                let props: BTreeMap<String, String> = columns
                    .iter()
                    .zip(values)
                    .map(|(c, v)| (c.to_string(), v.clone()))
                    .collect();
                nodes.push(NodeRecord {
                    key: NodeKey::new(label, row.id.as_i64()),
                    props,
                });
            }
        }

        for cat in facts {
            let values = [
                &cat.name,
                &cat.date_of_birth,
                &cat.gender,
                &cat.registration_number,
                &cat.title_before,
                &cat.title_after,
                &cat.chip,
            ];
            let props: BTreeMap<String, String> = FACT_ATTR_COLUMNS
                .iter()
                .zip(values)
                .map(|(c, v)| (c.to_string(), v.clone()))
                .collect();
            nodes.push(NodeRecord {
                key: NodeKey::cat(cat.id),
                props,
            });
        }

        nodes
    }

    /// The edge records a projection emits. Sentinel references produce
    /// nothing.
    pub fn edge_records(facts: &[LinkedCat]) -> Vec<EdgeRecord> {
        let mut edges = Vec::new();

        for cat in facts {
            let from = NodeKey::cat(cat.id);

            for (column, kind) in FACT_FK_COLUMNS {
                let id = cat.fk(column);
                if id.is_unknown() {
                    continue;
                }
                edges.push(EdgeRecord {
                    from,
                    rel: RelType::for_fk_column(column),
                    to: NodeKey::new(Label::for_dimension(kind), id.as_i64()),
                });
            }

            if let Some(father) = cat.father_id {
                edges.push(EdgeRecord {
                    from,
                    rel: RelType::HasFather,
                    to: NodeKey::cat(father),
                });
            }
            if let Some(mother) = cat.mother_id {
                edges.push(EdgeRecord {
                    from,
                    rel: RelType::HasMother,
                    to: NodeKey::cat(mother),
                });
            }
        }

        edges
    }

    /// Run one full projection pass against `store`.
    ///
    /// Node batches land before edge batches so every edge finds its
    /// endpoints; a retry after a mid-batch failure just re-merges.
    pub fn project(
        &self,
        dimensions: &[DimensionTable],
        facts: &[LinkedCat],
        store: &mut PropertyGraph,
    ) -> GraphResult<ProjectionStats> {
        let mut stats = ProjectionStats::default();

        let nodes = Self::node_records(dimensions, facts);
        for batch in nodes.chunks(self.batch_size) {
            stats.nodes.absorb(store.merge_nodes(batch));
            stats.batches += 1;
        }

        let edges = Self::edge_records(facts);
        for batch in edges.chunks(self.batch_size) {
            stats.edges.absorb(store.merge_edges(batch)?);
            stats.batches += 1;
        }

        log::info!(
            "projected graph: {} nodes ({} new), {} edges ({} new), {} batches",
            stats.nodes.created + stats.nodes.matched,
            stats.nodes.created,
            stats.edges.created + stats.edges.matched,
            stats.edges.created,
            stats.batches
        );

        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdg_core::fact::RawCat;
    use pdg_core::pipeline::build_model;

    fn raw(id: i64, breed: &str, father: Option<i64>, mother: Option<i64>) -> RawCat {
        RawCat {
            id,
            name: format!("cat-{id}"),
            date_of_birth: "2017-09-09".to_string(),
            gender: "male".to_string(),
            registration_number: format!("R{id}"),
            title_before: String::new(),
            title_after: String::new(),
            chip: String::new(),
            breed_code: breed.to_string(),
            breed_name: format!("{breed} breed"),
            color_code: "n".to_string(),
            color_name: "black".to_string(),
            country_origin: "Norway".to_string(),
            country_current: "Norway".to_string(),
            cattery_name: "Fjellkatt".to_string(),
            source_db_name: "registry".to_string(),
            father_id: father,
            mother_id: mother,
        }
    }

    #[test]
    fn test_every_row_becomes_a_node() {
        let model = build_model(&[raw(1, "NFO", None, None), raw(2, "PER", None, None)]);
        let nodes = GraphModelProjector::node_records(&model.dimensions, &model.facts);

        let dim_rows: usize = model.dimensions.iter().map(|t| t.rows.len()).sum();
        assert_eq!(nodes.len(), dim_rows + model.facts.len());

        // Sentinel rows are projected as nodes.
        assert!(nodes
            .iter()
            .any(|n| n.key == NodeKey::new(Label::Breed, -1)));
    }

    #[test]
    fn test_no_edge_terminates_at_a_sentinel_node() {
        // Cat 2 has a blank breed and cattery: those references are
        // sentinels and must not produce edges.
        let mut stray = raw(2, "", None, None);
        stray.cattery_name = String::new();
        let model = build_model(&[raw(1, "NFO", None, None), stray]);

        let edges = GraphModelProjector::edge_records(&model.facts);
        assert!(!edges.is_empty());
        assert!(edges.iter().all(|e| e.to.id != -1 && e.from.id != -1));
    }

    #[test]
    fn test_parent_edges_emitted_only_when_present() {
        let model = build_model(&[raw(1, "NFO", Some(2), None), raw(2, "NFO", None, None)]);
        let edges = GraphModelProjector::edge_records(&model.facts);

        let parent_edges: Vec<_> = edges
            .iter()
            .filter(|e| e.rel.parentage().is_some())
            .collect();
        assert_eq!(parent_edges.len(), 1);
        assert_eq!(parent_edges[0].rel, RelType::HasFather);
        assert_eq!(parent_edges[0].to, NodeKey::cat(2));
    }

    #[test]
    fn test_projection_is_idempotent() {
        let model = build_model(&[raw(1, "NFO", Some(2), None), raw(2, "NFO", None, None)]);
        let projector = GraphModelProjector::new(3);
        let mut store = PropertyGraph::new();

        let first = projector
            .project(&model.dimensions, &model.facts, &mut store)
            .unwrap();
        let nodes_after_first = store.node_count();
        let edges_after_first = store.edge_count();
        assert!(first.nodes.created > 0);

        let second = projector
            .project(&model.dimensions, &model.facts, &mut store)
            .unwrap();
        assert_eq!(second.nodes.created, 0);
        assert_eq!(second.edges.created, 0);
        assert_eq!(store.node_count(), nodes_after_first);
        assert_eq!(store.edge_count(), edges_after_first);
    }

    #[test]
    fn test_small_batches_cover_everything() {
        let model = build_model(&[raw(1, "NFO", None, None)]);
        let projector = GraphModelProjector::new(1);
        let mut store = PropertyGraph::new();

        let stats = projector
            .project(&model.dimensions, &model.facts, &mut store)
            .unwrap();
        // One record per batch: every merge is its own batch.
        assert_eq!(
            stats.batches,
            store.node_count() + store.edge_count()
        );
    }
}
