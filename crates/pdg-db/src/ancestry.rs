//! Recursive-join ancestry adapter over the relational warehouse.
//!
//! One `WITH RECURSIVE` statement against the `parent_edges` view walks all
//! bounded parent paths, then collapses them to the minimal discovery depth
//! per `(ancestor, relationship)` pair. The distinct-row `UNION` in the
//! recursive step keeps re-used ancestors from multiplying the walk.

use crate::duckdb::DuckDbBackend;
use crate::error::{DbError, DbResult};
use crate::warehouse::PARENT_EDGES_VIEW;
use pdg_core::ancestry::{backend_error, AncestorTriple, AncestryBackend, Parentage};
use pdg_core::error::CoreResult;

/// The relational formulation of the ancestry traversal.
pub struct RelationalAncestry<'a> {
    db: &'a DuckDbBackend,
}

impl<'a> RelationalAncestry<'a> {
    pub fn new(db: &'a DuckDbBackend) -> Self {
        RelationalAncestry { db }
    }

    fn query(&self, root_id: i64, max_depth: u32) -> DbResult<Vec<AncestorTriple>> {
        let sql = format!(
            "WITH RECURSIVE walk (ancestor_id, depth, relationship) AS ( \
                 SELECT parent_id, CAST(1 AS BIGINT), relationship \
                 FROM {PARENT_EDGES_VIEW} \
                 WHERE child_id = ? \
               UNION \
                 SELECT e.parent_id, w.depth + 1, e.relationship \
                 FROM walk w \
                 JOIN {PARENT_EDGES_VIEW} e ON e.child_id = w.ancestor_id \
                 WHERE w.depth < ? \
             ) \
             SELECT ancestor_id, MIN(depth) AS depth, relationship \
             FROM walk \
             GROUP BY ancestor_id, relationship \
             ORDER BY depth, ancestor_id, relationship"
        );

        let conn = self.db.lock()?;
        let mut stmt = conn.prepare(&sql)?;
        let triples: Vec<AncestorTriple> = stmt
            .query_map(duckdb::params![root_id, max_depth as i64], |row| {
                let ancestor_id: i64 = row.get(0)?;
                let depth: i64 = row.get(1)?;
                let label: String = row.get(2)?;
                Ok((ancestor_id, depth, label))
            })?
            .collect::<Result<Vec<_>, _>>()
            .map_err(DbError::from)?
            .into_iter()
            .map(|(ancestor_id, depth, label)| {
                let relationship =
                    Parentage::from_edge_label(&label).ok_or_else(|| DbError::RowMapping {
                        table: PARENT_EDGES_VIEW.to_string(),
                        message: format!("unexpected relationship label '{label}'"),
                    })?;
                Ok(AncestorTriple::new(ancestor_id, depth as u32, relationship))
            })
            .collect::<DbResult<_>>()?;

        Ok(triples)
    }
}

impl AncestryBackend for RelationalAncestry<'_> {
    fn name(&self) -> &'static str {
        "relational"
    }

    fn ancestors(&self, root_id: i64, max_depth: u32) -> CoreResult<Vec<AncestorTriple>> {
        // The recursive seed emits depth-1 rows unconditionally, so the
        // zero-depth contract is enforced before touching SQL.
        if max_depth == 0 {
            return Ok(Vec::new());
        }
        self.query(root_id, max_depth)
            .map_err(|e| backend_error(self.name(), e))
    }
}
