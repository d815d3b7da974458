//! Seeding orchestration: project the warehouse into the snapshot store,
//! gated by the marker file.

use crate::error::GraphResult;
use crate::marker::SeedMarker;
use crate::projector::{GraphModelProjector, ProjectionStats};
use crate::store::PropertyGraph;
use pdg_core::dimension::DimensionTable;
use pdg_core::fact::LinkedCat;
use std::path::PathBuf;

/// What a seeding run did.
#[derive(Debug)]
pub enum SeedOutcome {
    /// The marker was present; nothing was touched.
    Skipped,
    /// A projection pass ran and the marker was (re)created.
    Seeded(ProjectionStats),
}

/// Seeds the graph store from the dimensional model.
#[derive(Debug)]
pub struct Seeder {
    snapshot_path: PathBuf,
    marker: SeedMarker,
    projector: GraphModelProjector,
}

impl Seeder {
    pub fn new(
        snapshot_path: impl Into<PathBuf>,
        marker_path: impl Into<PathBuf>,
        batch_size: usize,
    ) -> Self {
        Seeder {
            snapshot_path: snapshot_path.into(),
            marker: SeedMarker::new(marker_path),
            projector: GraphModelProjector::new(batch_size),
        }
    }

    /// Run one seeding pass.
    ///
    /// The marker's presence skips the pass entirely (`force` clears it
    /// first). When a previous pass failed after writing the snapshot, the
    /// snapshot is reloaded and the projection re-merges into it; the merge
    /// semantics make that retry safe. The marker is created strictly after
    /// the snapshot has been written.
    pub fn run(
        &self,
        dimensions: &[DimensionTable],
        facts: &[LinkedCat],
        force: bool,
    ) -> GraphResult<SeedOutcome> {
        if force {
            self.marker.clear()?;
        } else if self.marker.is_present() {
            log::info!(
                "seeding marker present at {}, skipping",
                self.marker.path().display()
            );
            return Ok(SeedOutcome::Skipped);
        }

        let mut store = if self.snapshot_path.exists() {
            log::warn!(
                "unmarked snapshot found at {}, re-merging",
                self.snapshot_path.display()
            );
            PropertyGraph::load(&self.snapshot_path)?
        } else {
            PropertyGraph::new()
        };

        let stats = self.projector.project(dimensions, facts, &mut store)?;
        store.save(&self.snapshot_path)?;
        self.marker.create()?;

        Ok(SeedOutcome::Seeded(stats))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdg_core::fact::RawCat;
    use pdg_core::pipeline::build_model;
    use tempfile::TempDir;

    fn raw(id: i64, father: Option<i64>) -> RawCat {
        RawCat {
            id,
            name: format!("cat-{id}"),
            date_of_birth: "2012-02-02".to_string(),
            gender: "male".to_string(),
            registration_number: format!("R{id}"),
            title_before: String::new(),
            title_after: String::new(),
            chip: String::new(),
            breed_code: "SIB".to_string(),
            breed_name: "Siberian".to_string(),
            color_code: "ny".to_string(),
            color_name: "golden".to_string(),
            country_origin: "Russia".to_string(),
            country_current: "Russia".to_string(),
            cattery_name: "Taiga".to_string(),
            source_db_name: "registry".to_string(),
            father_id: father,
            mother_id: None,
        }
    }

    #[test]
    fn test_seed_then_skip() {
        let dir = TempDir::new().unwrap();
        let seeder = Seeder::new(
            dir.path().join("graph.json"),
            dir.path().join("graph.seeded"),
            100,
        );
        let model = build_model(&[raw(1, Some(2)), raw(2, None)]);

        let first = seeder.run(&model.dimensions, &model.facts, false).unwrap();
        assert!(matches!(first, SeedOutcome::Seeded(_)));

        let second = seeder.run(&model.dimensions, &model.facts, false).unwrap();
        assert!(matches!(second, SeedOutcome::Skipped));
    }

    #[test]
    fn test_force_reseeds_without_duplicates() {
        let dir = TempDir::new().unwrap();
        let snapshot = dir.path().join("graph.json");
        let seeder = Seeder::new(&snapshot, dir.path().join("graph.seeded"), 100);
        let model = build_model(&[raw(1, Some(2)), raw(2, None)]);

        seeder.run(&model.dimensions, &model.facts, false).unwrap();
        let counts = {
            let store = PropertyGraph::load(&snapshot).unwrap();
            (store.node_count(), store.edge_count())
        };

        let outcome = seeder.run(&model.dimensions, &model.facts, true).unwrap();
        let SeedOutcome::Seeded(stats) = outcome else {
            panic!("force must reseed");
        };
        assert_eq!(stats.nodes.created, 0);
        assert_eq!(stats.edges.created, 0);

        let store = PropertyGraph::load(&snapshot).unwrap();
        assert_eq!((store.node_count(), store.edge_count()), counts);
    }

    #[test]
    fn test_unmarked_snapshot_is_remerged() {
        // Simulates a run that wrote the snapshot but died before the
        // marker: the retry merges into the existing store.
        let dir = TempDir::new().unwrap();
        let snapshot = dir.path().join("graph.json");
        let marker = dir.path().join("graph.seeded");
        let model = build_model(&[raw(1, Some(2)), raw(2, None)]);

        let seeder = Seeder::new(&snapshot, &marker, 100);
        seeder.run(&model.dimensions, &model.facts, false).unwrap();
        std::fs::remove_file(&marker).unwrap();

        let outcome = seeder.run(&model.dimensions, &model.facts, false).unwrap();
        let SeedOutcome::Seeded(stats) = outcome else {
            panic!("missing marker must trigger a pass");
        };
        assert_eq!(stats.nodes.created, 0);
        assert_eq!(stats.edges.created, 0);
        assert!(SeedMarker::new(&marker).is_present());
    }
}
