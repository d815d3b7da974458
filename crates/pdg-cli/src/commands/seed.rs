//! Seed command implementation

use anyhow::{Context, Result};
use pdg_core::schema::DimensionKind;
use pdg_db::Warehouse;
use pdg_graph::{SeedOutcome, Seeder};

use crate::cli::{GlobalArgs, SeedArgs};
use crate::commands::common::{load_project, open_database};

/// Execute the seed command
pub async fn execute(args: &SeedArgs, global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;
    let db = open_database(&project)?;
    let warehouse = Warehouse::new(&db);

    let dimensions = DimensionKind::ALL
        .iter()
        .map(|kind| warehouse.fetch_dimension(*kind))
        .collect::<Result<Vec<_>, _>>()
        .context("Failed to read dimension tables (has `pdg build` been run?)")?;
    let facts = warehouse
        .fetch_facts()
        .context("Failed to read fact table (has `pdg build` been run?)")?;

    let seeder = Seeder::new(
        project.config.snapshot_absolute(&project.root),
        project.config.marker_absolute(&project.root),
        project.config.graph.batch_size,
    );

    match seeder
        .run(&dimensions, &facts, args.force)
        .context("Graph seeding failed")?
    {
        SeedOutcome::Skipped => {
            println!(
                "Store already seeded (marker at {}), nothing to do. Use --force to reseed.",
                project.config.marker_absolute(&project.root).display()
            );
        }
        SeedOutcome::Seeded(stats) => {
            println!(
                "  ✓ nodes: {} created, {} matched",
                stats.nodes.created, stats.nodes.matched
            );
            println!(
                "  ✓ edges: {} created, {} matched",
                stats.edges.created, stats.edges.matched
            );
            println!();
            println!(
                "Seeded graph store at {} ({} batches)",
                project.config.snapshot_absolute(&project.root).display(),
                stats.batches
            );
        }
    }

    Ok(())
}
