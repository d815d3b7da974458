//! Build command implementation

use anyhow::{Context, Result};
use chrono::Utc;
use pdg_core::pipeline::build_model;
use pdg_core::schema::FACT_TABLE;
use pdg_core::RunManifest;
use pdg_db::{Database, Warehouse};

use crate::cli::GlobalArgs;
use crate::commands::common::{load_project, open_database};

/// Execute the build command
pub async fn execute(global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;
    let started_at = Utc::now();

    let db = open_database(&project)?;
    let warehouse = Warehouse::new(&db);

    let source = project.config.source_absolute(&project.root);
    let raws = warehouse
        .load_raw_cats(&source)
        .context("Failed to load raw source rows")?;
    println!("Loaded {} raw rows from {}", raws.len(), source.display());

    let model = build_model(&raws);
    warehouse
        .write_model(&model)
        .context("Failed to write warehouse tables")?;

    for table in &model.dimensions {
        println!("  ✓ {} ({} rows)", table.kind.table_name(), table.len());
    }
    let fact_rows = db
        .query_count(&format!("SELECT * FROM {FACT_TABLE}"))
        .await
        .unwrap_or(0);
    println!("  ✓ {FACT_TABLE} ({} rows)", fact_rows);

    let manifest = RunManifest::for_model(&model, &project.config.source, started_at);
    let manifest_path = project.manifest_path();
    manifest
        .save(&manifest_path)
        .context("Failed to write run manifest")?;

    println!();
    println!(
        "Build complete (run {}), manifest at {}",
        manifest.run_id,
        manifest_path.display()
    );

    Ok(())
}
