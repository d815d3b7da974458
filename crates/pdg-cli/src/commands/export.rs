//! Export command implementation

use anyhow::{Context, Result};
use pdg_db::Warehouse;
use std::path::PathBuf;

use crate::cli::{ExportArgs, GlobalArgs};
use crate::commands::common::{load_project, open_database};

/// Execute the export command
pub async fn execute(args: &ExportArgs, global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;
    let db = open_database(&project)?;
    let warehouse = Warehouse::new(&db);

    let dir = match &args.output_dir {
        Some(dir) => PathBuf::from(dir),
        None => project.config.export_absolute(&project.root),
    };

    let written = warehouse
        .export_csv(&dir)
        .context("Failed to export warehouse tables (has `pdg build` been run?)")?;

    for path in &written {
        println!("  ✓ {}", path.display());
    }
    println!();
    println!("Exported {} files to {}", written.len(), dir.display());

    Ok(())
}
