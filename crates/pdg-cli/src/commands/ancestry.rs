//! Ancestry command implementation

use anyhow::{Context, Result};
use pdg_core::ancestry::{AncestorTriple, AncestryBackend};
use pdg_db::RelationalAncestry;
use pdg_graph::{GraphAncestry, PropertyGraph};

use crate::cli::{AncestryArgs, AncestryOutput, Backend, GlobalArgs};
use crate::commands::common::{load_project, open_database, Project};

/// Execute the ancestry command
pub async fn execute(args: &AncestryArgs, global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;

    let triples = match args.backend {
        Backend::Relational => {
            let db = open_database(&project)?;
            RelationalAncestry::new(&db)
                .ancestors(args.cat_id, args.depth)
                .context("Relational traversal failed (has `pdg build` been run?)")?
        }
        Backend::Graph => {
            let graph = load_graph(&project)?;
            GraphAncestry::new(&graph)
                .ancestors(args.cat_id, args.depth)
                .context("Graph traversal failed")?
        }
    };

    match args.output {
        AncestryOutput::Table => print_triples(args.cat_id, &triples),
        AncestryOutput::Json => println!("{}", serde_json::to_string_pretty(&triples)?),
    }
    Ok(())
}

/// Load the seeded graph snapshot.
pub fn load_graph(project: &Project) -> Result<PropertyGraph> {
    let path = project.config.snapshot_absolute(&project.root);
    PropertyGraph::load(&path)
        .context("Failed to load graph snapshot (has `pdg seed` been run?)")
}

/// Print traversal results in the contract's column order.
pub fn print_triples(source_id: i64, triples: &[AncestorTriple]) {
    if triples.is_empty() {
        println!("No ancestors found.");
        return;
    }

    println!("source_id  ancestor_id  depth  relationship");
    for t in triples {
        println!(
            "{:<9}  {:<11}  {:<5}  {}",
            source_id,
            t.ancestor_id,
            t.depth,
            t.relationship.edge_label()
        );
    }
    println!();
    println!("{} ancestors", triples.len());
}
