//! Compare command implementation

use anyhow::{Context, Result};
use pdg_core::ancestry::compare_backends;
use pdg_db::RelationalAncestry;
use pdg_graph::GraphAncestry;

use crate::cli::{CompareArgs, GlobalArgs};
use crate::commands::ancestry::load_graph;
use crate::commands::common::{load_project, open_database};

/// Execute the compare command
pub async fn execute(args: &CompareArgs, global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;

    let db = open_database(&project)?;
    let relational = RelationalAncestry::new(&db);

    let graph_store = load_graph(&project)?;
    let graph = GraphAncestry::new(&graph_store);

    let comparison = compare_backends(&relational, &graph, args.cat_id, args.depth)
        .context("Backend comparison failed")?;

    if comparison.is_equivalent() {
        println!(
            "✓ Backends agree for cat {} at depth {}: {} ancestor triples",
            args.cat_id, args.depth, comparison.matched
        );
        return Ok(());
    }

    println!(
        "✗ Backends diverge for cat {} at depth {} ({} triples agree)",
        args.cat_id, args.depth, comparison.matched
    );
    for t in &comparison.left_only {
        println!(
            "  only {}: ({}, {}, {})",
            comparison.left,
            t.ancestor_id,
            t.depth,
            t.relationship.edge_label()
        );
    }
    for t in &comparison.right_only {
        println!(
            "  only {}: ({}, {}, {})",
            comparison.right,
            t.ancestor_id,
            t.depth,
            t.relationship.edge_label()
        );
    }

    // Exit code 3 = equivalence violation, the one result this tool exists
    // to catch.
    std::process::exit(3);
}
