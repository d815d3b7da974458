//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Pedigraph - pedigree warehouse builder and ancestry backend comparison
#[derive(Parser, Debug)]
#[command(name = "pdg")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: String,

    /// Override config file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the pipeline: load the raw source, build dimensions, link facts
    Build,

    /// Export warehouse tables as CSV files
    Export(ExportArgs),

    /// Project the warehouse into the graph store (skipped when already seeded)
    Seed(SeedArgs),

    /// Run the bounded ancestry traversal against one backend
    Ancestry(AncestryArgs),

    /// Run the traversal against both backends and diff the results
    Compare(CompareArgs),
}

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Override output directory
    #[arg(short, long)]
    pub output_dir: Option<String>,
}

/// Arguments for the seed command
#[derive(Args, Debug)]
pub struct SeedArgs {
    /// Clear the seeding marker and reseed
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the ancestry command
#[derive(Args, Debug)]
pub struct AncestryArgs {
    /// Root cat id to traverse from
    #[arg(long)]
    pub cat_id: i64,

    /// Maximum number of generations to include
    #[arg(long, default_value_t = 3)]
    pub depth: u32,

    /// Which backend answers the traversal
    #[arg(short, long, value_enum, default_value = "relational")]
    pub backend: Backend,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: AncestryOutput,
}

/// Ancestry output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AncestryOutput {
    /// Aligned columns
    Table,
    /// JSON array of triples
    Json,
}

/// Traversal backends
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Recursive-join query over the warehouse tables
    Relational,
    /// Breadth-first expansion over the property graph
    Graph,
}

/// Arguments for the compare command
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Root cat id to traverse from
    #[arg(long)]
    pub cat_id: i64,

    /// Maximum number of generations to include
    #[arg(long, default_value_t = 3)]
    pub depth: u32,
}
