//! Pedigraph CLI - build the pedigree warehouse and compare ancestry backends

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cli::Cli;
use commands::{ancestry, build, compare, export, seed};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        cli::Commands::Build => build::execute(&cli.global).await,
        cli::Commands::Export(args) => export::execute(args, &cli.global).await,
        cli::Commands::Seed(args) => seed::execute(args, &cli.global).await,
        cli::Commands::Ancestry(args) => ancestry::execute(args, &cli.global).await,
        cli::Commands::Compare(args) => compare::execute(args, &cli.global).await,
    }
}
