//! wikidex CLI — scrape 52poke wiki pages into structured JSON.
//!
//! Fetches species, ability, and move pages and persists one JSON
//! record per entity, with optional artwork download.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
