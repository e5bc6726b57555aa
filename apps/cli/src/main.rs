//! guidegen CLI — assembles markdown guides for the documentation site.
//!
//! Reads the matched guide collection, renders every guide into the content
//! tree, and writes the collection back with the rendered text attached.

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
