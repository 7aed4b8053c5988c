//! orthoprof command-line entry point

use anyhow::Result;
use clap::Parser;
use orthoprof_cli::commands::Commands;

#[derive(Debug, Parser)]
#[command(name = "orthoprof")]
#[command(about = "Format, trim and check orthographic profiles", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.command.execute()
}
