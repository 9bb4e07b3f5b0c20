use anyhow::Result;
use clap::Parser;

use glyphscrub::cli::Cli;

fn main() -> Result<()> {
    Cli::parse().run()
}
