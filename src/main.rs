mod cli;
mod config;
mod error;
mod menu;
mod status;

use anyhow::Result;
use clap::Parser;

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli::render::run(cli)
}
