mod citations;
mod clean;
mod cli;
mod commands;
mod common;
mod extract;
mod fetch;
mod normalize;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};
use commands::{run_cite, run_clean, run_crawl, run_summarize};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Crawl(args) => {
            run_crawl(args)?;
        }
        Commands::Clean(args) => {
            run_clean(args)?;
        }
        Commands::Cite(args) => {
            run_cite(args)?;
        }
        Commands::Summarize(args) => {
            run_summarize(args)?;
        }
    }

    Ok(())
}
