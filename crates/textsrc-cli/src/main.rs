// this_file: crates/textsrc-cli/src/main.rs

//! textsrc CLI: render text source settings to PNG

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match &cli.command {
        Commands::Render(args) => commands::render::run(args)?,
        Commands::Defaults => commands::defaults::run()?,
        Commands::Fonts(args) => commands::fonts::run(args)?,
    }

    Ok(())
}

/// Initialize logging based on verbosity flag.
fn init_logger(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}
