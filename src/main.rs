mod cli_bin;

use anyhow::Result;
use clap::Parser;
use cli_bin::args::{Cli, Commands};
use cli_bin::commands;
use log::LevelFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Covers(args) => commands::covers_command(args)?,
        Commands::FrontMatter(args) => commands::front_matter_command(args)?,
        Commands::Local(args) => commands::local_command(args)?,
        Commands::Render(args) => commands::render_command(args)?,
    }
    Ok(())
}

/// `RUST_LOG` wins over the flags when it is set
fn init_logging(verbose: bool, quiet: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}
