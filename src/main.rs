use anyhow::Result;
use clap::Parser;

mod cli_bin;

use cli_bin::args::{Cli, Commands};
use cli_bin::commands;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();

    match cli.command {
        Commands::Apply(args) => commands::apply_command(args),
        Commands::Chain(args) => commands::chain_command(args),
        Commands::Merge(args) => commands::merge_command(args),
        Commands::Render(args) => commands::render_command(args),
    }
}
