use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod command;
pub(crate) mod config;
mod util;

use command::*;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Config file. Defaults to `$TABLEGEN_CONFIG`, then `.tablegen/config.toml` or `.tablegen.toml`.
    #[clap(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output
    #[clap(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Info(Info),
    Inject(Inject),
}

fn main() -> Result<()> {
    use Command::*;
    let cli = Cli::parse();
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    let config = config::load_config(cli.config.as_deref())?;
    match cli.command {
        Info(info) => info.run(&config),
        Inject(inject) => inject.run(&config),
    }
}
