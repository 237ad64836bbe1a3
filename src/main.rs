mod cli;
mod commands;
mod differ;
mod errors;
#[cfg(test)]
mod fixtures;
mod index;
mod manager;
mod nodes;
mod package;
mod paths;
mod printer;
mod solver;
mod version;

use std::process::ExitCode;

use clap::Parser;

use cli::Cli;
use commands::execute;

fn main() -> color_eyre::Result<ExitCode> {
    color_eyre::install()?;
    let cli = Cli::parse();
    execute(cli)
}
