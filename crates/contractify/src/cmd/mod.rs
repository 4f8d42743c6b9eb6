use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod generate;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Discover contract files and write the aggregated registry.
    Generate(GenerateArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Generate(args) => generate::run(args, format),
    }
}

#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// Project root. Defaults to the current working directory.
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,
}
