mod cmd;
mod exit;
mod logging;
mod output;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};

use crate::cmd::Command;
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "contractify", version, about = "API contract registry generator")]
struct Cli {
    /// Output format for command results.
    #[arg(long, value_name = "FORMAT", default_value = "pretty", global = true)]
    format: OutputFormat,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(long, value_name = "LEVEL", default_value = "warn", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Option<Command>,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => exit::SUCCESS,
                _ => exit::FAILURE,
            };
            std::process::exit(code);
        }
    };
    init_logging(cli.log_format, cli.log_level);

    let Some(command) = cli.command else {
        println!("{}", Cli::command().render_help());
        std::process::exit(exit::FAILURE);
    };

    match cmd::run(command, cli.format) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}
