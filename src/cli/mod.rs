// CLI module
// Command-line interface: argument parsing and subcommand dispatch

mod args;
pub mod commands;

pub use args::{CliArgs, Command};
pub use commands::run;

use clap::Parser;

/// Parse command-line arguments using clap
///
/// If parsing fails (invalid arguments, missing required arguments, or the
/// --help flag), clap displays an error message or the help text and exits
/// the process.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}
