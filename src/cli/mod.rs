// CLI module
// Command-line interface and argument parsing

mod args;

pub use args::{CliArgs, StrategyType};

use clap::Parser;

/// Parse command-line arguments using clap
///
/// Returns a `CliArgs` struct with the parsed values. On invalid
/// arguments, missing required arguments, or --help, clap displays the
/// appropriate message and exits the process.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}
