//! CLI entry point for rolling tables and composing pages

use std::process::ExitCode;

use clap::Parser;
use rollpage::io::cli::{Cli, CommandRunner};
use rollpage::io::logging::init_logging;
use tracing::error;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let mut runner = CommandRunner::new(cli);
    let mut stdout = std::io::stdout().lock();
    match runner.run(&mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(failure) => {
            error!(category = ?failure.category(), "{failure}");
            ExitCode::from(failure.exit_code())
        }
    }
}
