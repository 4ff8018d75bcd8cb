//! Structured logging setup for the command-line front end

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::io::configuration::DEFAULT_LOG_FILTER;

/// Filter directive for the requested verbosity when `RUST_LOG` is unset
pub const fn default_directive(verbose: bool, quiet: bool) -> &'static str {
    if quiet {
        "rollpage=error"
    } else if verbose {
        "rollpage=debug"
    } else {
        DEFAULT_LOG_FILTER
    }
}

/// Install a stderr `fmt` subscriber filtered by `RUST_LOG`
///
/// Returns `false` when a global subscriber was already installed.
pub fn init_logging(verbose: bool, quiet: bool) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .is_ok()
}
